use crate::commands::{
    run_dashboard, run_generate, run_reshape, run_synthesize, DashboardArgs, GenerateArgs,
    ReshapeArgs, SynthesizeArgs,
};
use clap::{Parser, Subcommand};
use score_insights::config::AppConfig;
use score_insights::error::AppError;
use score_insights::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "score-insights",
    about = "Synthesize scored records and build dashboard analytics from aggregate exports",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Synthesize one weighted factor breakdown for a target score
    Synthesize(SynthesizeArgs),
    /// Generate synthetic scored records for an entity type
    Generate(GenerateArgs),
    /// Reshape an aggregate CSV export into dense chart rows
    Reshape(ReshapeArgs),
    /// Build the dashboard summary from a snapshot or simulated records
    Dashboard(DashboardArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(environment = ?config.environment, "score insights starting");

    match cli.command {
        Command::Synthesize(args) => run_synthesize(args, &config),
        Command::Generate(args) => run_generate(args, &config),
        Command::Reshape(args) => run_reshape(args),
        Command::Dashboard(args) => run_dashboard(args, &config),
    }
}
