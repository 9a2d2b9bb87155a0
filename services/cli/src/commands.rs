use crate::infra::{anchor_instant, parse_date, parse_entity, seeded_rng, ReshapeKind};
use crate::render::render_dashboard;
use chrono::{Local, NaiveDate};
use clap::Args;
use score_insights::analytics::aggregates::{
    dimensions, summarize_records, AggregateImporter, AnalyticsSnapshot,
};
use score_insights::analytics::report::{
    category_distribution, range_distribution, trend_series, CategoryLabels, KpiDeriver,
    SyntheticBaseline,
};
use score_insights::analytics::scoring::{EntityType, FactorSynthesizer, RecordGenerator};
use score_insights::config::AppConfig;
use score_insights::error::AppError;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct SynthesizeArgs {
    /// Number of factors (defaults to SCORE_FACTOR_COUNT)
    #[arg(long)]
    pub(crate) count: Option<usize>,
    /// Target composite score in [0, 100]
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) target: f64,
    /// Entity type whose factor vocabulary is used
    #[arg(long, value_parser = parse_entity, default_value = "lead")]
    pub(crate) entity: EntityType,
    /// Seed for reproducible draws (overrides SCORE_SEED)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

#[derive(Args, Debug)]
pub(crate) struct GenerateArgs {
    /// Entity type to generate
    #[arg(long, value_parser = parse_entity)]
    pub(crate) entity: EntityType,
    /// Number of records (defaults to SCORE_SIMULATED_RECORDS)
    #[arg(long)]
    pub(crate) count: Option<usize>,
    /// Seed for reproducible draws (overrides SCORE_SEED)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Anchor date for generated timestamps (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct ReshapeArgs {
    /// Aggregate CSV export with a `count` column
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Which dense series to build
    #[arg(long, value_enum)]
    pub(crate) kind: ReshapeKind,
    /// Reference date ending the trend window (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct DashboardArgs {
    /// JSON aggregate snapshot; simulated records are summarized when omitted
    #[arg(long)]
    pub(crate) snapshot: Option<PathBuf>,
    /// Reporting date (defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Seed for simulated records and the stand-in baseline
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Emit JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_synthesize(args: SynthesizeArgs, config: &AppConfig) -> Result<(), AppError> {
    let SynthesizeArgs {
        count,
        target,
        entity,
        seed,
    } = args;

    let count = count.unwrap_or(config.generator.factor_count);
    let mut rng = seeded_rng(seed, &config.generator);
    let breakdown = FactorSynthesizer::for_entity(entity).synthesize(&mut rng, count, target)?;

    info!(
        %entity,
        factors = breakdown.len(),
        deviation = breakdown.deviation(),
        "synthesized factor breakdown"
    );
    print_json(&breakdown)
}

pub(crate) fn run_generate(args: GenerateArgs, config: &AppConfig) -> Result<(), AppError> {
    let GenerateArgs {
        entity,
        count,
        seed,
        today,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let count = count.unwrap_or(config.generator.simulated_records);
    let mut rng = seeded_rng(seed, &config.generator);
    let records = RecordGenerator::new(anchor_instant(today))
        .with_factor_count(config.generator.factor_count)
        .generate(&mut rng, entity, count)?;

    info!(%entity, records = records.len(), "generated synthetic records");
    print_json(&records)
}

pub(crate) fn run_reshape(args: ReshapeArgs) -> Result<(), AppError> {
    let ReshapeArgs { csv, kind, today } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let records = AggregateImporter::from_csv_path(&csv)?;
    info!(path = %csv.display(), records = records.len(), ?kind, "reshaping aggregate export");

    match kind {
        ReshapeKind::Range => print_json(&range_distribution(&records)),
        ReshapeKind::Trend => print_json(&trend_series(&records, today)),
        ReshapeKind::LeadStatus => print_json(&category_distribution(
            &records,
            dimensions::STATUS,
            &CategoryLabels::lead_status(),
        )),
        ReshapeKind::PropertyType => print_json(&category_distribution(
            &records,
            dimensions::PROPERTY_TYPE,
            &CategoryLabels::property_type(),
        )),
    }
}

pub(crate) fn run_dashboard(args: DashboardArgs, config: &AppConfig) -> Result<(), AppError> {
    let DashboardArgs {
        snapshot,
        today,
        seed,
        json,
    } = args;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let mut rng = seeded_rng(seed, &config.generator);

    let (snapshot, source) = match snapshot {
        Some(path) => {
            let snapshot = AggregateImporter::snapshot_from_path(&path)?;
            (snapshot, format!("snapshot {}", path.display()))
        }
        None => {
            let snapshot = simulate_snapshot(config, &mut rng, today)?;
            (
                snapshot,
                format!(
                    "{} simulated records per entity type",
                    config.generator.simulated_records
                ),
            )
        }
    };

    let mut deriver = KpiDeriver::new(SyntheticBaseline::new(rng.fork()));
    let summary = snapshot.summary(today, &mut deriver);

    if json {
        return print_json(&summary);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_dashboard(&mut out, &summary, &source, today)?;
    Ok(())
}

fn simulate_snapshot(
    config: &AppConfig,
    rng: &mut fastrand::Rng,
    today: NaiveDate,
) -> Result<AnalyticsSnapshot, AppError> {
    let generator = RecordGenerator::new(anchor_instant(today))
        .with_factor_count(config.generator.factor_count);

    let mut records = Vec::new();
    for entity_type in EntityType::ordered() {
        records.extend(generator.generate(rng, entity_type, config.generator.simulated_records)?);
    }

    Ok(summarize_records(&records))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{rendered}")?;
    Ok(())
}
