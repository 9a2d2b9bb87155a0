mod cli;
mod commands;
mod infra;
mod render;

use score_insights::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
