use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use fastrand::Rng;
use score_insights::analytics::scoring::EntityType;
use score_insights::config::GeneratorConfig;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReshapeKind {
    /// Counts per score range and entity type
    Range,
    /// Trailing six-month average scores per entity type
    Trend,
    /// Lead counts per status
    LeadStatus,
    /// Property counts per property type
    PropertyType,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_entity(raw: &str) -> Result<EntityType, String> {
    raw.parse::<EntityType>().map_err(|err| err.to_string())
}

/// A `--seed` flag overrides `SCORE_SEED`.
pub(crate) fn seeded_rng(seed: Option<u64>, config: &GeneratorConfig) -> Rng {
    match seed {
        Some(seed) => Rng::with_seed(seed),
        None => config.rng(),
    }
}

/// Midday UTC on `today`, so generated history lines up with the reporting
/// date regardless of the local offset.
pub(crate) fn anchor_instant(today: NaiveDate) -> DateTime<Utc> {
    today
        .and_hms_opt(12, 0, 0)
        .map(|instant| instant.and_utc())
        .unwrap_or_else(Utc::now)
}
