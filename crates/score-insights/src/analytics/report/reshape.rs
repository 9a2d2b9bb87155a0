//! Dense, display-ready series built from sparse aggregate collections.
//!
//! Counts and averages are gap-filled differently: a missing count is a
//! real zero, a missing average is `None`.

use super::labels::CategoryLabels;
use super::views::{CategoryRow, RangeDistributionRow, TrendPoint};
use crate::analytics::aggregates::{
    dimensions, find_first, AggregateRecord, CompositeKey, ScoreRange,
};
use crate::analytics::scoring::EntityType;
use chrono::{Datelike, Months, NaiveDate};

pub const TREND_MONTHS: u32 = 6;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One row per fixed score range, one count per entity type.
pub fn range_distribution(records: &[AggregateRecord]) -> Vec<RangeDistributionRow> {
    ScoreRange::ordered()
        .into_iter()
        .map(|range| {
            let count = |entity_type: EntityType| {
                let probe = CompositeKey::new()
                    .with(dimensions::RANGE, range.label())
                    .with(dimensions::TYPE, entity_type.key());
                find_first(records, &probe).map_or(0, |record| record.count)
            };

            RangeDistributionRow {
                range: range.label(),
                lead: count(EntityType::Lead),
                property: count(EntityType::Property),
                agent: count(EntityType::Agent),
            }
        })
        .collect()
}

/// `(year, month)` pairs for the `months` calendar months ending with the
/// month containing `reference`, oldest first.
pub fn trailing_months(reference: NaiveDate, months: u32) -> Vec<(i32, u32)> {
    let Some(month_start) = reference.with_day(1) else {
        return Vec::new();
    };

    (0..months)
        .rev()
        .filter_map(|offset| month_start.checked_sub_months(Months::new(offset)))
        .map(|date| (date.year(), date.month()))
        .collect()
}

/// Average score per entity type for the trailing six months ending at
/// `reference`.
pub fn trend_series(records: &[AggregateRecord], reference: NaiveDate) -> Vec<TrendPoint> {
    trailing_months(reference, TREND_MONTHS)
        .into_iter()
        .map(|(year, month)| {
            let average = |entity_type: EntityType| {
                let probe = CompositeKey::new()
                    .with(dimensions::MONTH, month)
                    .with(dimensions::YEAR, year)
                    .with(dimensions::TYPE, entity_type.key());
                find_first(records, &probe).and_then(|record| record.average_score)
            };

            TrendPoint {
                month: MONTH_LABELS[(month - 1) as usize],
                month_number: month,
                year,
                lead: average(EntityType::Lead),
                property: average(EntityType::Property),
                agent: average(EntityType::Agent),
            }
        })
        .collect()
}

/// One row per input record, labelled through `labels`. Records lacking
/// `dimension` are reported under `unknown`.
pub fn category_distribution(
    records: &[AggregateRecord],
    dimension: &str,
    labels: &CategoryLabels,
) -> Vec<CategoryRow> {
    records
        .iter()
        .map(|record| {
            let category = record
                .key
                .get(dimension)
                .map_or_else(|| "unknown".to_string(), ToString::to_string);
            let label = labels.display(&category);

            CategoryRow {
                category,
                label,
                count: record.count,
                average_score: record.average_score,
            }
        })
        .collect()
}
