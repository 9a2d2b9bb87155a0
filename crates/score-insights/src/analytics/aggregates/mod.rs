//! Aggregate records as supplied by an upstream grouping backend.
//!
//! Records are keyed by composite dimension values. Keys are expected to be
//! unique within a collection; when they are not, lookups resolve to the
//! first matching record in input order.

mod import;
mod keys;
mod simulate;

pub use import::{AggregateImportError, AggregateImporter};
pub use keys::{dimensions, CompositeKey, DimensionValue, ScoreRange};
pub use simulate::summarize_records;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRecord {
    #[serde(alias = "_id")]
    pub key: CompositeKey,
    pub count: u64,
    #[serde(default, alias = "averageScore")]
    pub average_score: Option<f64>,
}

impl AggregateRecord {
    pub fn new(key: CompositeKey, count: u64) -> Self {
        Self {
            key,
            count,
            average_score: None,
        }
    }

    pub fn with_average(mut self, average_score: f64) -> Self {
        self.average_score = Some(average_score);
        self
    }
}

/// Aggregate collections backing one dashboard refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    /// Keyed by `{range, type}`.
    #[serde(default)]
    pub range_counts: Vec<AggregateRecord>,
    /// Keyed by `{month, year, type}`.
    #[serde(default)]
    pub monthly_averages: Vec<AggregateRecord>,
    /// Keyed by `{status}`.
    #[serde(default)]
    pub lead_statuses: Vec<AggregateRecord>,
    /// Keyed by `{propertyType}`.
    #[serde(default)]
    pub property_types: Vec<AggregateRecord>,
    /// Keyed by `{type}`.
    #[serde(default)]
    pub averages_by_type: Vec<AggregateRecord>,
}

/// First record whose key matches every dimension of `probe`.
pub fn find_first<'a>(
    records: &'a [AggregateRecord],
    probe: &CompositeKey,
) -> Option<&'a AggregateRecord> {
    records.iter().find(|record| record.key.matches(probe))
}

/// Keys occurring more than once, in order of first repetition.
pub fn duplicate_keys(records: &[AggregateRecord]) -> Vec<CompositeKey> {
    let mut seen: HashSet<&CompositeKey> = HashSet::new();
    let mut reported: HashSet<&CompositeKey> = HashSet::new();
    let mut duplicates = Vec::new();

    for record in records {
        if !seen.insert(&record.key) && reported.insert(&record.key) {
            duplicates.push(record.key.clone());
        }
    }

    duplicates
}
