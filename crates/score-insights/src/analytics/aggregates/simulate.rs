use super::keys::{dimensions, CompositeKey, ScoreRange};
use super::{AggregateRecord, AnalyticsSnapshot};
use crate::analytics::scoring::{EntityDetails, EntityType, ScoreRecord};
use chrono::Datelike;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    count: u64,
    total: f64,
}

impl Tally {
    fn add(&mut self, score: f64) {
        self.count += 1;
        self.total += score;
    }

    fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.total / self.count as f64)
    }

    fn into_record(self, key: CompositeKey) -> AggregateRecord {
        AggregateRecord {
            key,
            count: self.count,
            average_score: self.average(),
        }
    }
}

/// Groups synthetic records into the aggregate shapes a grouping backend
/// would return, so reshaping and KPI derivation can run end to end.
///
/// Range counts carry no averages; every other collection carries both.
pub fn summarize_records(records: &[ScoreRecord]) -> AnalyticsSnapshot {
    let mut by_range: BTreeMap<(ScoreRange, EntityType), u64> = BTreeMap::new();
    let mut by_month: BTreeMap<(i32, u32, EntityType), Tally> = BTreeMap::new();
    let mut by_status: BTreeMap<&str, Tally> = BTreeMap::new();
    let mut by_property_type: BTreeMap<&str, Tally> = BTreeMap::new();
    let mut by_type: BTreeMap<EntityType, Tally> = BTreeMap::new();

    for record in records {
        *by_range
            .entry((ScoreRange::for_score(record.score), record.entity_type))
            .or_default() += 1;

        let created = record.created_at.date_naive();
        by_month
            .entry((created.year(), created.month(), record.entity_type))
            .or_default()
            .add(record.score);

        by_type
            .entry(record.entity_type)
            .or_default()
            .add(record.score);

        match &record.details {
            EntityDetails::Lead(lead) => by_status
                .entry(lead.status.as_str())
                .or_default()
                .add(record.score),
            EntityDetails::Property(property) => by_property_type
                .entry(property.property_type.as_str())
                .or_default()
                .add(record.score),
            EntityDetails::Agent(_) => {}
        }
    }

    let range_counts = by_range
        .into_iter()
        .map(|((range, entity_type), count)| {
            AggregateRecord::new(
                CompositeKey::new()
                    .with(dimensions::RANGE, range.label())
                    .with(dimensions::TYPE, entity_type.key()),
                count,
            )
        })
        .collect();

    let monthly_averages = by_month
        .into_iter()
        .map(|((year, month, entity_type), tally)| {
            tally.into_record(
                CompositeKey::new()
                    .with(dimensions::MONTH, month)
                    .with(dimensions::YEAR, year)
                    .with(dimensions::TYPE, entity_type.key()),
            )
        })
        .collect();

    let lead_statuses = by_status
        .into_iter()
        .map(|(status, tally)| tally.into_record(CompositeKey::new().with(dimensions::STATUS, status)))
        .collect();

    let property_types = by_property_type
        .into_iter()
        .map(|(property_type, tally)| {
            tally.into_record(CompositeKey::new().with(dimensions::PROPERTY_TYPE, property_type))
        })
        .collect();

    let averages_by_type = by_type
        .into_iter()
        .map(|(entity_type, tally)| {
            tally.into_record(CompositeKey::new().with(dimensions::TYPE, entity_type.key()))
        })
        .collect();

    let snapshot = AnalyticsSnapshot {
        range_counts,
        monthly_averages,
        lead_statuses,
        property_types,
        averages_by_type,
    };

    debug!(
        records = records.len(),
        range_groups = snapshot.range_counts.len(),
        month_groups = snapshot.monthly_averages.len(),
        "summarized synthetic records into aggregates"
    );

    snapshot
}

#[cfg(test)]
mod tests {
    use super::super::{find_first, DimensionValue};
    use super::*;
    use crate::analytics::scoring::RecordGenerator;
    use chrono::{TimeZone, Utc};
    use fastrand::Rng;

    fn sample_records() -> Vec<ScoreRecord> {
        let now = Utc
            .with_ymd_and_hms(2026, 10, 16, 9, 30, 0)
            .single()
            .expect("valid timestamp");
        let generator = RecordGenerator::new(now);
        let mut rng = Rng::with_seed(314);
        let mut records = Vec::new();
        for entity_type in EntityType::ordered() {
            records.extend(
                generator
                    .generate(&mut rng, entity_type, 30)
                    .expect("records generate"),
            );
        }
        records
    }

    #[test]
    fn counts_add_up_to_the_record_total() {
        let records = sample_records();
        let snapshot = summarize_records(&records);

        let ranged: u64 = snapshot.range_counts.iter().map(|record| record.count).sum();
        let monthly: u64 = snapshot
            .monthly_averages
            .iter()
            .map(|record| record.count)
            .sum();
        let statuses: u64 = snapshot.lead_statuses.iter().map(|record| record.count).sum();

        assert_eq!(ranged, 90);
        assert_eq!(monthly, 90);
        assert_eq!(statuses, 30);
        assert!(snapshot
            .range_counts
            .iter()
            .all(|record| record.average_score.is_none()));
    }

    #[test]
    fn averages_by_type_match_the_records() {
        let records = sample_records();
        let snapshot = summarize_records(&records);

        for entity_type in EntityType::ordered() {
            let scores: Vec<f64> = records
                .iter()
                .filter(|record| record.entity_type == entity_type)
                .map(|record| record.score)
                .collect();
            let expected = scores.iter().sum::<f64>() / scores.len() as f64;

            let probe = CompositeKey::new().with(dimensions::TYPE, entity_type.key());
            let found = find_first(&snapshot.averages_by_type, &probe).expect("type present");
            assert_eq!(found.count, 30);
            let average = found.average_score.expect("average present");
            assert!((average - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn monthly_keys_use_numeric_month_and_year() {
        let snapshot = summarize_records(&sample_records());
        for record in &snapshot.monthly_averages {
            let month = record
                .key
                .get(dimensions::MONTH)
                .and_then(DimensionValue::as_number)
                .expect("numeric month");
            assert!((1..=12).contains(&month));
            assert!(record
                .key
                .get(dimensions::YEAR)
                .and_then(DimensionValue::as_number)
                .is_some());
        }
    }

    #[test]
    fn empty_input_yields_empty_snapshot() {
        assert_eq!(summarize_records(&[]), AnalyticsSnapshot::default());
    }
}
