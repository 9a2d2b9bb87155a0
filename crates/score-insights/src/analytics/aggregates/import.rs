use super::keys::{CompositeKey, DimensionValue};
use super::{duplicate_keys, AggregateRecord, AnalyticsSnapshot};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum AggregateImportError {
    #[error("failed to read aggregate export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid aggregate CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid aggregate JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("aggregate export has no `count` column")]
    MissingCountColumn,
    #[error("row {row}: `{value}` is not a valid count")]
    InvalidCount { row: usize, value: String },
    #[error("row {row}: `{value}` is not a valid average score")]
    InvalidAverage { row: usize, value: String },
}

/// Loads aggregate collections exported by the grouping backend.
///
/// CSV exports need a `count` column and may carry `average_score` (or
/// `averageScore`); every other column becomes a key dimension.
pub struct AggregateImporter;

impl AggregateImporter {
    pub fn from_csv_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<AggregateRecord>, AggregateImportError> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Vec<AggregateRecord>, AggregateImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(normalize_header)
            .collect();
        let columns = ColumnLayout::from_headers(&headers)?;

        let mut records = Vec::new();
        for (idx, row) in csv_reader.records().enumerate() {
            let row = row?;
            records.push(columns.parse_row(&headers, &row, idx + 1)?);
        }

        warn_on_duplicates(&records);
        Ok(records)
    }

    pub fn from_json_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<AggregateRecord>, AggregateImportError> {
        let records: Vec<AggregateRecord> = serde_json::from_reader(reader)?;
        warn_on_duplicates(&records);
        Ok(records)
    }

    pub fn snapshot_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<AnalyticsSnapshot, AggregateImportError> {
        let file = File::open(path)?;
        Self::snapshot_from_reader(file)
    }

    pub fn snapshot_from_reader<R: Read>(
        reader: R,
    ) -> Result<AnalyticsSnapshot, AggregateImportError> {
        let snapshot: AnalyticsSnapshot = serde_json::from_reader(reader)?;
        for collection in [
            &snapshot.range_counts,
            &snapshot.monthly_averages,
            &snapshot.lead_statuses,
            &snapshot.property_types,
            &snapshot.averages_by_type,
        ] {
            warn_on_duplicates(collection);
        }
        Ok(snapshot)
    }
}

struct ColumnLayout {
    count: usize,
    average: Option<usize>,
}

impl ColumnLayout {
    fn from_headers(headers: &[String]) -> Result<Self, AggregateImportError> {
        let position = |names: &[&str]| {
            headers
                .iter()
                .position(|header| names.contains(&header.to_ascii_lowercase().as_str()))
        };

        let count = position(&["count"]).ok_or(AggregateImportError::MissingCountColumn)?;
        let average = position(&["average_score", "averagescore", "avg_score", "average"]);

        Ok(Self { count, average })
    }

    fn parse_row(
        &self,
        headers: &[String],
        row: &csv::StringRecord,
        row_number: usize,
    ) -> Result<AggregateRecord, AggregateImportError> {
        let raw_count = row.get(self.count).unwrap_or_default();
        let count = raw_count
            .parse::<u64>()
            .map_err(|_| AggregateImportError::InvalidCount {
                row: row_number,
                value: raw_count.to_string(),
            })?;

        let average_score = match self.average.and_then(|idx| row.get(idx)) {
            Some(raw) if !raw.is_empty() => Some(
                raw.parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| AggregateImportError::InvalidAverage {
                        row: row_number,
                        value: raw.to_string(),
                    })?,
            ),
            _ => None,
        };

        let mut key = CompositeKey::new();
        for (idx, header) in headers.iter().enumerate() {
            if idx == self.count || Some(idx) == self.average {
                continue;
            }
            match row.get(idx) {
                Some(cell) if !cell.is_empty() => {
                    key = key.with(header.as_str(), DimensionValue::parse(cell));
                }
                _ => {}
            }
        }

        Ok(AggregateRecord {
            key,
            count,
            average_score,
        })
    }
}

fn normalize_header(value: &str) -> String {
    value.replace(['\u{feff}', '\u{200b}'], "").trim().to_string()
}

fn warn_on_duplicates(records: &[AggregateRecord]) {
    let duplicates = duplicate_keys(records);
    if let Some(first) = duplicates.first() {
        warn!(
            duplicates = duplicates.len(),
            first = %first,
            "aggregate export repeats keys; the first occurrence of each key is used"
        );
    }
}
