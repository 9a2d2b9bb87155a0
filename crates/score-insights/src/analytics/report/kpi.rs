use crate::analytics::aggregates::{dimensions, find_first, AggregateRecord, CompositeKey};
use crate::analytics::scoring::EntityType;
use fastrand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Changes within this many percent either way classify as flat.
pub const TREND_DEADBAND_PCT: f64 = 2.0;

/// Lead statuses counted as converted.
pub const CONVERTED_STATUSES: [&str; 3] = ["closed", "qualified", "negotiation"];

const BASELINE_FLOOR: f64 = 0.95;
const BASELINE_SPREAD: f64 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Flat => "Flat",
        }
    }
}

/// Percentage change from `previous` to `current`. Zero when there is no
/// previous value to compare against.
pub fn percentage_change(previous: f64, current: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) * 100.0 / previous
}

/// Exactly `±2%` is still flat.
pub fn classify_trend(change_pct: f64) -> Trend {
    if change_pct > TREND_DEADBAND_PCT {
        Trend::Up
    } else if change_pct < -TREND_DEADBAND_PCT {
        Trend::Down
    } else {
        Trend::Flat
    }
}

/// Share of leads in a converted status, as a percentage of all leads.
/// Statuses match regardless of ASCII case.
pub fn conversion_rate(lead_status_counts: &[AggregateRecord]) -> f64 {
    let total: u64 = lead_status_counts.iter().map(|record| record.count).sum();
    if total == 0 {
        return 0.0;
    }

    let converted: u64 = lead_status_counts
        .iter()
        .filter(|record| {
            record
                .key
                .get(dimensions::STATUS)
                .and_then(|status| status.as_text())
                .is_some_and(|status| {
                    CONVERTED_STATUSES
                        .iter()
                        .any(|converted| converted.eq_ignore_ascii_case(status))
                })
        })
        .map(|record| record.count)
        .sum();

    converted as f64 / total as f64 * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KpiMetric {
    AverageScore(EntityType),
    ConversionRate,
}

impl KpiMetric {
    pub fn title(self) -> String {
        match self {
            Self::AverageScore(entity_type) => {
                format!("Average {} Score", entity_type.label())
            }
            Self::ConversionRate => "Lead Conversion Rate".to_string(),
        }
    }

    pub const fn unit(self) -> Option<&'static str> {
        match self {
            Self::AverageScore(_) => None,
            Self::ConversionRate => Some("%"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpi {
    #[serde(skip)]
    pub metric: KpiMetric,
    pub title: String,
    pub value: f64,
    pub previous_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
    pub progress_value: f64,
    pub trend: Trend,
}

impl Kpi {
    pub fn new(metric: KpiMetric, value: f64, previous_value: f64) -> Self {
        Self {
            metric,
            title: metric.title(),
            value,
            previous_value,
            unit: metric.unit(),
            progress_value: value.clamp(0.0, 100.0),
            trend: classify_trend(percentage_change(previous_value, value)),
        }
    }

    pub fn change_pct(&self) -> f64 {
        percentage_change(self.previous_value, self.value)
    }
}

/// Supplies the previous-period value a KPI is compared against.
pub trait BaselineSource {
    fn previous_value(&mut self, metric: KpiMetric, current: f64) -> f64;
}

/// Stand-in baseline for when no history exists: 95 to 98 percent of the
/// current value. It is not a measured trend.
#[derive(Debug, Clone)]
pub struct SyntheticBaseline {
    rng: Rng,
}

impl SyntheticBaseline {
    pub fn new(rng: Rng) -> Self {
        Self { rng }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(Rng::with_seed(seed))
    }
}

impl BaselineSource for SyntheticBaseline {
    fn previous_value(&mut self, _metric: KpiMetric, current: f64) -> f64 {
        current * (BASELINE_FLOOR + self.rng.f64() * BASELINE_SPREAD)
    }
}

/// Measured previous values, with the synthetic baseline covering metrics
/// that have no history yet.
#[derive(Debug, Clone)]
pub struct HistoricalBaseline {
    values: HashMap<KpiMetric, f64>,
    fallback: SyntheticBaseline,
}

impl HistoricalBaseline {
    pub fn new(fallback: SyntheticBaseline) -> Self {
        Self {
            values: HashMap::new(),
            fallback,
        }
    }

    pub fn with(mut self, metric: KpiMetric, value: f64) -> Self {
        self.values.insert(metric, value);
        self
    }
}

impl BaselineSource for HistoricalBaseline {
    fn previous_value(&mut self, metric: KpiMetric, current: f64) -> f64 {
        match self.values.get(&metric) {
            Some(value) => *value,
            None => self.fallback.previous_value(metric, current),
        }
    }
}

/// Derives headline KPIs from aggregate collections.
#[derive(Debug, Clone)]
pub struct KpiDeriver<B> {
    baseline: B,
}

impl<B: BaselineSource> KpiDeriver<B> {
    pub fn new(baseline: B) -> Self {
        Self { baseline }
    }

    /// One average-score KPI per entity type, then the lead conversion rate.
    /// Types with no average report 0.
    pub fn derive(
        &mut self,
        averages_by_type: &[AggregateRecord],
        lead_status_counts: &[AggregateRecord],
    ) -> Vec<Kpi> {
        let mut kpis: Vec<Kpi> = EntityType::ordered()
            .into_iter()
            .map(|entity_type| {
                let probe = CompositeKey::new().with(dimensions::TYPE, entity_type.key());
                let value = find_first(averages_by_type, &probe)
                    .and_then(|record| record.average_score)
                    .unwrap_or(0.0);
                self.kpi(KpiMetric::AverageScore(entity_type), value)
            })
            .collect();

        kpis.push(self.kpi(
            KpiMetric::ConversionRate,
            conversion_rate(lead_status_counts),
        ));

        debug!(kpis = kpis.len(), "derived dashboard kpis");
        kpis
    }

    fn kpi(&mut self, metric: KpiMetric, value: f64) -> Kpi {
        let previous_value = self.baseline.previous_value(metric, value);
        Kpi::new(metric, value, previous_value)
    }
}
