use super::kpi::Kpi;
use crate::analytics::scoring::{EntityType, Tier};
use serde::Serialize;

/// Count of scored entities per type inside one score range. Absent
/// combinations are zero: no observations were made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeDistributionRow {
    pub range: &'static str,
    pub lead: u64,
    pub property: u64,
    pub agent: u64,
}

impl RangeDistributionRow {
    pub fn count_for(&self, entity_type: EntityType) -> u64 {
        match entity_type {
            EntityType::Lead => self.lead,
            EntityType::Property => self.property,
            EntityType::Agent => self.agent,
        }
    }

    pub fn total(&self) -> u64 {
        self.lead + self.property + self.agent
    }
}

/// Average score per type for one calendar month. `None` means no
/// observations that month and serializes as `null`, never `0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub month: &'static str,
    pub month_number: u32,
    pub year: i32,
    pub lead: Option<f64>,
    pub property: Option<f64>,
    pub agent: Option<f64>,
}

impl TrendPoint {
    pub fn average_for(&self, entity_type: EntityType) -> Option<f64> {
        match entity_type {
            EntityType::Lead => self.lead,
            EntityType::Property => self.property,
            EntityType::Agent => self.agent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub category: String,
    pub label: String,
    pub count: u64,
    pub average_score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierBadge {
    pub entity_type: EntityType,
    pub entity_label: &'static str,
    pub average_score: f64,
    pub tier: Tier,
    pub tier_label: &'static str,
    pub color: &'static str,
    pub gradient: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub score_distribution: Vec<RangeDistributionRow>,
    pub score_trend: Vec<TrendPoint>,
    pub lead_status: Vec<CategoryRow>,
    pub property_types: Vec<CategoryRow>,
    pub kpis: Vec<Kpi>,
    pub tier_badges: Vec<TierBadge>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
}
