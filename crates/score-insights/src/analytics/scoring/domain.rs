use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Lead,
    Property,
    Agent,
}

impl EntityType {
    pub const fn ordered() -> [Self; 3] {
        [Self::Lead, Self::Property, Self::Agent]
    }

    /// Dimension value used for this type in aggregate keys.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Lead => "lead",
            Self::Property => "property",
            Self::Agent => "agent",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Lead => "Lead",
            Self::Property => "Property",
            Self::Agent => "Agent",
        }
    }

    pub(crate) const fn id_prefix(self) -> &'static str {
        match self {
            Self::Lead => "LEAD",
            Self::Property => "PROP",
            Self::Agent => "AGT",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity type '{0}' (expected lead, property, or agent)")]
pub struct UnknownEntityType(pub String);

impl FromStr for EntityType {
    type Err = UnknownEntityType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lead" | "leads" => Ok(Self::Lead),
            "property" | "properties" => Ok(Self::Property),
            "agent" | "agents" => Ok(Self::Agent),
            other => Err(UnknownEntityType(other.to_string())),
        }
    }
}

/// Named, weighted sub-score contributing to a composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Factor {
    pub name: String,
    pub weight: f64,
    pub value: f64,
}

/// Ordered factor set whose weights sum to 1 and whose weighted values
/// reproduce `target_score` within [`FactorBreakdown::deviation_bound`].
///
/// There is no mutating API; a breakdown lives and dies with its record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    factors: Vec<Factor>,
    target_score: f64,
    clamp_adjustment: f64,
}

/// Half of the 0.1 display step applied to factor values.
pub(crate) const VALUE_ROUNDING_SLACK: f64 = 0.05;

impl FactorBreakdown {
    pub(crate) fn new(factors: Vec<Factor>, target_score: f64, clamp_adjustment: f64) -> Self {
        Self {
            factors,
            target_score,
            clamp_adjustment,
        }
    }

    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn target_score(&self) -> f64 {
        self.target_score
    }

    /// Weighted distance the final factor was moved to stay inside `[0, 100]`.
    pub fn clamp_adjustment(&self) -> f64 {
        self.clamp_adjustment
    }

    pub fn weight_sum(&self) -> f64 {
        self.factors.iter().map(|factor| factor.weight).sum()
    }

    /// Weighted sum the factors actually produce.
    pub fn realized_score(&self) -> f64 {
        self.factors
            .iter()
            .map(|factor| factor.weight * factor.value)
            .sum()
    }

    pub fn deviation(&self) -> f64 {
        (self.realized_score() - self.target_score).abs()
    }

    /// Upper bound on [`Self::deviation`]: the clamp adjustment plus display
    /// rounding of the solved final value.
    pub fn deviation_bound(&self) -> f64 {
        let last_weight = self.factors.last().map_or(0.0, |factor| factor.weight);
        self.clamp_adjustment + VALUE_ROUNDING_SLACK * last_weight
    }
}

/// Synthetic scored entity with its factor breakdown.
///
/// `score` is the target handed to the synthesizer and is authoritative; the
/// breakdown's realized score may differ by at most its deviation bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: String,
    pub entity_type: EntityType,
    pub score: f64,
    pub factors: FactorBreakdown,
    pub details: EntityDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityDetails {
    Lead(LeadDetails),
    Property(PropertyDetails),
    Agent(AgentDetails),
}

impl EntityDetails {
    pub fn as_lead(&self) -> Option<&LeadDetails> {
        match self {
            EntityDetails::Lead(details) => Some(details),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&PropertyDetails> {
        match self {
            EntityDetails::Property(details) => Some(details),
            _ => None,
        }
    }

    pub fn as_agent(&self) -> Option<&AgentDetails> {
        match self {
            EntityDetails::Agent(details) => Some(details),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadDetails {
    pub name: String,
    pub email: String,
    pub source: String,
    pub status: String,
    pub budget: u32,
    pub preferred_area: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDetails {
    pub address: String,
    pub area: String,
    pub property_type: String,
    pub list_price: u32,
    pub bedrooms: u8,
    pub square_feet: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDetails {
    pub name: String,
    pub email: String,
    pub area: String,
    pub deals_closed: u32,
    pub active_listings: u32,
    pub rating: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_type_parses_singular_and_plural_keys() {
        assert_eq!("lead".parse::<EntityType>(), Ok(EntityType::Lead));
        assert_eq!(" Properties ".parse::<EntityType>(), Ok(EntityType::Property));
        assert_eq!("AGENT".parse::<EntityType>(), Ok(EntityType::Agent));
        assert!("broker".parse::<EntityType>().is_err());
    }

    #[test]
    fn deviation_bound_includes_rounding_of_last_weight() {
        let breakdown = FactorBreakdown::new(
            vec![
                Factor {
                    name: "Closing Rate".to_string(),
                    weight: 0.6,
                    value: 80.0,
                },
                Factor {
                    name: "Response Time".to_string(),
                    weight: 0.4,
                    value: 100.0,
                },
            ],
            88.01,
            0.0,
        );

        assert!((breakdown.realized_score() - 88.0).abs() < 1e-9);
        assert!((breakdown.deviation() - 0.01).abs() < 1e-9);
        assert!((breakdown.deviation_bound() - 0.02).abs() < 1e-9);
        assert!(breakdown.deviation() <= breakdown.deviation_bound());
    }
}
