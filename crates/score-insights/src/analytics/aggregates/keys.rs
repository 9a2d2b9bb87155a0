use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Dimension names used by the aggregate shapes the dashboard consumes.
pub mod dimensions {
    pub const RANGE: &str = "range";
    pub const TYPE: &str = "type";
    pub const MONTH: &str = "month";
    pub const YEAR: &str = "year";
    pub const STATUS: &str = "status";
    pub const PROPERTY_TYPE: &str = "propertyType";
}

/// Value of one key dimension. Integers and text never compare equal, so
/// `month: 3` does not match `month: "3"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DimensionValue {
    Number(i64),
    Text(String),
}

impl DimensionValue {
    /// Integers when the raw cell parses as one, text otherwise.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        trimmed
            .parse::<i64>()
            .map(Self::Number)
            .unwrap_or_else(|_| Self::Text(trimmed.to_string()))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            Self::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for DimensionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for DimensionValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for DimensionValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for DimensionValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for DimensionValue {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<u32> for DimensionValue {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

/// Named dimension values identifying one aggregate group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompositeKey(BTreeMap<String, DimensionValue>);

impl CompositeKey {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, dimension: impl Into<String>, value: impl Into<DimensionValue>) -> Self {
        self.0.insert(dimension.into(), value.into());
        self
    }

    pub fn get(&self, dimension: &str) -> Option<&DimensionValue> {
        self.0.get(dimension)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn dimensions(&self) -> impl Iterator<Item = (&str, &DimensionValue)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// True when every dimension named by `probe` is present here with an
    /// equal value. Extra dimensions on `self` are ignored.
    pub fn matches(&self, probe: &CompositeKey) -> bool {
        probe
            .0
            .iter()
            .all(|(name, value)| self.0.get(name) == Some(value))
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, (name, value)) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        f.write_str("}")
    }
}

/// The fixed score buckets used by range distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreRange {
    #[serde(rename = "0-20")]
    UpTo20,
    #[serde(rename = "21-40")]
    UpTo40,
    #[serde(rename = "41-60")]
    UpTo60,
    #[serde(rename = "61-80")]
    UpTo80,
    #[serde(rename = "81-100")]
    UpTo100,
}

impl ScoreRange {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::UpTo20,
            Self::UpTo40,
            Self::UpTo60,
            Self::UpTo80,
            Self::UpTo100,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::UpTo20 => "0-20",
            Self::UpTo40 => "21-40",
            Self::UpTo60 => "41-60",
            Self::UpTo80 => "61-80",
            Self::UpTo100 => "81-100",
        }
    }

    /// Bucket boundaries sit at 21, 41, 61 and 81, so 20.5 lands in `0-20`.
    /// Scores outside `[0, 100]` fall into the nearest end bucket.
    pub fn for_score(score: f64) -> Self {
        if score >= 81.0 {
            Self::UpTo100
        } else if score >= 61.0 {
            Self::UpTo80
        } else if score >= 41.0 {
            Self::UpTo60
        } else if score >= 21.0 {
            Self::UpTo40
        } else {
            Self::UpTo20
        }
    }
}
