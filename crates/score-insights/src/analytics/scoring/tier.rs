use serde::{Deserialize, Serialize};

/// Discrete score bucket. Variants are declared lowest to highest so the
/// derived ordering matches [`Tier::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Error,
    Warning,
    Primary,
    Success,
}

pub const SUCCESS_THRESHOLD: f64 = 80.0;
pub const PRIMARY_THRESHOLD: f64 = 60.0;
pub const WARNING_THRESHOLD: f64 = 40.0;

/// Maps any score to its tier. Lower bounds are inclusive; scores outside
/// `[0, 100]` use the same thresholds and NaN falls through to `Error`.
pub fn classify(score: f64) -> Tier {
    if score >= SUCCESS_THRESHOLD {
        Tier::Success
    } else if score >= PRIMARY_THRESHOLD {
        Tier::Primary
    } else if score >= WARNING_THRESHOLD {
        Tier::Warning
    } else {
        Tier::Error
    }
}

impl Tier {
    pub const fn ordered() -> [Self; 4] {
        [Self::Error, Self::Warning, Self::Primary, Self::Success]
    }

    pub const fn rank(self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Warning => 1,
            Self::Primary => 2,
            Self::Success => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Error => "Needs Attention",
            Self::Warning => "Fair",
            Self::Primary => "Good",
            Self::Success => "Excellent",
        }
    }

    pub const fn color(self) -> &'static str {
        match self {
            Self::Error => "error.main",
            Self::Warning => "warning.main",
            Self::Primary => "primary.main",
            Self::Success => "success.main",
        }
    }

    pub const fn gradient(self) -> &'static str {
        match self {
            Self::Error => "linear-gradient(135deg, #ef5350 0%, #c62828 100%)",
            Self::Warning => "linear-gradient(135deg, #ffb74d 0%, #f57c00 100%)",
            Self::Primary => "linear-gradient(135deg, #42a5f5 0%, #1565c0 100%)",
            Self::Success => "linear-gradient(135deg, #66bb6a 0%, #2e7d32 100%)",
        }
    }
}
