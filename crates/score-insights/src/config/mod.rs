pub use crate::analytics::scoring::generator::DEFAULT_FACTOR_COUNT;
use std::env;
use std::fmt;

/// Distinguishes runtime behavior for different stages of the tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub generator: GeneratorConfig,
    pub telemetry: TelemetryConfig,
}

pub const MAX_FACTOR_COUNT: usize = 10;
pub const DEFAULT_SIMULATED_RECORDS: usize = 60;

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let seed = match env::var("SCORE_SEED") {
            Ok(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidSeed)?,
            ),
            _ => None,
        };

        let factor_count = env::var("SCORE_FACTOR_COUNT")
            .unwrap_or_else(|_| DEFAULT_FACTOR_COUNT.to_string())
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|count| (1..=MAX_FACTOR_COUNT).contains(count))
            .ok_or(ConfigError::InvalidFactorCount)?;

        let simulated_records = env::var("SCORE_SIMULATED_RECORDS")
            .unwrap_or_else(|_| DEFAULT_SIMULATED_RECORDS.to_string())
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidRecordCount)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            generator: GeneratorConfig {
                seed,
                factor_count,
                simulated_records,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Settings for synthetic score generation.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub seed: Option<u64>,
    pub factor_count: usize,
    pub simulated_records: usize,
}

impl GeneratorConfig {
    /// Seeded generator when a seed is configured, entropy-seeded otherwise.
    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSeed,
    InvalidFactorCount,
    InvalidRecordCount,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSeed => write!(f, "SCORE_SEED must be a valid u64"),
            ConfigError::InvalidFactorCount => write!(
                f,
                "SCORE_FACTOR_COUNT must be an integer between 1 and {MAX_FACTOR_COUNT}"
            ),
            ConfigError::InvalidRecordCount => {
                write!(f, "SCORE_SIMULATED_RECORDS must be a non-negative integer")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
