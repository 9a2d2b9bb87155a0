//! Score synthesis and dashboard analytics for leads, properties, and agents.

pub mod aggregates;
pub mod report;
pub mod scoring;

pub use aggregates::{AggregateRecord, CompositeKey, DimensionValue};
pub use report::{AnalyticsSnapshot, DashboardSummary};
pub use scoring::{EntityType, FactorBreakdown, ScoreRecord, Tier};
