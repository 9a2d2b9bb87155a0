mod kpi;
mod labels;
mod reshape;
mod summary;
pub mod views;

pub use crate::analytics::aggregates::AnalyticsSnapshot;
pub use kpi::{
    classify_trend, conversion_rate, percentage_change, BaselineSource, HistoricalBaseline, Kpi,
    KpiDeriver, KpiMetric, SyntheticBaseline, Trend, CONVERTED_STATUSES, TREND_DEADBAND_PCT,
};
pub use labels::CategoryLabels;
pub use reshape::{
    category_distribution, range_distribution, trailing_months, trend_series, TREND_MONTHS,
};
pub use views::DashboardSummary;
