use super::kpi::{BaselineSource, Kpi, KpiDeriver, Trend};
use super::labels::CategoryLabels;
use super::reshape::{category_distribution, range_distribution, trend_series};
use super::views::{DashboardSummary, RangeDistributionRow, TierBadge, TrendPoint};
use crate::analytics::aggregates::{dimensions, find_first, AnalyticsSnapshot, CompositeKey};
use crate::analytics::scoring::{classify, EntityType};
use chrono::NaiveDate;
use tracing::info;

impl AnalyticsSnapshot {
    /// Reshapes every collection into its display series and derives the
    /// headline KPIs. `reference` anchors the trailing trend window.
    pub fn summary<B: BaselineSource>(
        &self,
        reference: NaiveDate,
        deriver: &mut KpiDeriver<B>,
    ) -> DashboardSummary {
        let score_distribution = range_distribution(&self.range_counts);
        let score_trend = trend_series(&self.monthly_averages, reference);
        let lead_status = category_distribution(
            &self.lead_statuses,
            dimensions::STATUS,
            &CategoryLabels::lead_status(),
        );
        let property_types = category_distribution(
            &self.property_types,
            dimensions::PROPERTY_TYPE,
            &CategoryLabels::property_type(),
        );
        let kpis = deriver.derive(&self.averages_by_type, &self.lead_statuses);
        let tier_badges = self.tier_badges();
        let highlights = highlights(&score_distribution, &score_trend, &kpis);

        info!(
            %reference,
            kpis = kpis.len(),
            badges = tier_badges.len(),
            "built dashboard summary"
        );

        DashboardSummary {
            score_distribution,
            score_trend,
            lead_status,
            property_types,
            kpis,
            tier_badges,
            highlights,
        }
    }

    /// Badges only for types with a reported average.
    pub fn tier_badges(&self) -> Vec<TierBadge> {
        EntityType::ordered()
            .into_iter()
            .filter_map(|entity_type| {
                let probe = CompositeKey::new().with(dimensions::TYPE, entity_type.key());
                let average_score =
                    find_first(&self.averages_by_type, &probe)?.average_score?;
                let tier = classify(average_score);

                Some(TierBadge {
                    entity_type,
                    entity_label: entity_type.label(),
                    average_score,
                    tier,
                    tier_label: tier.label(),
                    color: tier.color(),
                    gradient: tier.gradient(),
                })
            })
            .collect()
    }
}

fn highlights(
    distribution: &[RangeDistributionRow],
    trend: &[TrendPoint],
    kpis: &[Kpi],
) -> Vec<String> {
    let mut highlights: Vec<String> = kpis
        .iter()
        .filter(|kpi| kpi.trend != Trend::Flat)
        .map(|kpi| {
            format!(
                "{} is {} {:.1}% on the previous period",
                kpi.title,
                if kpi.trend == Trend::Up { "up" } else { "down" },
                kpi.change_pct().abs()
            )
        })
        .collect();

    let busiest = distribution
        .iter()
        .filter(|row| row.total() > 0)
        .max_by_key(|row| row.total());
    if let Some(row) = busiest {
        highlights.push(format!(
            "Most scores fall in the {} range ({} record{})",
            row.range,
            row.total(),
            if row.total() == 1 { "" } else { "s" }
        ));
    }

    let quiet_months: Vec<String> = trend
        .iter()
        .filter(|point| {
            EntityType::ordered()
                .into_iter()
                .all(|entity_type| point.average_for(entity_type).is_none())
        })
        .map(|point| format!("{} {}", point.month, point.year))
        .collect();
    if !quiet_months.is_empty() && quiet_months.len() < trend.len() {
        highlights.push(format!("No scores recorded in {}", quiet_months.join(", ")));
    }

    highlights
}
