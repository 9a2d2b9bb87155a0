use chrono::NaiveDate;
use score_insights::analytics::report::DashboardSummary;
use std::io::{self, Write};

fn average_cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |value| format!("{value:.1}"))
}

pub(crate) fn render_dashboard<W: Write>(
    out: &mut W,
    summary: &DashboardSummary,
    source: &str,
    today: NaiveDate,
) -> io::Result<()> {
    writeln!(out, "Score insights dashboard")?;
    writeln!(out, "Data source: {source} (reported {today})")?;

    writeln!(out, "\nKey metrics")?;
    for kpi in &summary.kpis {
        writeln!(
            out,
            "- {}: {:.1}{} (previous {:.1}, {})",
            kpi.title,
            kpi.value,
            kpi.unit.unwrap_or(""),
            kpi.previous_value,
            kpi.trend.label()
        )?;
    }

    if summary.tier_badges.is_empty() {
        writeln!(out, "\nScore tiers: no averages reported")?;
    } else {
        writeln!(out, "\nScore tiers")?;
        for badge in &summary.tier_badges {
            writeln!(
                out,
                "- {}: {:.1} ({})",
                badge.entity_label, badge.average_score, badge.tier_label
            )?;
        }
    }

    writeln!(out, "\nScore distribution (lead / property / agent)")?;
    for row in &summary.score_distribution {
        writeln!(
            out,
            "- {:>6}: {} / {} / {}",
            row.range, row.lead, row.property, row.agent
        )?;
    }

    writeln!(out, "\nAverage score trend (lead / property / agent)")?;
    for point in &summary.score_trend {
        writeln!(
            out,
            "- {} {}: {} / {} / {}",
            point.month,
            point.year,
            average_cell(point.lead),
            average_cell(point.property),
            average_cell(point.agent)
        )?;
    }

    for (title, rows) in [
        ("Lead status", &summary.lead_status),
        ("Property types", &summary.property_types),
    ] {
        if rows.is_empty() {
            writeln!(out, "\n{title}: none")?;
            continue;
        }
        writeln!(out, "\n{title}")?;
        for row in rows {
            writeln!(out, "- {}: {}", row.label, row.count)?;
        }
    }

    if !summary.highlights.is_empty() {
        writeln!(out, "\nHighlights")?;
        for line in &summary.highlights {
            writeln!(out, "- {line}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use score_insights::analytics::report::{AnalyticsSnapshot, KpiDeriver, SyntheticBaseline};

    #[test]
    fn empty_summary_renders_placeholders() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date");
        let mut deriver = KpiDeriver::new(SyntheticBaseline::with_seed(2));
        let summary = AnalyticsSnapshot::default().summary(today, &mut deriver);

        let mut buffer = Vec::new();
        render_dashboard(&mut buffer, &summary, "empty snapshot", today).expect("renders");
        let text = String::from_utf8(buffer).expect("utf8 output");

        assert!(text.contains("Data source: empty snapshot (reported 2026-10-16)"));
        assert!(text.contains("Lead Conversion Rate: 0.0% (previous 0.0, Flat)"));
        assert!(text.contains("Score tiers: no averages reported"));
        assert!(text.contains("- Oct 2026: - / - / -"));
        assert!(text.contains("Lead status: none"));
        assert!(!text.contains("Highlights"));
    }
}
