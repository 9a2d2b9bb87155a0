use chrono::{NaiveDate, TimeZone, Utc};
use fastrand::Rng;
use score_insights::analytics::aggregates::{summarize_records, AggregateImporter};
use score_insights::analytics::report::{
    range_distribution, trend_series, HistoricalBaseline, KpiDeriver, KpiMetric,
    SyntheticBaseline, Trend,
};
use score_insights::analytics::scoring::{EntityType, RecordGenerator};

fn reference() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid reference date")
}

#[test]
fn simulated_records_flow_into_a_dashboard() {
    let now = Utc
        .with_ymd_and_hms(2026, 10, 16, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    let generator = RecordGenerator::new(now);
    let mut rng = Rng::with_seed(2026);

    let mut records = Vec::new();
    for entity_type in EntityType::ordered() {
        records.extend(
            generator
                .generate(&mut rng, entity_type, 40)
                .expect("records generate"),
        );
    }

    let snapshot = summarize_records(&records);
    let mut deriver = KpiDeriver::new(SyntheticBaseline::with_seed(7));
    let summary = snapshot.summary(reference(), &mut deriver);

    let distributed: u64 = summary
        .score_distribution
        .iter()
        .map(|row| row.total())
        .sum();
    assert_eq!(distributed, 120);
    assert_eq!(summary.score_trend.len(), 6);
    assert_eq!(summary.tier_badges.len(), 3);
    assert_eq!(summary.kpis.len(), 4);

    let lead_total: u64 = summary.lead_status.iter().map(|row| row.count).sum();
    assert_eq!(lead_total, 40);
    let property_total: u64 = summary.property_types.iter().map(|row| row.count).sum();
    assert_eq!(property_total, 40);

    for kpi in &summary.kpis {
        assert!((0.0..=100.0).contains(&kpi.progress_value));
        assert_eq!(kpi.trend, Trend::Up, "stand-in baseline sits below {}", kpi.title);
    }

    let json = serde_json::to_value(&summary).expect("summary serializes");
    assert_eq!(json["kpis"][3]["unit"], "%");
    assert_eq!(json["score_distribution"][0]["range"], "0-20");
}

#[test]
fn csv_exports_reshape_into_dense_series() {
    let ranges = "range,type,count\n\
                  61-80,lead,12\n\
                  81-100,agent,4\n\
                  61-80,lead,99\n";
    let records = AggregateImporter::from_csv_reader(ranges.as_bytes()).expect("ranges import");
    let rows = range_distribution(&records);

    assert_eq!(rows.len(), 5);
    assert_eq!(rows[3].lead, 12);
    assert_eq!(rows[4].agent, 4);
    assert_eq!(rows[0].total(), 0);

    let months = "month,year,type,count,averageScore\n\
                  8,2026,property,3,64.25\n\
                  10,2026,lead,6,\n";
    let records = AggregateImporter::from_csv_reader(months.as_bytes()).expect("months import");
    let points = trend_series(&records, reference());

    assert_eq!(points.len(), 6);
    assert_eq!(points[3].month, "Aug");
    assert_eq!(points[3].property, Some(64.25));
    assert_eq!(points[5].lead, None);
}

#[test]
fn snapshot_json_with_history_drives_kpi_trends() {
    let json = r#"{
        "lead_statuses": [
            {"key": {"status": "closed"}, "count": 3},
            {"key": {"status": "qualified"}, "count": 5},
            {"key": {"status": "negotiation"}, "count": 2},
            {"key": {"status": "new"}, "count": 10},
            {"key": {"status": "contacted"}, "count": 8},
            {"key": {"status": "lost"}, "count": 2}
        ],
        "averages_by_type": [
            {"key": {"type": "lead"}, "count": 30, "average_score": 51.0}
        ]
    }"#;
    let snapshot = AggregateImporter::snapshot_from_reader(json.as_bytes()).expect("snapshot loads");

    let baseline = HistoricalBaseline::new(SyntheticBaseline::with_seed(4))
        .with(KpiMetric::AverageScore(EntityType::Lead), 50.0)
        .with(KpiMetric::ConversionRate, 40.0);
    let mut deriver = KpiDeriver::new(baseline);
    let summary = snapshot.summary(reference(), &mut deriver);

    assert_eq!(summary.kpis[0].trend, Trend::Flat);
    assert!((summary.kpis[3].value - 100.0 / 3.0).abs() < 1e-9);
    assert_eq!(summary.kpis[3].trend, Trend::Down);
    assert_eq!(summary.lead_status[2].label, "In Negotiation");
    assert_eq!(summary.tier_badges.len(), 1);
}
