use chrono::{TimeZone, Utc};
use fastrand::Rng;
use proptest::prelude::*;
use score_insights::analytics::scoring::{
    classify, EntityType, FactorSynthesizer, RecordGenerator, Tier,
};

fn arb_entity() -> impl Strategy<Value = EntityType> {
    prop_oneof![
        Just(EntityType::Lead),
        Just(EntityType::Property),
        Just(EntityType::Agent),
    ]
}

proptest! {
    #[test]
    fn breakdowns_hold_their_invariants(
        seed in any::<u64>(),
        count in 1usize..=8,
        target in 0.0f64..=100.0,
        entity in arb_entity(),
    ) {
        let mut rng = Rng::with_seed(seed);
        let breakdown = FactorSynthesizer::for_entity(entity)
            .synthesize(&mut rng, count, target)
            .expect("valid request synthesizes");

        prop_assert_eq!(breakdown.len(), count);
        prop_assert!((breakdown.weight_sum() - 1.0).abs() < 1e-6);
        for factor in breakdown.factors() {
            prop_assert!(factor.weight > 0.0);
            prop_assert_eq!((factor.weight * 100.0).round() / 100.0, factor.weight);
            prop_assert!((0.0..=100.0).contains(&factor.value));
        }
        prop_assert!(breakdown.deviation() <= breakdown.deviation_bound() + 1e-9);

        let mut names: Vec<&str> = breakdown
            .factors()
            .iter()
            .map(|factor| factor.name.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        prop_assert_eq!(names.len(), count);
    }

    #[test]
    fn same_seed_replays_the_same_breakdown(seed in any::<u64>(), target in 0.0f64..=100.0) {
        let synthesizer = FactorSynthesizer::for_entity(EntityType::Agent);
        let first = synthesizer
            .synthesize(&mut Rng::with_seed(seed), 4, target)
            .expect("synthesizes");
        let second = synthesizer
            .synthesize(&mut Rng::with_seed(seed), 4, target)
            .expect("synthesizes");
        prop_assert_eq!(first, second);
    }

    #[test]
    fn tiers_never_rank_lower_for_higher_scores(a in 0.0f64..=100.0, b in 0.0f64..=100.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(classify(low) <= classify(high));
    }

    #[test]
    fn generated_scores_are_the_synthesis_targets(seed in any::<u64>(), entity in arb_entity()) {
        let now = Utc
            .with_ymd_and_hms(2026, 10, 16, 12, 0, 0)
            .single()
            .expect("valid timestamp");
        let records = RecordGenerator::new(now)
            .generate(&mut Rng::with_seed(seed), entity, 5)
            .expect("records generate");

        for record in &records {
            prop_assert_eq!(record.entity_type, entity);
            prop_assert_eq!(record.factors.target_score(), record.score);
            prop_assert_eq!(record.factors.len(), 4);
            prop_assert!(record.created_at <= record.updated_at);
            prop_assert!(record.updated_at <= now);
        }
    }
}

#[test]
fn impossible_requests_are_rejected() {
    let synthesizer = FactorSynthesizer::for_entity(EntityType::Lead);
    let mut rng = Rng::with_seed(1);

    assert!(synthesizer.synthesize(&mut rng, 0, 50.0).is_err());
    assert!(synthesizer.synthesize(&mut rng, 4, 100.5).is_err());
    assert!(synthesizer.synthesize(&mut rng, 4, f64::NAN).is_err());
    assert!(synthesizer.synthesize(&mut rng, 11, 50.0).is_err());
    assert_eq!(classify(f64::NAN), Tier::Error);
}
