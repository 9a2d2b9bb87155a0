//! Constrained factor synthesis.
//!
//! Given a target composite score, builds a factor set whose weights sum to 1
//! and whose weighted values reproduce the target. Weights are quantized to
//! hundredths up front, earlier values are drawn inside the range that keeps
//! the target reachable, and the final value is solved rather than drawn.

use super::domain::{EntityType, Factor, FactorBreakdown};
use super::vocabulary;
use fastrand::Rng;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Weights are allocated in hundredths, each factor receiving at least one.
const WEIGHT_UNITS: u32 = 100;
pub const MAX_FACTORS: usize = WEIGHT_UNITS as usize;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SynthesisError {
    #[error("requested {requested} factors but only {available} distinct names are available")]
    InsufficientVocabulary { requested: usize, available: usize },
    #[error("invalid range: {0}")]
    InvalidRange(String),
}

/// Result of solving the last factor's value exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinalSolve {
    /// Solved value after clamping to `[0, 100]`, before display rounding.
    pub value: f64,
    /// Weighted distance removed by the clamp.
    pub clamp_adjustment: f64,
}

/// Draws factor breakdowns from a fixed vocabulary of distinct names.
#[derive(Debug, Clone)]
pub struct FactorSynthesizer {
    names: Vec<String>,
}

impl FactorSynthesizer {
    /// Builds a synthesizer; repeated names are dropped, keeping first occurrence.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut distinct: Vec<String> = Vec::new();
        for name in names {
            let name = name.into();
            if !distinct.contains(&name) {
                distinct.push(name);
            }
        }
        Self { names: distinct }
    }

    pub fn for_entity(entity_type: EntityType) -> Self {
        Self::new(vocabulary::factor_names(entity_type).iter().copied())
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.names
    }

    pub fn synthesize(
        &self,
        rng: &mut Rng,
        count: usize,
        target_score: f64,
    ) -> Result<FactorBreakdown, SynthesisError> {
        validate_request(count, target_score)?;
        if count > self.names.len() {
            return Err(SynthesisError::InsufficientVocabulary {
                requested: count,
                available: self.names.len(),
            });
        }

        let names = self.pick_names(rng, count);
        let weights = draw_weights(rng, count);
        let last = count - 1;

        let mut factors = Vec::with_capacity(count);
        let mut spent_weight = 0.0;
        let mut spent = 0.0;

        for (name, &weight) in names.iter().zip(&weights).take(last) {
            let (min_value, max_value) = value_bounds(target_score, spent, spent_weight, weight);
            let value = draw_value(rng, min_value, max_value);

            spent += weight * value;
            spent_weight += weight;
            factors.push(Factor {
                name: name.clone(),
                weight,
                value,
            });
        }

        let last_weight = weights[last];
        let solve = solve_final_value(target_score, spent, last_weight);
        factors.push(Factor {
            name: names[last].clone(),
            weight: last_weight,
            value: round_to(solve.value, 1),
        });

        Ok(FactorBreakdown::new(
            factors,
            target_score,
            solve.clamp_adjustment,
        ))
    }

    fn pick_names(&self, rng: &mut Rng, count: usize) -> Vec<String> {
        let mut pool: Vec<&String> = self.names.iter().collect();
        rng.shuffle(&mut pool);
        pool.into_iter().take(count).cloned().collect()
    }
}

fn validate_request(count: usize, target_score: f64) -> Result<(), SynthesisError> {
    if !(1..=MAX_FACTORS).contains(&count) {
        return Err(SynthesisError::InvalidRange(format!(
            "factor count {count} must be between 1 and {MAX_FACTORS}"
        )));
    }

    if !target_score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&target_score) {
        return Err(SynthesisError::InvalidRange(format!(
            "target score {target_score} must lie within [{MIN_SCORE}, {MAX_SCORE}]"
        )));
    }

    Ok(())
}

/// Range of values the next factor may take so the remaining factors can
/// still land the target inside `[0, 100]`.
pub fn value_bounds(target_score: f64, spent: f64, spent_weight: f64, weight: f64) -> (f64, f64) {
    let remaining_weight = (1.0 - spent_weight - weight).max(0.0);
    let outstanding = target_score - spent;
    let min_value = (outstanding - MAX_SCORE * remaining_weight) / weight;
    let max_value = outstanding / weight;

    (
        min_value.clamp(MIN_SCORE, MAX_SCORE),
        max_value.clamp(MIN_SCORE, MAX_SCORE),
    )
}

/// Solves the last value as `(target - spent) / remaining_weight`, clamped.
pub fn solve_final_value(target_score: f64, spent: f64, remaining_weight: f64) -> FinalSolve {
    if remaining_weight <= 0.0 {
        return FinalSolve {
            value: MIN_SCORE,
            clamp_adjustment: (target_score - spent).abs(),
        };
    }

    let exact = (target_score - spent) / remaining_weight;
    let value = exact.clamp(MIN_SCORE, MAX_SCORE);

    FinalSolve {
        value,
        clamp_adjustment: (exact - value).abs() * remaining_weight,
    }
}

/// Uniform draw on the 0.1 grid inside `[min_value, max_value]`. When the
/// range holds no grid point the midpoint is rounded instead.
fn draw_value(rng: &mut Rng, min_value: f64, max_value: f64) -> f64 {
    let low = (min_value * 10.0).ceil();
    let high = (max_value * 10.0).floor();

    if low <= high {
        let step = rng.u32(low as u32..=high as u32);
        f64::from(step) / 10.0
    } else {
        round_to((min_value + max_value) / 2.0, 1)
    }
}

fn draw_weights(rng: &mut Rng, count: usize) -> Vec<f64> {
    let raw: Vec<f64> = (0..count).map(|_| 1.0 - rng.f64()).collect();
    let units = allocate_hundredths(&raw);

    let mut weights: Vec<f64> = units
        .iter()
        .map(|&unit| f64::from(unit) / f64::from(WEIGHT_UNITS))
        .collect();

    let last = count - 1;
    let head: f64 = weights[..last].iter().sum();
    weights[last] = round_to(1.0 - head, 2);
    weights
}

/// Largest-remainder allocation of 100 hundredths proportional to `raw`.
fn allocate_hundredths(raw: &[f64]) -> Vec<u32> {
    let total: f64 = raw.iter().sum();
    let shares: Vec<f64> = raw
        .iter()
        .map(|weight| weight / total * f64::from(WEIGHT_UNITS))
        .collect();

    let mut units: Vec<u32> = shares
        .iter()
        .map(|share| (share.floor() as u32).max(1))
        .collect();
    let mut allocated: u32 = units.iter().sum();

    let mut by_remainder: Vec<usize> = (0..shares.len()).collect();
    by_remainder.sort_by(|&a, &b| {
        shares[b]
            .fract()
            .total_cmp(&shares[a].fract())
            .then(a.cmp(&b))
    });

    let mut cursor = 0;
    while allocated < WEIGHT_UNITS {
        units[by_remainder[cursor % by_remainder.len()]] += 1;
        allocated += 1;
        cursor += 1;
    }

    while allocated > WEIGHT_UNITS {
        let largest = (0..units.len())
            .filter(|&idx| units[idx] > 1)
            .max_by(|&a, &b| units[a].cmp(&units[b]).then(b.cmp(&a)));
        match largest {
            Some(idx) => {
                units[idx] -= 1;
                allocated -= 1;
            }
            None => break,
        }
    }

    units
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead_synthesizer() -> FactorSynthesizer {
        FactorSynthesizer::for_entity(EntityType::Lead)
    }

    #[test]
    fn single_factor_carries_the_whole_target() {
        let mut rng = Rng::with_seed(7);
        let breakdown = lead_synthesizer()
            .synthesize(&mut rng, 1, 72.5)
            .expect("single factor synthesizes");

        assert_eq!(breakdown.len(), 1);
        let factor = &breakdown.factors()[0];
        assert_eq!(factor.weight, 1.0);
        assert_eq!(factor.value, 72.5);
        assert_eq!(breakdown.clamp_adjustment(), 0.0);
    }

    #[test]
    fn extreme_targets_pin_every_value() {
        for (seed, target) in [(1, 0.0), (2, 100.0)] {
            let mut rng = Rng::with_seed(seed);
            let breakdown = lead_synthesizer()
                .synthesize(&mut rng, 6, target)
                .expect("extreme target synthesizes");

            assert!(breakdown
                .factors()
                .iter()
                .all(|factor| factor.value == target));
        }
    }

    #[test]
    fn weights_are_hundredths_summing_to_one() {
        let mut rng = Rng::with_seed(99);
        let breakdown = lead_synthesizer()
            .synthesize(&mut rng, 8, 64.3)
            .expect("breakdown synthesizes");

        assert!((breakdown.weight_sum() - 1.0).abs() < 1e-9);
        for factor in breakdown.factors() {
            assert!(factor.weight >= 0.01 - 1e-9, "weight {} too small", factor.weight);
            assert_eq!(round_to(factor.weight, 2), factor.weight);
        }
    }

    #[test]
    fn serialized_weights_carry_two_decimals() {
        let synthesizer = lead_synthesizer();
        for seed in 0..500u64 {
            let mut rng = Rng::with_seed(seed);
            let breakdown = synthesizer
                .synthesize(&mut rng, 4, 55.0)
                .expect("breakdown synthesizes");

            for factor in breakdown.factors() {
                let json = serde_json::to_value(factor).expect("factor serializes");
                let rendered = json["weight"].to_string();
                let decimals = rendered.split('.').nth(1).map_or(0, str::len);
                assert!(decimals <= 2, "seed {seed} rendered weight {rendered}");
            }
        }
    }

    #[test]
    fn names_are_distinct_and_drawn_from_the_vocabulary() {
        let synthesizer = lead_synthesizer();
        let mut rng = Rng::with_seed(3);
        let breakdown = synthesizer
            .synthesize(&mut rng, 5, 51.0)
            .expect("breakdown synthesizes");

        let names: Vec<&str> = breakdown
            .factors()
            .iter()
            .map(|factor| factor.name.as_str())
            .collect();
        for (idx, name) in names.iter().enumerate() {
            assert!(synthesizer.vocabulary().iter().any(|known| known == name));
            assert!(!names[idx + 1..].contains(name), "duplicate {name}");
        }
    }

    #[test]
    fn realized_score_stays_within_documented_bound() {
        let synthesizer = FactorSynthesizer::for_entity(EntityType::Agent);
        for seed in 0..200u64 {
            let mut rng = Rng::with_seed(seed);
            let count = (seed % 8) as usize + 1;
            let target = (seed * 37 % 1001) as f64 / 10.0;
            let breakdown = synthesizer
                .synthesize(&mut rng, count, target)
                .expect("breakdown synthesizes");

            assert!(
                breakdown.deviation() <= breakdown.deviation_bound() + 1e-9,
                "seed {seed}: deviation {} exceeds bound {}",
                breakdown.deviation(),
                breakdown.deviation_bound()
            );
            assert!(breakdown
                .factors()
                .iter()
                .all(|factor| (MIN_SCORE..=MAX_SCORE).contains(&factor.value)));
        }
    }

    #[test]
    fn same_seed_replays_the_same_breakdown() {
        let synthesizer = FactorSynthesizer::for_entity(EntityType::Property);
        let first = synthesizer
            .synthesize(&mut Rng::with_seed(2024), 4, 81.2)
            .expect("first synthesizes");
        let second = synthesizer
            .synthesize(&mut Rng::with_seed(2024), 4, 81.2)
            .expect("second synthesizes");

        assert_eq!(first, second);
    }

    #[test]
    fn rejects_more_factors_than_names() {
        let synthesizer = FactorSynthesizer::new(["Closing Rate", "Response Time", "Closing Rate"]);
        let mut rng = Rng::with_seed(5);

        let err = synthesizer
            .synthesize(&mut rng, 3, 50.0)
            .expect_err("vocabulary exhausted");
        assert_eq!(
            err,
            SynthesisError::InsufficientVocabulary {
                requested: 3,
                available: 2
            }
        );
    }

    #[test]
    fn invalid_ranges_are_rejected_before_any_draw() {
        let synthesizer = lead_synthesizer();
        let mut rng = Rng::with_seed(11);
        let mut untouched = rng.clone();

        for (count, target) in [(0, 50.0), (4, -0.1), (4, 100.5), (4, f64::NAN)] {
            let err = synthesizer
                .synthesize(&mut rng, count, target)
                .expect_err("invalid request rejected");
            assert!(matches!(err, SynthesisError::InvalidRange(_)));
        }

        assert_eq!(rng.u64(..), untouched.u64(..));
    }

    #[test]
    fn value_bounds_keep_the_remainder_reachable() {
        let (min_value, max_value) = value_bounds(90.0, 0.0, 0.0, 0.5);
        assert!((min_value - 80.0).abs() < 1e-9);
        assert_eq!(max_value, 100.0);

        let (min_value, max_value) = value_bounds(10.0, 0.0, 0.0, 0.5);
        assert_eq!(min_value, 0.0);
        assert!((max_value - 20.0).abs() < 1e-9);
    }

    #[test]
    fn final_solve_reports_clamp_distance() {
        let exact = solve_final_value(70.0, 40.0, 0.5);
        assert!((exact.value - 60.0).abs() < 1e-9);
        assert_eq!(exact.clamp_adjustment, 0.0);

        let clamped = solve_final_value(90.0, 20.0, 0.5);
        assert_eq!(clamped.value, 100.0);
        assert!((clamped.clamp_adjustment - 20.0).abs() < 1e-9);

        let floor = solve_final_value(10.0, 30.0, 0.25);
        assert_eq!(floor.value, 0.0);
        assert!((floor.clamp_adjustment - 20.0).abs() < 1e-9);
    }

    #[test]
    fn hundredths_allocation_respects_minimum_share() {
        let units = allocate_hundredths(&[1.0, 0.0001, 0.0001, 0.0001]);
        assert_eq!(units.iter().sum::<u32>(), 100);
        assert!(units.iter().all(|&unit| unit >= 1));
        assert_eq!(units[0], 97);
    }
}
