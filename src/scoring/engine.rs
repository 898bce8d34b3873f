use super::config::PriorityWeights;
use crate::catalog::CatalogOption;

/// Upper end of every rating scale.
const RATING_MAX: i64 = 5;

/// Every option is credited this flat cost rating regardless of its data.
const COST_BASELINE: i64 = 3;

/// Score returned when no weighted term contributes to the cap.
pub const NEUTRAL_SCORE: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct TermContribution {
    pub label: &'static str, // e.g. "Performance", "Ease of use", "Cost baseline"
    pub points: i64,         // Weighted points earned
    pub max_points: i64,     // Weighted points available
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub raw: i64,
    pub cap: i64,
    pub terms: Vec<TermContribution>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Normalized score in [0, 5] for one option under one set of weights.
pub fn score(option: &CatalogOption, weights: &PriorityWeights) -> f64 {
    calculate_score(option, weights).score
}

/// Weighted-sum score with the terms that produced it.
///
/// Missing performance or complexity data drops the matching term from both
/// the numerator and the cap. The complexity `maintenance` axis is not part
/// of the formula. Weights are used as given: a configuration whose
/// contributing weights are all zero yields `NEUTRAL_SCORE`.
pub fn calculate_score(option: &CatalogOption, weights: &PriorityWeights) -> ScoreResult {
    let w_performance = i64::from(weights.performance);
    let w_scalability = i64::from(weights.scalability);
    let w_reliability = i64::from(weights.reliability);
    let w_ease = i64::from(weights.ease_of_use);
    let w_cost = i64::from(weights.cost);

    let mut terms = Vec::new();

    if let Some(perf) = option.performance {
        let points = i64::from(perf.speed) * w_performance
            + i64::from(perf.scalability) * w_scalability
            + i64::from(perf.reliability) * w_reliability;
        terms.push(TermContribution {
            label: "Performance",
            points,
            max_points: RATING_MAX * (w_performance + w_scalability + w_reliability),
        });
    }

    // Lower complexity is better, so setup and learning are inverted
    if let Some(comp) = option.complexity {
        let setup = RATING_MAX + 1 - i64::from(comp.setup);
        let learning = RATING_MAX + 1 - i64::from(comp.learning);
        terms.push(TermContribution {
            label: "Ease of use",
            points: setup * w_ease + learning * w_ease,
            max_points: RATING_MAX * w_ease * 2,
        });
    }

    terms.push(TermContribution {
        label: "Cost baseline",
        points: COST_BASELINE * w_cost,
        max_points: RATING_MAX * w_cost,
    });

    let raw: i64 = terms.iter().map(|t| t.points).sum();
    let cap: i64 = terms.iter().map(|t| t.max_points).sum();

    let score = if cap == 0 {
        NEUTRAL_SCORE
    } else {
        raw as f64 / cap as f64 * RATING_MAX as f64
    };

    ScoreResult {
        score,
        breakdown: ScoreBreakdown { raw, cap, terms },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Complexity, Performance};
    use proptest::prelude::*;

    fn sample_option(
        performance: Option<(u8, u8, u8)>,
        complexity: Option<(u8, u8, u8)>,
    ) -> CatalogOption {
        CatalogOption {
            id: "Test".to_string(),
            description: "Test option".to_string(),
            pros: vec![],
            cons: vec![],
            use_cases: vec![],
            performance: performance.map(|(speed, scalability, reliability)| Performance {
                speed,
                scalability,
                reliability,
            }),
            complexity: complexity.map(|(setup, maintenance, learning)| Complexity {
                setup,
                maintenance,
                learning,
            }),
        }
    }

    #[test]
    fn test_postgresql_uniform_weights() {
        let pg = sample_option(Some((4, 4, 5)), Some((3, 3, 3)));
        let result = calculate_score(&pg, &PriorityWeights::uniform(3));
        assert_eq!(result.breakdown.raw, 66);
        assert_eq!(result.breakdown.cap, 90);
        assert!((result.score - 66.0 / 90.0 * 5.0).abs() < 1e-12);
        assert!((result.score - 3.667).abs() < 0.001);
    }

    #[test]
    fn test_mongodb_uniform_weights() {
        let mongo = sample_option(Some((4, 5, 4)), Some((2, 3, 2)));
        let result = calculate_score(&mongo, &PriorityWeights::uniform(3));
        assert_eq!(result.breakdown.raw, 72);
        assert_eq!(result.breakdown.cap, 90);
        assert_eq!(result.score, 4.0);
    }

    #[test]
    fn test_cost_baseline_only() {
        let bare = sample_option(None, None);
        let result = calculate_score(&bare, &PriorityWeights::uniform(4));
        // 3*4 / 5*4 * 5
        assert!((result.score - 3.0).abs() < 1e-12);
        assert_eq!(result.breakdown.terms.len(), 1);
        assert_eq!(result.breakdown.terms[0].label, "Cost baseline");
    }

    #[test]
    fn test_missing_complexity_drops_term_from_cap() {
        let option = sample_option(Some((5, 5, 5)), None);
        let result = calculate_score(&option, &PriorityWeights::uniform(1));
        // (15 + 3) / (15 + 5)
        assert_eq!(result.breakdown.raw, 18);
        assert_eq!(result.breakdown.cap, 20);
        assert!((result.score - 4.5).abs() < 1e-12);
    }

    #[test]
    fn test_missing_performance_drops_term_from_cap() {
        let option = sample_option(None, Some((1, 5, 1)));
        let result = calculate_score(&option, &PriorityWeights::uniform(2));
        // (5*2 + 5*2 + 3*2) / (5*2*2 + 5*2)
        assert_eq!(result.breakdown.raw, 26);
        assert_eq!(result.breakdown.cap, 30);
    }

    #[test]
    fn test_maintenance_is_ignored() {
        let easy = sample_option(Some((3, 3, 3)), Some((2, 1, 2)));
        let hard = sample_option(Some((3, 3, 3)), Some((2, 5, 2)));
        let weights = PriorityWeights::uniform(3);
        assert_eq!(score(&easy, &weights), score(&hard, &weights));
    }

    #[test]
    fn test_zero_weights_yield_neutral_score() {
        let option = sample_option(Some((5, 5, 5)), Some((1, 1, 1)));
        let result = calculate_score(&option, &PriorityWeights::uniform(0));
        assert_eq!(result.breakdown.cap, 0);
        assert_eq!(result.score, NEUTRAL_SCORE);
    }

    #[test]
    fn test_best_possible_option_below_five_due_to_cost_baseline() {
        let best = sample_option(Some((5, 5, 5)), Some((1, 1, 1)));
        let result = calculate_score(&best, &PriorityWeights::uniform(3));
        // (45 + 30 + 9) / (45 + 30 + 15)
        assert_eq!(result.breakdown.raw, 84);
        assert!(result.score < 5.0);
    }

    #[test]
    fn test_breakdown_terms_sum_to_totals() {
        let option = sample_option(Some((4, 3, 2)), Some((5, 4, 3)));
        let weights = PriorityWeights {
            cost: 1,
            performance: 5,
            ease_of_use: 2,
            scalability: 4,
            reliability: 3,
        };
        let result = calculate_score(&option, &weights);
        let labels: Vec<_> = result.breakdown.terms.iter().map(|t| t.label).collect();
        assert_eq!(labels, vec!["Performance", "Ease of use", "Cost baseline"]);
        // 4*5 + 3*4 + 2*3 = 38; (1 + 3)*2 = 8; 3*1 = 3
        assert_eq!(result.breakdown.terms[0].points, 38);
        assert_eq!(result.breakdown.terms[1].points, 8);
        assert_eq!(result.breakdown.raw, 49);
        assert_eq!(result.breakdown.cap, 60 + 20 + 5);
    }

    fn rating() -> impl Strategy<Value = u8> {
        1u8..=5
    }

    fn weights_strategy() -> impl Strategy<Value = PriorityWeights> {
        (rating(), rating(), rating(), rating(), rating()).prop_map(
            |(cost, performance, ease_of_use, scalability, reliability)| PriorityWeights {
                cost,
                performance,
                ease_of_use,
                scalability,
                reliability,
            },
        )
    }

    fn full_option_strategy() -> impl Strategy<Value = CatalogOption> {
        (
            (rating(), rating(), rating()),
            (rating(), rating(), rating()),
        )
            .prop_map(|(perf, comp)| sample_option(Some(perf), Some(comp)))
    }

    proptest! {
        #[test]
        fn prop_score_within_bounds(option in full_option_strategy(), weights in weights_strategy()) {
            let s = score(&option, &weights);
            prop_assert!((0.0..=5.0).contains(&s));
        }

        #[test]
        fn prop_score_is_pure(option in full_option_strategy(), weights in weights_strategy()) {
            prop_assert_eq!(score(&option, &weights), score(&option, &weights));
        }

        #[test]
        fn prop_performance_weight_favors_faster_option(
            slow_speed in 1u8..5,
            gap in 1u8..5,
            rest in (rating(), rating(), rating(), rating()),
            weights in weights_strategy(),
        ) {
            let fast_speed = (slow_speed + gap).min(5);
            prop_assume!(fast_speed > slow_speed);
            let (scalability, reliability, setup, learning) = rest;
            let slow = sample_option(Some((slow_speed, scalability, reliability)), Some((setup, 3, learning)));
            let fast = sample_option(Some((fast_speed, scalability, reliability)), Some((setup, 3, learning)));

            let mut heavier = weights;
            heavier.performance = (weights.performance + 1).min(5);
            prop_assume!(heavier.performance > weights.performance);

            let margin_before = score(&fast, &weights) - score(&slow, &weights);
            let margin_after = score(&fast, &heavier) - score(&slow, &heavier);
            prop_assert!(margin_before > 0.0);
            prop_assert!(margin_after >= margin_before - 1e-12);
        }
    }
}
