//! Property-based tests for benchmark hypothesis testing
//!
//! Core properties covered:
//! 1. Decision rule consistency (is_different == p <= alpha) for every test
//! 2. p-values always lie in [0, 1]
//! 3. Rank-sum refuses samples smaller than 20 for any values
//! 4. One-sided rank-sum libraries normalize to the two-sided result
//! 5. Comparisons return exactly the input metric names
//! 6. The Chart-JSON extractor never panics

use benchdiff::hypothesis::{
    are_benchmark_results_different, are_samples_different, DifferenceDecider,
    DistributionTests, MetricSamples, NativeTests, Result, StatsError, TestOutcome,
    TestSelector, ALL_TEST_OPTIONS,
};
use proptest::prelude::*;

fn sample(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1.0e6f64..1.0e6, min_len..max_len)
}

/// Same numerics as the built-in library, with a legacy one-sided rank-sum tail
struct OneSidedLibrary;

impl DistributionTests for OneSidedLibrary {
    fn version(&self) -> &str {
        "0.16.1"
    }
    fn mann_whitney_u(&self, a: &[f64], b: &[f64]) -> Result<TestOutcome> {
        let outcome = NativeTests.mann_whitney_u(a, b)?;
        Ok(TestOutcome {
            p_value: (outcome.p_value / 2.0).min(0.5),
            ..outcome
        })
    }
    fn ks_2samp(&self, a: &[f64], b: &[f64]) -> Result<TestOutcome> {
        NativeTests.ks_2samp(a, b)
    }
    fn welch_ttest(&self, a: &[f64], b: &[f64]) -> Result<TestOutcome> {
        NativeTests.welch_ttest(a, b)
    }
    fn shapiro_wilk(&self, sample: &[f64]) -> Result<TestOutcome> {
        NativeTests.shapiro_wilk(sample)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_rank_sum_decision_rule(
        a in sample(20, 60),
        b in sample(20, 60),
        alpha in 0.001f64..0.5,
    ) {
        let decision = are_samples_different(&a, &b, TestSelector::RankSum, alpha).unwrap();
        prop_assert!((0.0..=1.0).contains(&decision.p_value));
        prop_assert_eq!(decision.is_different, decision.p_value <= alpha);
    }

    #[test]
    fn prop_goodness_of_fit_decision_rule(
        a in sample(1, 40),
        b in sample(1, 40),
        alpha in 0.001f64..0.5,
    ) {
        let decision = are_samples_different(&a, &b, TestSelector::GoodnessOfFit, alpha).unwrap();
        prop_assert!((0.0..=1.0).contains(&decision.p_value));
        prop_assert_eq!(decision.is_different, decision.p_value <= alpha);
    }

    #[test]
    fn prop_welch_decides_or_rejects_non_normal(
        a in prop::collection::vec(0.0f64..1000.0, 3..40),
        b in prop::collection::vec(0.0f64..1000.0, 3..40),
        alpha in 0.001f64..0.5,
    ) {
        match are_samples_different(&a, &b, TestSelector::Welch, alpha) {
            Ok(decision) => {
                prop_assert!((0.0..=1.0).contains(&decision.p_value));
                prop_assert_eq!(decision.is_different, decision.p_value <= alpha);
            }
            Err(StatsError::NonNormalSample { p_value_1, p_value_2 }) => {
                prop_assert!(p_value_1 < alpha || p_value_2 < alpha);
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn prop_rank_sum_small_samples_always_rejected(
        a in sample(0, 20),
        b in sample(0, 60),
        swap in any::<bool>(),
    ) {
        let (x, y) = if swap { (&b, &a) } else { (&a, &b) };
        let result = are_samples_different(x, y, TestSelector::RankSum, 0.05);
        let is_too_small = matches!(result, Err(StatsError::SampleTooSmall { .. }));
        prop_assert!(is_too_small);
    }

    #[test]
    fn prop_one_sided_normalization_matches_two_sided(
        a in sample(20, 50),
        b in sample(20, 50),
    ) {
        let legacy = DifferenceDecider::new(&OneSidedLibrary);
        let current = DifferenceDecider::new(&NativeTests);
        let normalized = legacy.decide(&a, &b, TestSelector::RankSum, 0.05).unwrap();
        let direct = current.decide(&a, &b, TestSelector::RankSum, 0.05).unwrap();
        prop_assert_eq!(normalized.p_value, direct.p_value);
        prop_assert_eq!(normalized.is_different, direct.is_different);
    }

    #[test]
    fn prop_comparison_keys_match_input(
        names in prop::collection::btree_set("[a-z_]{1,12}", 0..6),
        offset in -50.0f64..50.0,
    ) {
        let baseline: MetricSamples = names
            .iter()
            .map(|n| (n.clone(), (0..25).map(|i| i as f64).collect()))
            .collect();
        let candidate: MetricSamples = names
            .iter()
            .map(|n| (n.clone(), (0..25).map(|i| i as f64 + offset).collect()))
            .collect();

        for test in ALL_TEST_OPTIONS {
            if test == TestSelector::Welch {
                continue; // evenly spaced data is not always accepted as normal
            }
            let decisions = are_benchmark_results_different(&baseline, &candidate, test, 0.05).unwrap();
            let keys: Vec<&String> = decisions.keys().collect();
            let expected: Vec<&String> = names.iter().collect();
            prop_assert_eq!(keys, expected);
        }
    }

    #[test]
    fn prop_chart_json_parser_never_panics(text in ".{0,200}") {
        let _ = benchdiff::chart_json::parse_chart_json_str(&text);
    }

    #[test]
    fn prop_chart_json_roundtrips_values(
        values in prop::collection::vec(-1.0e9f64..1.0e9, 0..30),
    ) {
        let document = serde_json::json!({
            "charts": { "latency": { "summary": { "values": values.clone() } } }
        });
        let parsed = benchdiff::chart_json::parse_chart_json(&document).unwrap();
        prop_assert_eq!(&parsed["latency"], &values);
    }
}
