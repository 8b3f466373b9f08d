// Statistical hypothesis testing for comparing benchmark results
//
// Decides, per metric, whether two sets of benchmark samples come from
// significantly different distributions. Three two-tailed tests are
// supported:
//
// - Mann-Whitney U (rank-sum): non-parametric, needs >= 20 samples each
// - Kolmogorov-Smirnov (goodness-of-fit): no size precondition
// - Welch's t-test: both samples must pass a Shapiro-Wilk normality check
//
// The primitive tests live behind `DistributionTests`; `DifferenceDecider`
// normalizes their conventions so callers always see two-sided p-values.

mod backend;
mod comparator;
mod decider;
#[cfg(feature = "builtin-stats")]
pub mod distributions;
mod error;
#[cfg(feature = "builtin-stats")]
mod native;
mod normality;
mod selector;

pub use backend::{default_backend, DistributionTests, TailConvention, TestOutcome};
pub use comparator::{compare_benchmark_results, MetricDecisions, MetricSamples};
pub use decider::{
    validate_significance_level, Decision, DifferenceDecider, RANK_SUM_MIN_SAMPLE_SIZE,
};
pub use error::{Result, StatsError};
#[cfg(feature = "builtin-stats")]
pub use native::{
    NativeTests, KS_EXACT_MAX_PRODUCT, SHAPIRO_MAX_SAMPLE_SIZE, SHAPIRO_MIN_SAMPLE_SIZE,
};
pub use normality::NormalityResult;
pub use selector::{TestSelector, ALL_TEST_OPTIONS};

use std::sync::OnceLock;

/// Conventional significance level (95% confidence)
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Decider over the process-wide built-in library, created on first use
///
/// # Errors
/// `UnavailableDependency` when no built-in library was compiled in.
pub fn default_decider() -> Result<&'static DifferenceDecider<'static>> {
    static DECIDER: OnceLock<DifferenceDecider<'static>> = OnceLock::new();
    let backend = default_backend()?;
    Ok(DECIDER.get_or_init(|| DifferenceDecider::new(backend)))
}

/// Shapiro-Wilk normality check for a single sample
///
/// Normality is a requirement for Welch's t-test.
///
/// # Example
/// ```
/// use benchdiff::hypothesis::is_normally_distributed;
///
/// let sample = [9.8, 10.1, 10.0, 9.9, 10.2, 10.0, 9.7, 10.3];
/// let result = is_normally_distributed(&sample, 0.05).unwrap();
/// assert!(result.is_normal);
/// ```
pub fn is_normally_distributed(sample: &[f64], significance_level: f64) -> Result<NormalityResult> {
    default_decider()?.check_normal(sample, significance_level)
}

/// Run `test` on two samples and decide whether they differ
///
/// # Example
/// ```
/// use benchdiff::hypothesis::{are_samples_different, TestSelector};
///
/// let before = vec![1.0; 25];
/// let after = vec![100.0; 25];
/// let decision = are_samples_different(&before, &after, TestSelector::RankSum, 0.05).unwrap();
/// assert!(decision.is_different);
/// ```
pub fn are_samples_different(
    sample_1: &[f64],
    sample_2: &[f64],
    test: TestSelector,
    significance_level: f64,
) -> Result<Decision> {
    default_decider()?.decide(sample_1, sample_2, test, significance_level)
}

/// Run `test` on every metric of two benchmark results
///
/// # Example
/// ```
/// use benchdiff::hypothesis::{are_benchmark_results_different, MetricSamples, TestSelector};
///
/// let mut before = MetricSamples::new();
/// before.insert("latency".to_string(), vec![10.0; 25]);
/// let after = before.clone();
///
/// let decisions =
///     are_benchmark_results_different(&before, &after, TestSelector::RankSum, 0.05).unwrap();
/// assert!(!decisions["latency"].is_different);
/// ```
pub fn are_benchmark_results_different(
    result_1: &MetricSamples,
    result_2: &MetricSamples,
    test: TestSelector,
    significance_level: f64,
) -> Result<MetricDecisions> {
    compare_benchmark_results(
        default_decider()?,
        result_1,
        result_2,
        test,
        significance_level,
    )
}
