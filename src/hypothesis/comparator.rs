// Per-metric comparison of two benchmark results
//
// Both result mappings must come from the same benchmark: identical metric
// names, regardless of iteration order. The key sets are checked before any
// test runs, and the first failing metric aborts the whole comparison.

use super::decider::{validate_significance_level, Decision, DifferenceDecider};
use super::error::{Result, StatsError};
use super::selector::TestSelector;
use std::collections::BTreeMap;

/// Benchmark result: metric name → ordered measurement samples
pub type MetricSamples = BTreeMap<String, Vec<f64>>;

/// Per-metric decisions keyed like the input mappings
pub type MetricDecisions = BTreeMap<String, Decision>;

/// Run `test` on every metric present in both result mappings
///
/// # Errors
/// - `MismatchedMetricSets` when the metric names differ (no test is run)
/// - any error the decider raises for a metric, which aborts the comparison
pub fn compare_benchmark_results(
    decider: &DifferenceDecider<'_>,
    result_1: &MetricSamples,
    result_2: &MetricSamples,
    test: TestSelector,
    significance_level: f64,
) -> Result<MetricDecisions> {
    validate_significance_level(significance_level)?;
    ensure_same_metrics(result_1, result_2)?;

    // Equal key sets iterate in the same sorted order
    let mut decisions = MetricDecisions::new();
    for ((metric, sample_1), sample_2) in result_1.iter().zip(result_2.values()) {
        let decision = decider
            .decide(sample_1, sample_2, test, significance_level)
            .inspect_err(|e| tracing::debug!(metric = metric.as_str(), error = %e, "comparison aborted"))?;
        decisions.insert(metric.clone(), decision);
    }

    tracing::debug!(
        metrics = decisions.len(),
        different = decisions.values().filter(|d| d.is_different).count(),
        "benchmark results compared"
    );
    Ok(decisions)
}

fn ensure_same_metrics(result_1: &MetricSamples, result_2: &MetricSamples) -> Result<()> {
    let only_in_first: Vec<String> = result_1
        .keys()
        .filter(|k| !result_2.contains_key(*k))
        .cloned()
        .collect();
    let only_in_second: Vec<String> = result_2
        .keys()
        .filter(|k| !result_1.contains_key(*k))
        .cloned()
        .collect();

    if only_in_first.is_empty() && only_in_second.is_empty() {
        Ok(())
    } else {
        Err(StatsError::MismatchedMetricSets {
            only_in_first,
            only_in_second,
        })
    }
}
