//! Comparison reports for the command line
//!
//! Joins per-metric decisions with descriptive statistics of both sample
//! sets (medians via aprender's `DescriptiveStats`, means via trueno) and
//! renders them as text or JSON.

use crate::config::ComparisonConfig;
use crate::hypothesis::{MetricDecisions, MetricSamples, TestSelector};
use aprender::stats::DescriptiveStats;
use serde::{Deserialize, Serialize};
use trueno::Vector;

/// Comparison outcome for one metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    pub metric: String,
    pub is_different: bool,
    pub p_value: f64,
    pub baseline_samples: usize,
    pub candidate_samples: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_median: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_median: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidate_mean: Option<f64>,
}

impl MetricReport {
    /// Relative change of the median: (candidate - baseline) / baseline
    pub fn relative_median_change(&self) -> Option<f64> {
        let baseline = self.baseline_median?;
        let candidate = self.candidate_median?;
        if baseline.abs() < f64::EPSILON {
            return None;
        }
        Some((candidate - baseline) / baseline)
    }
}

/// Full comparison report across all metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub test: TestSelector,
    pub significance_level: f64,
    pub metrics: Vec<MetricReport>,
}

impl ComparisonReport {
    /// Assemble a report from the inputs and decisions of one comparison
    pub fn new(
        config: &ComparisonConfig,
        baseline: &MetricSamples,
        candidate: &MetricSamples,
        decisions: &MetricDecisions,
    ) -> Self {
        let metrics = decisions
            .iter()
            .map(|(metric, decision)| {
                let baseline_values = baseline.get(metric).map(Vec::as_slice).unwrap_or(&[]);
                let candidate_values = candidate.get(metric).map(Vec::as_slice).unwrap_or(&[]);
                MetricReport {
                    metric: metric.clone(),
                    is_different: decision.is_different,
                    p_value: decision.p_value,
                    baseline_samples: baseline_values.len(),
                    candidate_samples: candidate_values.len(),
                    baseline_median: median(baseline_values),
                    candidate_median: median(candidate_values),
                    baseline_mean: mean(baseline_values),
                    candidate_mean: mean(candidate_values),
                }
            })
            .collect();

        Self {
            test: config.test,
            significance_level: config.significance_level,
            metrics,
        }
    }

    /// Names of metrics whose samples differ significantly
    pub fn different_metrics(&self) -> Vec<&str> {
        self.metrics
            .iter()
            .filter(|m| m.is_different)
            .map(|m| m.metric.as_str())
            .collect()
    }

    /// True when at least one metric differs
    pub fn any_different(&self) -> bool {
        self.metrics.iter().any(|m| m.is_different)
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();
        let different = self.different_metrics();

        if different.is_empty() {
            report.push_str("✅ NO SIGNIFICANT DIFFERENCE\n\n");
        } else {
            report.push_str(&format!(
                "❌ SIGNIFICANT DIFFERENCE ({} of {} metrics)\n\n",
                different.len(),
                self.metrics.len()
            ));
            report.push_str(&format!("Different metrics: {}\n", different.join(", ")));
        }

        report.push_str(&format!("Test: {} ({})\n", self.test.description(), self.test));
        report.push_str(&format!(
            "Significance level: {} ({}% confidence)\n",
            self.significance_level,
            (1.0 - self.significance_level) * 100.0
        ));

        if !self.metrics.is_empty() {
            report.push_str("\n📊 Metrics:\n");
            // Differing metrics first, each group in name order
            let ordered = self
                .metrics
                .iter()
                .filter(|m| m.is_different)
                .chain(self.metrics.iter().filter(|m| !m.is_different));
            for m in ordered {
                let marker = if m.is_different { "≠" } else { "=" };
                report.push_str(&format!(
                    "  {} {} (p={:.4}, n={}/{}",
                    marker, m.metric, m.p_value, m.baseline_samples, m.candidate_samples
                ));
                if let (Some(b), Some(c)) = (m.baseline_median, m.candidate_median) {
                    report.push_str(&format!(", baseline_median={:.1}, candidate_median={:.1}", b, c));
                }
                if let Some(change) = m.relative_median_change() {
                    report.push_str(&format!(", change={:+.1}%", change * 100.0));
                }
                report.push_str(")\n");
            }
        }

        report
    }

    /// Serialize the report as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Offsets from the sample minimum, narrowed for the SIMD kernels
///
/// The anchor stays in f64, so only the spread is rounded to f32; absolute
/// magnitude (e.g. nanosecond timestamps) costs no precision.
fn offsets(samples: &[f64]) -> Option<(f64, Vec<f32>)> {
    let anchor = samples.iter().copied().reduce(f64::min)?;
    Some((anchor, samples.iter().map(|&v| (v - anchor) as f32).collect()))
}

/// Median using aprender's quantile (R-7 method)
fn median(samples: &[f64]) -> Option<f64> {
    let (anchor, values) = offsets(samples)?;
    let vector = Vector::from_slice(&values);
    DescriptiveStats::new(&vector)
        .quantile(0.5)
        .ok()
        .map(|q| anchor + f64::from(q))
}

/// Mean using trueno's SIMD reduction
fn mean(samples: &[f64]) -> Option<f64> {
    let (anchor, values) = offsets(samples)?;
    Vector::from_slice(&values)
        .mean()
        .ok()
        .map(|m| anchor + f64::from(m))
}
