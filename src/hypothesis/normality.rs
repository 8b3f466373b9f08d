// Normality checking (precondition for Welch's t-test)

use super::backend::DistributionTests;
use super::error::Result;
use serde::{Deserialize, Serialize};

/// Outcome of a Shapiro-Wilk normality check
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalityResult {
    /// True when normality could not be rejected at the significance level
    pub is_normal: bool,
    /// Shapiro-Wilk p-value
    pub p_value: f64,
}

impl From<NormalityResult> for (bool, f64) {
    fn from(result: NormalityResult) -> Self {
        (result.is_normal, result.p_value)
    }
}

/// Run Shapiro-Wilk on `sample` and compare against `significance_level`
///
/// The sample counts as normal when p >= significance_level, i.e. the null
/// hypothesis of normality is not rejected.
pub(crate) fn check_normal(
    backend: &dyn DistributionTests,
    sample: &[f64],
    significance_level: f64,
) -> Result<NormalityResult> {
    let outcome = backend.shapiro_wilk(sample)?;
    let p_value = super::backend::checked_p_value("Shapiro-Wilk", outcome.p_value)?;

    Ok(NormalityResult {
        is_normal: p_value >= significance_level,
        p_value,
    })
}
