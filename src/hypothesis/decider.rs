// Difference decision for a pair of samples
//
// The null hypothesis for every test is that the two populations the samples
// are drawn from are not significantly different. All tests are two-tailed:
// the pair is declared different iff p <= significance_level.

use super::backend::{checked_p_value, DistributionTests, TailConvention};
use super::error::{Result, StatsError};
use super::normality::{check_normal, NormalityResult};
use super::selector::TestSelector;
use serde::{Deserialize, Serialize};

/// Minimum observations per sample for the Mann-Whitney U-test
pub const RANK_SUM_MIN_SAMPLE_SIZE: usize = 20;

/// Outcome of comparing two samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// True when the null hypothesis was rejected
    pub is_different: bool,
    /// Two-sided p-value produced by the selected test
    pub p_value: f64,
}

impl Decision {
    /// Apply the decision rule `p <= significance_level`
    pub fn from_p_value(p_value: f64, significance_level: f64) -> Self {
        Self {
            is_different: p_value <= significance_level,
            p_value,
        }
    }
}

impl From<Decision> for (bool, f64) {
    fn from(decision: Decision) -> Self {
        (decision.is_different, decision.p_value)
    }
}

/// Reject significance levels outside the open interval (0, 1)
pub fn validate_significance_level(significance_level: f64) -> Result<()> {
    if significance_level.is_finite() && significance_level > 0.0 && significance_level < 1.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidSignificanceLevel(significance_level))
    }
}

/// Decides whether two samples differ using a distribution test library
///
/// The library's rank-sum tail convention is resolved once at construction,
/// so every decision reports a two-sided p-value regardless of which
/// library version sits behind the trait.
#[derive(Clone, Copy)]
pub struct DifferenceDecider<'a> {
    backend: &'a dyn DistributionTests,
    rank_sum_convention: TailConvention,
}

impl std::fmt::Debug for DifferenceDecider<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DifferenceDecider")
            .field("library_version", &self.backend.version())
            .field("rank_sum_convention", &self.rank_sum_convention)
            .finish()
    }
}

impl<'a> DifferenceDecider<'a> {
    /// Create a decider over `backend`, detecting its tail convention
    pub fn new(backend: &'a dyn DistributionTests) -> Self {
        let rank_sum_convention = backend.rank_sum_convention();
        if rank_sum_convention == TailConvention::OneSided {
            tracing::warn!(
                version = backend.version(),
                "statistics library reports one-sided rank-sum p-values; normalizing to two-sided"
            );
        }
        Self {
            backend,
            rank_sum_convention,
        }
    }

    /// Underlying distribution test library
    pub fn backend(&self) -> &'a dyn DistributionTests {
        self.backend
    }

    /// Rank-sum tail convention detected for the library
    pub fn rank_sum_convention(&self) -> TailConvention {
        self.rank_sum_convention
    }

    /// Shapiro-Wilk normality check at `significance_level`
    pub fn check_normal(&self, sample: &[f64], significance_level: f64) -> Result<NormalityResult> {
        validate_significance_level(significance_level)?;
        check_normal(self.backend, sample, significance_level)
    }

    /// Run `test` on the sample pair and apply the decision rule
    ///
    /// # Errors
    /// - `SampleTooSmall` if either sample has fewer than 20 observations
    ///   for the rank-sum test (the test is not run)
    /// - `NonNormalSample` if either sample fails Shapiro-Wilk for Welch's test
    /// - `InvalidSignificanceLevel` if the level is outside (0, 1)
    pub fn decide(
        &self,
        sample_1: &[f64],
        sample_2: &[f64],
        test: TestSelector,
        significance_level: f64,
    ) -> Result<Decision> {
        validate_significance_level(significance_level)?;

        let p_value = match test {
            TestSelector::RankSum => self.rank_sum_p_value(sample_1, sample_2)?,
            TestSelector::GoodnessOfFit => {
                let outcome = self.backend.ks_2samp(sample_1, sample_2)?;
                checked_p_value("Kolmogorov-Smirnov", outcome.p_value)?
            }
            TestSelector::Welch => {
                let normal_1 = check_normal(self.backend, sample_1, significance_level)?;
                let normal_2 = check_normal(self.backend, sample_2, significance_level)?;
                if !(normal_1.is_normal && normal_2.is_normal) {
                    return Err(StatsError::NonNormalSample {
                        p_value_1: normal_1.p_value,
                        p_value_2: normal_2.p_value,
                    });
                }
                let outcome = self.backend.welch_ttest(sample_1, sample_2)?;
                checked_p_value("Welch's t-test", outcome.p_value)?
            }
        };

        let decision = Decision::from_p_value(p_value, significance_level);
        tracing::debug!(
            test = test.as_str(),
            p_value = decision.p_value,
            is_different = decision.is_different,
            "decided"
        );
        Ok(decision)
    }

    fn rank_sum_p_value(&self, sample_1: &[f64], sample_2: &[f64]) -> Result<f64> {
        if sample_1.len() < RANK_SUM_MIN_SAMPLE_SIZE || sample_2.len() < RANK_SUM_MIN_SAMPLE_SIZE {
            return Err(StatsError::SampleTooSmall {
                min: RANK_SUM_MIN_SAMPLE_SIZE,
                len_1: sample_1.len(),
                len_2: sample_2.len(),
            });
        }

        let outcome = self.backend.mann_whitney_u(sample_1, sample_2)?;
        let raw = checked_p_value("Mann-Whitney U", outcome.p_value)?;
        Ok(self.rank_sum_convention.to_two_sided(raw))
    }
}
