// Distribution test library seam
//
// The hypothesis-testing primitives (rank-sum, two-sample KS, Welch's t-test,
// Shapiro-Wilk) sit behind the `DistributionTests` trait so the decision logic
// never depends on one library's conventions. The only convention that varies
// between library versions is the tail of the rank-sum p-value; it is resolved
// into a `TailConvention` capability and normalized in exactly one place.

use super::error::{Result, StatsError};

/// Raw outcome of a primitive statistical test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestOutcome {
    /// Test statistic (U, D, t or W depending on the test)
    pub statistic: f64,
    /// p-value in the library's own convention
    pub p_value: f64,
}

/// Tail convention of a library's rank-sum p-value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailConvention {
    /// p-value covers one tail only and must be converted
    OneSided,
    /// p-value already covers both tails
    TwoSided,
}

impl TailConvention {
    /// Derive the rank-sum convention from a library version string
    ///
    /// Releases before 0.17 reported one-sided rank-sum p-values; every later
    /// release (including all 1.x and above) reports two-sided ones.
    /// Unparseable versions are assumed current.
    pub fn from_library_version(version: &str) -> Self {
        match parse_major_minor(version) {
            Some((0, minor)) if minor < 17 => TailConvention::OneSided,
            _ => TailConvention::TwoSided,
        }
    }

    /// Convert a p-value in this convention to its two-sided equivalent
    ///
    /// One-sided values below 0.5 are doubled; anything else becomes 1.0.
    pub fn to_two_sided(self, p_value: f64) -> f64 {
        match self {
            TailConvention::TwoSided => p_value,
            TailConvention::OneSided => {
                if p_value < 0.5 {
                    p_value * 2.0
                } else {
                    1.0
                }
            }
        }
    }
}

fn parse_major_minor(version: &str) -> Option<(u64, u64)> {
    let mut parts = version.trim().split('.');
    let major = leading_number(parts.next()?)?;
    let minor = parts.next().map_or(Some(0), leading_number)?;
    Some((major, minor))
}

fn leading_number(part: &str) -> Option<u64> {
    let digits: String = part.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Primitive statistical routines consumed by the decision logic
///
/// Implementations are treated as opaque numeric oracles. Each routine
/// returns the statistic and p-value in the library's native convention.
pub trait DistributionTests: Send + Sync {
    /// Library version string
    fn version(&self) -> &str;

    /// Tail convention of `mann_whitney_u` p-values
    fn rank_sum_convention(&self) -> TailConvention {
        TailConvention::from_library_version(self.version())
    }

    /// Mann-Whitney U rank-sum test with continuity correction
    fn mann_whitney_u(&self, sample_1: &[f64], sample_2: &[f64]) -> Result<TestOutcome>;

    /// Two-sample Kolmogorov-Smirnov test (two-sided)
    fn ks_2samp(&self, sample_1: &[f64], sample_2: &[f64]) -> Result<TestOutcome>;

    /// Welch's unequal-variance t-test (two-sided)
    fn welch_ttest(&self, sample_1: &[f64], sample_2: &[f64]) -> Result<TestOutcome>;

    /// Shapiro-Wilk test for normality
    fn shapiro_wilk(&self, sample: &[f64]) -> Result<TestOutcome>;
}

/// Process-wide built-in distribution test library
///
/// Fails with `UnavailableDependency` when the crate was compiled without
/// the `builtin-stats` feature.
#[cfg(feature = "builtin-stats")]
pub fn default_backend() -> Result<&'static dyn DistributionTests> {
    static NATIVE: super::native::NativeTests = super::native::NativeTests;
    Ok(&NATIVE)
}

/// Process-wide built-in distribution test library
///
/// Fails with `UnavailableDependency` when the crate was compiled without
/// the `builtin-stats` feature.
#[cfg(not(feature = "builtin-stats"))]
pub fn default_backend() -> Result<&'static dyn DistributionTests> {
    Err(StatsError::UnavailableDependency)
}

/// Reject p-values a library should never produce
pub(crate) fn checked_p_value(test: &str, p_value: f64) -> Result<f64> {
    if p_value.is_nan() {
        return Err(StatsError::Backend(format!("{} returned a NaN p-value", test)));
    }
    Ok(p_value.clamp(0.0, 1.0))
}
