// Error taxonomy for benchmark hypothesis testing
//
// Every error is terminal for the enclosing comparison: nothing here is
// retried, and no partial result is ever returned alongside one.

use thiserror::Error;

/// Errors raised while deciding whether benchmark samples differ
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Statistical test library is unavailable (built without the `builtin-stats` feature)")]
    UnavailableDependency,

    #[error(
        "At least one sample size is smaller than {min}, which is too small for the \
         Mann-Whitney U-test (got {len_1} and {len_2})"
    )]
    SampleTooSmall {
        min: usize,
        len_1: usize,
        len_2: usize,
    },

    #[error(
        "At least one sample is not normally distributed as required by Welch's t-test \
         (Shapiro-Wilk p-values: {p_value_1:.4} and {p_value_2:.4})"
    )]
    NonNormalSample { p_value_1: f64, p_value_2: f64 },

    #[error(
        "Provided benchmark result keys/metrics do not match (only in first: [{}], only in \
         second: [{}]). Check if they have been created by the same benchmark.",
        .only_in_first.join(", "),
        .only_in_second.join(", ")
    )]
    MismatchedMetricSets {
        only_in_first: Vec<String>,
        only_in_second: Vec<String>,
    },

    #[error("Significance level must be inside (0, 1), got {0}")]
    InvalidSignificanceLevel(f64),

    #[error("Unknown statistical test '{0}' (expected one of: mann, kolmogorov, welch)")]
    UnknownTest(String),

    #[error("Cannot run {test}: {reason}")]
    InvalidSample { test: &'static str, reason: String },

    #[error("Statistical test library failed: {0}")]
    Backend(String),

    #[error("Invalid benchmark result format. Make sure input is a Chart-JSON.\n{reason}\nProvided JSON:\n{document}")]
    MalformedDocument { reason: String, document: String },

    #[error("Invalid comparison configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to read input: {0}")]
    Io(String),
}

impl From<std::io::Error> for StatsError {
    fn from(err: std::io::Error) -> Self {
        StatsError::Io(err.to_string())
    }
}

/// Result type for hypothesis testing operations
pub type Result<T> = std::result::Result<T, StatsError>;
