//! Configuration for benchmark comparisons
//!
//! A comparison is fully described by the statistical test and the
//! significance level it is judged at. Both can come from a TOML file and
//! be overridden on the command line.

use crate::hypothesis::{validate_significance_level, StatsError, TestSelector};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for statistical comparison of benchmark results
///
/// # Example
/// ```
/// use benchdiff::config::ComparisonConfig;
///
/// let config = ComparisonConfig::default();
/// assert_eq!(config.significance_level, 0.05); // 95% confidence
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ComparisonConfig {
    /// Statistical test used for every metric
    ///
    /// - `mann` (default): Mann-Whitney U, robust to non-normal data, needs
    ///   at least 20 samples per side
    /// - `kolmogorov`: two-sample Kolmogorov-Smirnov, any sample size
    /// - `welch`: Welch's t-test, both samples must be normally distributed
    pub test: TestSelector,

    /// Statistical significance level (alpha) for hypothesis testing
    ///
    /// - 0.05 (default): 95% confidence level
    /// - 0.01: 99% confidence level, fewer false positives
    /// - 0.10: 90% confidence level, fewer false negatives
    pub significance_level: f64,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            test: TestSelector::RankSum,
            significance_level: crate::hypothesis::DEFAULT_SIGNIFICANCE_LEVEL,
        }
    }
}

impl ComparisonConfig {
    /// Strict configuration (fewer false positives, more false negatives)
    pub fn strict() -> Self {
        Self {
            significance_level: 0.01,
            ..Self::default()
        }
    }

    /// Permissive configuration (more false positives, fewer false negatives)
    pub fn permissive() -> Self {
        Self {
            significance_level: 0.10,
            ..Self::default()
        }
    }

    /// Load a configuration from a TOML file
    ///
    /// Missing keys take their default values.
    pub fn from_toml_file(path: &Path) -> Result<Self, StatsError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| StatsError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, StatsError> {
        let config: Self = toml::from_str(text).map_err(|e| match text_for_unknown_test(&e) {
            Some(name) => StatsError::UnknownTest(name),
            None => StatsError::InvalidConfig(e.message().to_string()),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), StatsError> {
        validate_significance_level(self.significance_level)
    }
}

/// Extract the rejected selector name from a TOML deserialization error
fn text_for_unknown_test(error: &toml::de::Error) -> Option<String> {
    let message = error.message();
    let rest = message.strip_prefix("unknown variant `")?;
    Some(rest.split('`').next()?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ComparisonConfig::default();
        assert_eq!(config.test, TestSelector::RankSum);
        assert_eq!(config.significance_level, 0.05);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_strict_config() {
        let config = ComparisonConfig::strict();
        assert_eq!(config.significance_level, 0.01);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_permissive_config() {
        let config = ComparisonConfig::permissive();
        assert_eq!(config.significance_level, 0.10);
        assert!(config.validate().is_ok());
    }

    #[test]
    #[allow(clippy::field_reassign_with_default)]
    fn test_invalid_significance_level() {
        let mut config = ComparisonConfig::default();
        config.significance_level = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml() {
        let config = ComparisonConfig::from_toml_str(
            r#"
            test = "welch"
            significance_level = 0.01
            "#,
        )
        .unwrap();
        assert_eq!(config.test, TestSelector::Welch);
        assert_eq!(config.significance_level, 0.01);
    }

    #[test]
    fn test_from_toml_partial_uses_defaults() {
        let config = ComparisonConfig::from_toml_str("test = \"goodness-of-fit\"").unwrap();
        assert_eq!(config.test, TestSelector::GoodnessOfFit);
        assert_eq!(config.significance_level, 0.05);
    }

    #[test]
    fn test_from_toml_unknown_test() {
        let err = ComparisonConfig::from_toml_str("test = \"anderson\"").unwrap_err();
        assert_eq!(err, StatsError::UnknownTest("anderson".to_string()));
    }

    #[test]
    fn test_from_toml_out_of_range_level() {
        let err = ComparisonConfig::from_toml_str("significance_level = 0.0").unwrap_err();
        assert_eq!(err, StatsError::InvalidSignificanceLevel(0.0));
    }

    #[test]
    fn test_from_toml_unknown_key() {
        let err = ComparisonConfig::from_toml_str("alpha = 0.05").unwrap_err();
        assert!(matches!(err, StatsError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("benchdiff.toml");
        std::fs::write(&path, "significance_level = 0.1\n").unwrap();
        let config = ComparisonConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.significance_level, 0.1);
    }
}
