// Test selector: closed set of supported two-sample comparison methods

use super::error::StatsError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Statistical test used to compare two samples
///
/// Textual names follow the historical option strings (`mann`,
/// `kolmogorov`, `welch`); the descriptive aliases `rank-sum` and
/// `goodness-of-fit` are accepted when parsing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
pub enum TestSelector {
    /// Mann-Whitney U rank-sum test (non-parametric, needs >= 20 samples each)
    #[default]
    #[serde(rename = "mann", alias = "rank-sum")]
    #[value(name = "mann", alias = "rank-sum")]
    RankSum,
    /// Two-sample Kolmogorov-Smirnov goodness-of-fit test
    #[serde(rename = "kolmogorov", alias = "goodness-of-fit")]
    #[value(name = "kolmogorov", alias = "goodness-of-fit")]
    GoodnessOfFit,
    /// Welch's unequal-variance t-test (both samples must be normal)
    #[serde(rename = "welch")]
    #[value(name = "welch")]
    Welch,
}

/// Every supported test, in option order
pub const ALL_TEST_OPTIONS: [TestSelector; 3] = [
    TestSelector::RankSum,
    TestSelector::GoodnessOfFit,
    TestSelector::Welch,
];

impl TestSelector {
    /// Canonical option string
    pub fn as_str(&self) -> &'static str {
        match self {
            TestSelector::RankSum => "mann",
            TestSelector::GoodnessOfFit => "kolmogorov",
            TestSelector::Welch => "welch",
        }
    }

    /// Human-readable test name for reports
    pub fn description(&self) -> &'static str {
        match self {
            TestSelector::RankSum => "Mann-Whitney U rank-sum test",
            TestSelector::GoodnessOfFit => "Kolmogorov-Smirnov two-sample test",
            TestSelector::Welch => "Welch's t-test",
        }
    }
}

impl fmt::Display for TestSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestSelector {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mann" | "rank-sum" | "rank_sum" => Ok(TestSelector::RankSum),
            "kolmogorov" | "goodness-of-fit" | "goodness_of_fit" => Ok(TestSelector::GoodnessOfFit),
            "welch" => Ok(TestSelector::Welch),
            _ => Err(StatsError::UnknownTest(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_rank_sum() {
        assert_eq!(TestSelector::default(), TestSelector::RankSum);
    }

    #[test]
    fn test_parse_option_names_and_aliases() {
        assert_eq!("mann".parse::<TestSelector>().unwrap(), TestSelector::RankSum);
        assert_eq!("Rank-Sum".parse::<TestSelector>().unwrap(), TestSelector::RankSum);
        assert_eq!(
            "kolmogorov".parse::<TestSelector>().unwrap(),
            TestSelector::GoodnessOfFit
        );
        assert_eq!(
            "goodness-of-fit".parse::<TestSelector>().unwrap(),
            TestSelector::GoodnessOfFit
        );
        assert_eq!(" welch ".parse::<TestSelector>().unwrap(), TestSelector::Welch);
    }

    #[test]
    fn test_unknown_selector_rejected() {
        let err = "anderson".parse::<TestSelector>().unwrap_err();
        assert_eq!(err, StatsError::UnknownTest("anderson".to_string()));
    }

    #[test]
    fn test_display_matches_parse() {
        for test in ALL_TEST_OPTIONS {
            assert_eq!(test.to_string().parse::<TestSelector>().unwrap(), test);
        }
    }

    #[test]
    fn test_value_enum_names_match_display() {
        for test in ALL_TEST_OPTIONS {
            let value = test.to_possible_value().unwrap();
            assert_eq!(value.get_name(), test.as_str());
            assert_eq!(
                <TestSelector as ValueEnum>::from_str(value.get_name(), false),
                Ok(test)
            );
        }
        assert_eq!(
            <TestSelector as ValueEnum>::from_str("goodness-of-fit", false),
            Ok(TestSelector::GoodnessOfFit)
        );
    }

    #[test]
    fn test_serde_uses_option_names() {
        let json = serde_json::to_string(&TestSelector::GoodnessOfFit).unwrap();
        assert_eq!(json, "\"kolmogorov\"");
        let parsed: TestSelector = serde_json::from_str("\"rank-sum\"").unwrap();
        assert_eq!(parsed, TestSelector::RankSum);
    }
}
