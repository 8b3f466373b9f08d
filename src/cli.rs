//! CLI argument parsing for benchdiff

use crate::hypothesis::TestSelector;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for comparison reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "benchdiff")]
#[command(version)]
#[command(
    about = "Decide per metric whether two Chart-JSON benchmark results differ significantly",
    long_about = None
)]
pub struct Cli {
    /// Chart-JSON result of the baseline run
    #[arg(value_name = "BASELINE")]
    pub baseline: PathBuf,

    /// Chart-JSON result of the candidate run
    #[arg(value_name = "CANDIDATE")]
    pub candidate: PathBuf,

    /// Statistical test (overrides the config file)
    #[arg(short = 't', long = "test", value_enum)]
    pub test: Option<TestSelector>,

    /// Significance level in (0, 1) (overrides the config file)
    #[arg(short = 'a', long = "significance-level", value_name = "ALPHA")]
    pub significance_level: Option<f64>,

    /// TOML file with `test` and `significance_level`
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Exit with a non-zero status when any metric differs
    #[arg(long = "fail-on-difference")]
    pub fail_on_difference: bool,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
