//! Benchdiff - statistical comparison of benchmark results
//!
//! Decides, per metric, whether two sets of benchmark measurements come from
//! significantly different distributions, to separate real performance
//! regressions and improvements from noise.

pub mod chart_json;
pub mod cli;
pub mod config;
pub mod hypothesis;
pub mod report;
