use anyhow::{Context, Result};
use benchdiff::chart_json::load_chart_json;
use benchdiff::cli::{Cli, OutputFormat};
use benchdiff::config::ComparisonConfig;
use benchdiff::hypothesis::are_benchmark_results_different;
use benchdiff::report::ComparisonReport;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Resolve the comparison config: file first, then command-line overrides
fn resolve_config(args: &Cli) -> Result<ComparisonConfig> {
    let mut config = match &args.config {
        Some(path) => ComparisonConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ComparisonConfig::default(),
    };

    if let Some(test) = args.test {
        config.test = test;
    }
    if let Some(level) = args.significance_level {
        config.significance_level = level;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    let config = resolve_config(&args)?;
    tracing::debug!(test = %config.test, alpha = config.significance_level, "comparison config");

    let baseline = load_chart_json(&args.baseline)
        .with_context(|| format!("Failed to load baseline {}", args.baseline.display()))?;
    let candidate = load_chart_json(&args.candidate)
        .with_context(|| format!("Failed to load candidate {}", args.candidate.display()))?;

    let decisions = are_benchmark_results_different(
        &baseline,
        &candidate,
        config.test,
        config.significance_level,
    )?;
    let report = ComparisonReport::new(&config, &baseline, &candidate, &decisions);

    match args.format {
        OutputFormat::Text => print!("{}", report.to_report_string()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    if args.fail_on_difference && report.any_different() {
        anyhow::bail!(
            "Significant difference in {} metric(s): {}",
            report.different_metrics().len(),
            report.different_metrics().join(", ")
        );
    }

    Ok(())
}
