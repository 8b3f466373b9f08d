//! Chart-JSON benchmark result extraction
//!
//! Converts a raw benchmark report in Chart-JSON format into a
//! `{metric name: samples}` mapping. The expected document shape is:
//!
//! ```json
//! {
//!   "charts": {
//!     "first_main_frame_load_time": {
//!       "summary": { "type": "list_of_scalar_values", "values": [650, 700, 690] }
//!     }
//!   }
//! }
//! ```

use crate::hypothesis::{MetricSamples, Result, StatsError};
use serde_json::Value;
use std::path::Path;

/// Build the metric → samples mapping from a parsed Chart-JSON document
///
/// # Errors
/// `MalformedDocument` when the top-level `charts` object is missing, or a
/// chart lacks a numeric `summary.values` list. The message carries the
/// offending document.
pub fn parse_chart_json(document: &Value) -> Result<MetricSamples> {
    let charts = document
        .get("charts")
        .and_then(Value::as_object)
        .ok_or_else(|| malformed("missing top-level \"charts\" object", document))?;

    let mut samples = MetricSamples::new();
    for (name, chart) in charts {
        let values = chart
            .get("summary")
            .and_then(|summary| summary.get("values"))
            .and_then(Value::as_array)
            .ok_or_else(|| {
                malformed(
                    &format!("chart \"{}\" has no \"summary.values\" list", name),
                    document,
                )
            })?;

        let numbers = values
            .iter()
            .map(Value::as_f64)
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(|| {
                malformed(
                    &format!("chart \"{}\" has non-numeric values", name),
                    document,
                )
            })?;

        samples.insert(name.clone(), numbers);
    }

    tracing::debug!(metrics = samples.len(), "parsed Chart-JSON");
    Ok(samples)
}

/// Parse Chart-JSON text
pub fn parse_chart_json_str(text: &str) -> Result<MetricSamples> {
    let document: Value = serde_json::from_str(text).map_err(|e| StatsError::MalformedDocument {
        reason: format!("not valid JSON: {}", e),
        document: text.to_string(),
    })?;
    parse_chart_json(&document)
}

/// Read and parse a Chart-JSON file
pub fn load_chart_json(path: &Path) -> Result<MetricSamples> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| StatsError::Io(format!("{}: {}", path.display(), e)))?;
    parse_chart_json_str(&text)
}

fn malformed(reason: &str, document: &Value) -> StatsError {
    StatsError::MalformedDocument {
        reason: reason.to_string(),
        document: serde_json::to_string_pretty(document).unwrap_or_else(|_| document.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_valid_chart_json() {
        let document = json!({
            "format_version": "0.1",
            "charts": {
                "first_main_frame_load_time": {
                    "summary": { "type": "list_of_scalar_values", "values": [650, 700, 690.5] }
                },
                "timeToFirstPaint": {
                    "summary": { "values": [] }
                }
            }
        });

        let samples = parse_chart_json(&document).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(
            samples["first_main_frame_load_time"],
            vec![650.0, 700.0, 690.5]
        );
        assert!(samples["timeToFirstPaint"].is_empty());
    }

    #[test]
    fn test_missing_charts_is_descriptive() {
        let document = json!({ "benchmark_name": "page_cycler" });
        let err = parse_chart_json(&document).unwrap_err();

        match &err {
            StatsError::MalformedDocument { reason, document } => {
                assert!(reason.contains("charts"));
                assert!(document.contains("page_cycler"));
            }
            other => panic!("Expected MalformedDocument, got {:?}", other),
        }
        assert!(err.to_string().contains("Make sure input is a Chart-JSON"));
    }

    #[test]
    fn test_charts_not_an_object() {
        let document = json!({ "charts": [1, 2, 3] });
        assert!(matches!(
            parse_chart_json(&document),
            Err(StatsError::MalformedDocument { .. })
        ));
    }

    #[test]
    fn test_chart_without_values() {
        let document = json!({ "charts": { "latency": { "summary": {} } } });
        let err = parse_chart_json(&document).unwrap_err();
        assert!(err.to_string().contains("latency"));
    }

    #[test]
    fn test_non_numeric_values() {
        let document = json!({ "charts": { "latency": { "summary": { "values": [1, "x"] } } } });
        let err = parse_chart_json(&document).unwrap_err();
        assert!(err.to_string().contains("non-numeric"));
    }

    #[test]
    fn test_invalid_json_text() {
        let err = parse_chart_json_str("{ charts: ").unwrap_err();
        assert!(matches!(err, StatsError::MalformedDocument { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_chart_json(Path::new("/nonexistent/benchdiff/result.json")).unwrap_err();
        assert!(matches!(err, StatsError::Io(_)));
    }
}
