//! Output formatting for comparison reports.
//!
//! Text output re-nests each class of changed keys with
//! [`unflatten`](crate::flatten::unflatten) and prints it as indented JSON,
//! or as one `key.path: value` line per key in flat mode. JSON output is meant
//! for scripts.
//!
//! # Examples
//!
//! ```
//! use locale_diff::{
//!     compare_sources, format_reports, parse_json, CompareOptions, MemorySource,
//!     OutputFormat, OutputOptions,
//! };
//!
//! let origin = MemorySource::new("develop").with_document("en", parse_json(r#"{"a": "A"}"#).unwrap());
//! let modified = MemorySource::new("feature").with_document("en", parse_json(r#"{"a": "A", "b": "B"}"#).unwrap());
//! let reports = compare_sources(&origin, &modified, &CompareOptions::default()).unwrap();
//!
//! let output = format_reports(&reports, &OutputFormat::Plain, &OutputOptions::default()).unwrap();
//! assert!(output.contains("\"b\": \"B\""));
//! ```

use crate::compare::{DocumentReport, LocaleDiff};
use crate::diff::DiffStats;
use crate::error::OutputError;
use crate::flatten::{unflatten, FlatMap};
use crate::tree::document_to_json;
use colored::{Color, Colorize};
use serde::Serialize;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored terminal output with ANSI escape codes
    Terminal,
    /// JSON representation of the reports
    Json,
    /// Plain text, no colors (suitable for piping)
    Plain,
}

/// Options for controlling output formatting.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Print one `key.path: value` line per key instead of nested documents
    pub flat: bool,
    /// Maximum length for displayed values in flat mode
    pub max_value_length: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            flat: false,
            max_value_length: 80,
        }
    }
}

/// Formats comparison reports according to the specified format and options.
pub fn format_reports(
    reports: &[DocumentReport],
    format: &OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Terminal => format_text(reports, options, true),
        OutputFormat::Json => format_json(reports),
        OutputFormat::Plain => format_text(reports, options, false),
    }
}

fn format_text(
    reports: &[DocumentReport],
    options: &OutputOptions,
    colorize: bool,
) -> Result<String, OutputError> {
    let mut blocks = Vec::with_capacity(reports.len());
    for report in reports {
        blocks.push(format_report_text(report, options, colorize)?);
    }
    Ok(blocks.join("\n\n"))
}

fn format_report_text(
    report: &DocumentReport,
    options: &OutputOptions,
    colorize: bool,
) -> Result<String, OutputError> {
    let header = format!("{} > {}:", report.modified, report.origin);

    let diff = match &report.outcome {
        Ok(diff) => diff,
        Err(err) => {
            let line = format!("{} {}", header, err);
            return Ok(paint(&line, Color::Red, colorize));
        }
    };

    let mut output = header;
    output.push('\n');

    if diff.is_empty() {
        output.push_str(&paint("No new translations added", Color::Cyan, colorize));
        return Ok(output);
    }

    let sections = [
        ("Added", &diff.added, Color::BrightGreen),
        ("Modified (origin values)", &diff.modified, Color::Yellow),
        ("Removed", &diff.removed, Color::Red),
    ];
    for (title, keys, color) in sections {
        if keys.is_empty() {
            continue;
        }
        output.push_str(&format!("{}:\n", title));
        let body = render_keys(keys, options)?;
        output.push_str(&paint(&body, color, colorize));
        output.push('\n');
    }

    output.push_str(&format_summary(&diff.stats()));
    Ok(output)
}

fn render_keys(keys: &FlatMap, options: &OutputOptions) -> Result<String, OutputError> {
    if options.flat {
        let lines: Vec<String> = keys
            .iter()
            .map(|(path, value)| format!("  {}: {}", path, value.preview(options.max_value_length)))
            .collect();
        return Ok(lines.join("\n"));
    }

    serde_json::to_string_pretty(&document_to_json(&unflatten(keys)))
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}

fn paint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        text.color(color).to_string()
    } else {
        text.to_string()
    }
}

/// Formats summary statistics.
fn format_summary(stats: &DiffStats) -> String {
    if stats.is_empty() {
        return "Summary: No changes".to_string();
    }

    let mut parts = Vec::new();
    if stats.added > 0 {
        parts.push(format!("{} added", stats.added));
    }
    if stats.modified > 0 {
        parts.push(format!("{} modified", stats.modified));
    }
    if stats.removed > 0 {
        parts.push(format!("{} removed", stats.removed));
    }

    format!("Summary: {}", parts.join(", "))
}

#[derive(Serialize)]
struct JsonReport {
    origin: String,
    modified: String,
    status: &'static str,
    #[serde(flatten)]
    body: JsonBody,
}

#[derive(Serialize)]
#[serde(untagged)]
enum JsonBody {
    Compared {
        added: serde_json::Value,
        changed: serde_json::Value,
        removed: serde_json::Value,
        stats: DiffStats,
    },
    Failed {
        error: String,
    },
}

impl JsonBody {
    fn from_diff(diff: &LocaleDiff) -> Self {
        JsonBody::Compared {
            added: document_to_json(&unflatten(&diff.added)),
            changed: document_to_json(&unflatten(&diff.modified)),
            removed: document_to_json(&unflatten(&diff.removed)),
            stats: diff.stats(),
        }
    }
}

fn format_json(reports: &[DocumentReport]) -> Result<String, OutputError> {
    let output: Vec<JsonReport> = reports
        .iter()
        .map(|report| {
            let (status, body) = match &report.outcome {
                Ok(diff) if diff.is_empty() => ("unchanged", JsonBody::from_diff(diff)),
                Ok(diff) => ("changed", JsonBody::from_diff(diff)),
                Err(err) => (
                    "error",
                    JsonBody::Failed {
                        error: err.to_string(),
                    },
                ),
            };
            JsonReport {
                origin: report.origin.to_string(),
                modified: report.modified.to_string(),
                status,
                body,
            }
        })
        .collect();

    serde_json::to_string_pretty(&output)
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{CompareError, DocumentLabel, Side};
    use crate::diff::MapDiff;
    use crate::keypath::KeyPath;
    use crate::tree::Scalar;

    fn label(source: &str) -> DocumentLabel {
        DocumentLabel {
            source: source.to_string(),
            locale: "en".to_string(),
        }
    }

    fn report(outcome: Result<LocaleDiff, CompareError>) -> DocumentReport {
        DocumentReport {
            origin: label("develop"),
            modified: label("feature"),
            outcome,
        }
    }

    fn sample_diff() -> LocaleDiff {
        let mut diff = MapDiff::new();
        diff.added
            .insert(KeyPath::parse("menu.close"), Scalar::from("Close"));
        diff.modified
            .insert(KeyPath::parse("title"), Scalar::from("Editor"));
        diff
    }

    #[test]
    fn test_plain_nests_added_keys() {
        let output = format_reports(
            &[report(Ok(sample_diff()))],
            &OutputFormat::Plain,
            &OutputOptions::default(),
        )
        .unwrap();

        assert!(output.starts_with("feature en > develop en:"));
        assert!(output.contains("Added:\n{\n  \"menu\": {\n    \"close\": \"Close\"\n  }\n}"));
        assert!(output.contains("Summary: 1 added, 1 modified"));
    }

    #[test]
    fn test_plain_flat_lines() {
        let options = OutputOptions {
            flat: true,
            ..Default::default()
        };
        let output =
            format_reports(&[report(Ok(sample_diff()))], &OutputFormat::Plain, &options).unwrap();
        assert!(output.contains("  menu.close: \"Close\""));
        assert!(output.contains("  title: \"Editor\""));
    }

    #[test]
    fn test_plain_no_changes() {
        let output = format_reports(
            &[report(Ok(MapDiff::new()))],
            &OutputFormat::Plain,
            &OutputOptions::default(),
        )
        .unwrap();
        assert!(output.contains("No new translations added"));
        assert!(!output.contains("Summary"));
    }

    #[test]
    fn test_failed_report_shows_error() {
        let failed = report(Err(CompareError::Missing {
            side: Side::Origin,
            locale: "en".to_string(),
        }));
        let output =
            format_reports(&[failed], &OutputFormat::Plain, &OutputOptions::default()).unwrap();
        assert!(output.contains("No origin document found for locale en"));
    }

    #[test]
    fn test_json_output() {
        let output = format_reports(
            &[report(Ok(sample_diff()))],
            &OutputFormat::Json,
            &OutputOptions::default(),
        )
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed[0]["status"], "changed");
        assert_eq!(parsed[0]["added"]["menu"]["close"], "Close");
        assert_eq!(parsed[0]["changed"]["title"], "Editor");
        assert_eq!(parsed[0]["stats"]["added"], 1);
    }

    #[test]
    fn test_summary() {
        assert_eq!(format_summary(&DiffStats::default()), "Summary: No changes");
        let stats = DiffStats {
            added: 2,
            modified: 0,
            removed: 1,
        };
        assert_eq!(format_summary(&stats), "Summary: 2 added, 1 removed");
    }
}
