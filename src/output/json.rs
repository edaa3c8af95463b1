//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of ranked entries, summary and errors
//! - Up-to-date dependency listing in verbose mode

use crate::domain::{Evaluation, RunSummary};
use crate::engine::RankedEntry;
use crate::orchestrator::{RunError, RunResult};
use crate::output::{Presenter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Ranked outdated dependencies
    dependencies: &'a [RankedEntry],
    /// Summary statistics
    summary: &'a RunSummary,
    /// Per-dependency problems
    errors: &'a [RunError],
    /// Dependencies with nothing to show (only in verbose mode)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    up_to_date: Vec<JsonCurrent<'a>>,
}

/// JSON representation of an up-to-date dependency
#[derive(Serialize)]
struct JsonCurrent<'a> {
    name: &'a str,
    current_version: &'a str,
}

fn up_to_date(evaluations: &[Evaluation]) -> Vec<JsonCurrent<'_>> {
    let mut current: Vec<JsonCurrent<'_>> = evaluations
        .iter()
        .filter_map(Evaluation::report)
        .filter(|r| !r.is_outdated())
        .map(|r| JsonCurrent {
            name: &r.name,
            current_version: r.baseline.original(),
        })
        .collect();
    current.sort_by(|a, b| a.name.cmp(&b.name));
    current
}

impl Presenter for JsonFormatter {
    fn format(&self, result: &RunResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            dependencies: &result.entries,
            summary: &result.summary,
            errors: &result.errors,
            up_to_date: if self.verbosity == Verbosity::Verbose {
                up_to_date(&result.evaluations)
            } else {
                Vec::new()
            },
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DependencyReport, SeverityTier, Version};
    use crate::engine::RankedVersion;
    use crate::orchestrator::RunErrorKind;

    fn create_test_result() -> RunResult {
        RunResult {
            module: Some("example.com/app".to_string()),
            entries: vec![RankedEntry {
                rank: 1,
                name: "github.com/a/lib".to_string(),
                current_version: "v1.0.0".to_string(),
                versions: vec![
                    RankedVersion {
                        version: "v1.0.1".to_string(),
                        severity: SeverityTier::Patch,
                    },
                    RankedVersion {
                        version: "v2.0.0+incompatible".to_string(),
                        severity: SeverityTier::Incompatible,
                    },
                ],
            }],
            evaluations: vec![Evaluation::Report(DependencyReport::current(
                "github.com/b/lib",
                Version::parse("v1.4.0").unwrap(),
            ))],
            summary: RunSummary {
                checked: 3,
                outdated: 1,
                current: 1,
                fetch_failures: 1,
                patch: 1,
                incompatible: 1,
                ..RunSummary::default()
            },
            errors: vec![RunError {
                dependency: "github.com/c/lib".to_string(),
                kind: RunErrorKind::Fetch,
                message: "timeout".to_string(),
            }],
        }
    }

    fn render(verbosity: Verbosity, result: &RunResult) -> serde_json::Value {
        let mut output = Vec::new();
        JsonFormatter::new(verbosity)
            .format(result, &mut output)
            .unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_json_formatter_new() {
        let formatter = JsonFormatter::new(Verbosity::Normal);
        assert_eq!(formatter.verbosity, Verbosity::Normal);
    }

    #[test]
    fn test_format_json() {
        let parsed = render(Verbosity::Normal, &create_test_result());

        let dep = &parsed["dependencies"][0];
        assert_eq!(dep["rank"], 1);
        assert_eq!(dep["name"], "github.com/a/lib");
        assert_eq!(dep["current_version"], "v1.0.0");
        assert_eq!(dep["versions"][0]["version"], "v1.0.1");
        assert_eq!(dep["versions"][0]["severity"], "patch");
        assert_eq!(dep["versions"][1]["severity"], "incompatible");

        assert_eq!(parsed["summary"]["outdated"], 1);
        assert_eq!(parsed["summary"]["fetch_failures"], 1);
        assert_eq!(parsed["errors"][0]["dependency"], "github.com/c/lib");
        assert_eq!(parsed["errors"][0]["kind"], "fetch");
        assert!(parsed.get("up_to_date").is_none());
    }

    #[test]
    fn test_format_json_verbose() {
        let parsed = render(Verbosity::Verbose, &create_test_result());
        assert_eq!(parsed["up_to_date"][0]["name"], "github.com/b/lib");
        assert_eq!(parsed["up_to_date"][0]["current_version"], "v1.4.0");
    }

    #[test]
    fn test_format_json_empty() {
        let parsed = render(Verbosity::Normal, &RunResult::default());
        assert!(parsed["dependencies"].as_array().unwrap().is_empty());
        assert!(parsed["errors"].as_array().unwrap().is_empty());
        assert_eq!(parsed["summary"]["checked"], 0);
    }
}
