//! Table output formatter for human-readable display
//!
//! This module provides:
//! - Ranked table of outdated dependencies
//! - Version cells colored by severity tier
//! - Row wrapping by version count and terminal width
//! - Summary footer and diagnostics

use crate::domain::SeverityTier;
use crate::engine::{RankedEntry, RankedVersion};
use crate::orchestrator::{RunErrorKind, RunResult};
use crate::output::{OutputConfig, Presenter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Width used when neither `--width` nor the terminal gives one
const FALLBACK_WIDTH: usize = 120;

/// Spaces between columns and between versions in a cell
const GAP: usize = 2;

/// Narrowest dependency column cap
const MIN_NAME_CAP: usize = 12;

const HEADER_RANK: &str = "#";
const HEADER_NAME: &str = "Dependency";
const HEADER_CURRENT: &str = "Current Version";
const HEADER_VERSIONS: &str = "Available Versions";

/// Detect the terminal width
///
/// Falls back to `$COLUMNS`, then to 120 columns when output is not a terminal.
pub fn terminal_width() -> usize {
    if let Ok((cols, _)) = crossterm::terminal::size() {
        if cols > 0 {
            return cols as usize;
        }
    }
    std::env::var("COLUMNS")
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|w| *w > 0)
        .unwrap_or(FALLBACK_WIDTH)
}

/// Shorten a name to `max` characters, marking the cut with `…`
pub fn truncate_name(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        return name.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut truncated: String = name.chars().take(max - 1).collect();
    truncated.push('…');
    truncated
}

fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Column widths for one rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    rank: usize,
    name: usize,
    current: usize,
    versions: usize,
}

impl Layout {
    fn compute(entries: &[RankedEntry], width: usize) -> Self {
        let rank = entries
            .iter()
            .map(|e| e.rank.to_string().len())
            .max()
            .unwrap_or(0)
            .max(HEADER_RANK.len());

        let name_cap = (width / 3).max(MIN_NAME_CAP);
        let name = entries
            .iter()
            .map(|e| text_width(&e.name))
            .max()
            .unwrap_or(0)
            .max(HEADER_NAME.len())
            .min(name_cap);

        let current = entries
            .iter()
            .map(|e| text_width(&e.current_version))
            .max()
            .unwrap_or(0)
            .max(HEADER_CURRENT.len());

        let versions = width
            .saturating_sub(rank + name + current + 3 * GAP)
            .max(1);

        Self {
            rank,
            name,
            current,
            versions,
        }
    }

    fn prefix_width(&self) -> usize {
        self.rank + self.name + self.current + 3 * GAP
    }
}

/// Split versions into display lines
///
/// A line holds at most `max_per_line` versions and stays within `width`
/// characters, but always holds at least one version.
fn wrap_versions(
    versions: &[RankedVersion],
    max_per_line: usize,
    width: usize,
) -> Vec<&[RankedVersion]> {
    let mut lines = Vec::new();
    let mut start = 0;

    while start < versions.len() {
        let mut end = start;
        let mut used = 0;
        while end < versions.len() && end - start < max_per_line.max(1) {
            let len = text_width(&versions[end].version);
            let needed = if end == start { len } else { used + GAP + len };
            if end > start && needed > width {
                break;
            }
            used = needed;
            end += 1;
        }
        lines.push(&versions[start..end]);
        start = end;
    }

    lines
}

/// Table formatter for human-readable output
pub struct TableFormatter {
    config: OutputConfig,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    fn width(&self) -> usize {
        self.config.width.unwrap_or_else(terminal_width)
    }

    fn paint_version(&self, version: &RankedVersion) -> String {
        if !self.config.color {
            return version.version.clone();
        }
        let text = version.version.as_str();
        match version.severity {
            SeverityTier::Patch => text.green().to_string(),
            SeverityTier::Minor => text.yellow().to_string(),
            SeverityTier::Major => text.red().to_string(),
            SeverityTier::Incompatible => text.magenta().to_string(),
        }
    }

    fn paint_header(&self, text: &str) -> String {
        if self.config.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn paint_dim(&self, text: &str) -> String {
        if self.config.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn write_table(&self, entries: &[RankedEntry], writer: &mut dyn Write) -> std::io::Result<()> {
        let layout = Layout::compute(entries, self.width());
        let gap = " ".repeat(GAP);

        let header = format!(
            "{:>rank_w$}{gap}{:<name_w$}{gap}{:<current_w$}{gap}{}",
            HEADER_RANK,
            HEADER_NAME,
            HEADER_CURRENT,
            HEADER_VERSIONS,
            rank_w = layout.rank,
            name_w = layout.name,
            current_w = layout.current,
        );
        writeln!(writer, "{}", self.paint_header(header.trim_end()))?;

        let rule_width = layout.prefix_width() + HEADER_VERSIONS.len();
        writeln!(writer, "{}", self.paint_dim(&"-".repeat(rule_width)))?;

        let continuation = " ".repeat(layout.prefix_width());
        for entry in entries {
            let name = truncate_name(&entry.name, layout.name);
            let lines = wrap_versions(
                &entry.versions,
                self.config.max_display_columns,
                layout.versions,
            );

            for (index, line) in lines.iter().enumerate() {
                let cell = line
                    .iter()
                    .map(|v| self.paint_version(v))
                    .collect::<Vec<_>>()
                    .join(&gap);

                if index == 0 {
                    writeln!(
                        writer,
                        "{:>rank_w$}{gap}{:<name_w$}{gap}{:<current_w$}{gap}{}",
                        entry.rank,
                        name,
                        entry.current_version,
                        cell,
                        rank_w = layout.rank,
                        name_w = layout.name,
                        current_w = layout.current,
                    )?;
                } else {
                    writeln!(writer, "{}{}", continuation, cell)?;
                }
            }
        }

        Ok(())
    }

    fn write_summary(&self, result: &RunResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let summary = &result.summary;
        let mut line = format!(
            "{} outdated, {} current",
            summary.outdated, summary.current
        );
        if summary.excluded > 0 {
            line.push_str(&format!(", {} excluded", summary.excluded));
        }
        if summary.fetch_failures > 0 {
            line.push_str(&format!(", {} failed", summary.fetch_failures));
        }

        let tiers = [
            SeverityTier::Major,
            SeverityTier::Minor,
            SeverityTier::Patch,
            SeverityTier::Incompatible,
        ]
        .iter()
        .map(|tier| format!("{}: {}", tier, summary.count_for(*tier)))
        .collect::<Vec<_>>()
        .join(", ");

        writeln!(writer)?;
        if self.config.color {
            writeln!(
                writer,
                "{} {} {}",
                "Summary:".bold(),
                line,
                format!("({})", tiers).dimmed()
            )
        } else {
            writeln!(writer, "Summary: {} ({})", line, tiers)
        }
    }

    fn write_diagnostics(&self, result: &RunResult, writer: &mut dyn Write) -> std::io::Result<()> {
        if result.errors.is_empty() {
            return Ok(());
        }

        if self.config.verbosity != Verbosity::Verbose {
            let failures = result
                .errors
                .iter()
                .filter(|e| e.kind == RunErrorKind::Fetch)
                .count();
            if failures > 0 {
                let hint = format!(
                    "{} {} could not be checked (use --verbose for details)",
                    failures,
                    if failures == 1 {
                        "dependency"
                    } else {
                        "dependencies"
                    }
                );
                if self.config.color {
                    writeln!(writer, "{}", hint.yellow())?;
                } else {
                    writeln!(writer, "{}", hint)?;
                }
            }
            return Ok(());
        }

        writeln!(writer)?;
        writeln!(writer, "{}", self.paint_header("Problems:"))?;
        for error in &result.errors {
            let label = match error.kind {
                RunErrorKind::Fetch => "fetch failed",
                RunErrorKind::Excluded => "excluded",
            };
            let line = format!("  {} ({}): {}", error.dependency, label, error.message);
            if self.config.color && error.kind == RunErrorKind::Fetch {
                writeln!(writer, "{}", line.red())?;
            } else {
                writeln!(writer, "{}", self.paint_dim(&line))?;
            }
        }
        Ok(())
    }
}

impl Presenter for TableFormatter {
    fn format(&self, result: &RunResult, writer: &mut dyn Write) -> std::io::Result<()> {
        if result.entries.is_empty() {
            let summary = &result.summary;
            if summary.checked == 0 && result.errors.is_empty() {
                writeln!(writer, "No dependencies to check.")?;
            } else if summary.current > 0 && summary.fetch_failures == 0 && summary.excluded == 0 {
                let message = "All dependencies are up to date.";
                if self.config.color {
                    writeln!(writer, "{}", message.green())?;
                } else {
                    writeln!(writer, "{}", message)?;
                }
            } else {
                // Fetch failures or exclusions leave nothing confirmed current
                writeln!(writer, "No newer versions match the filter.")?;
            }
            writeln!(
                writer,
                "{}",
                self.paint_dim(&format!("(filter: {})", self.config.filter_description))
            )?;
        } else {
            self.write_table(&result.entries, writer)?;
        }

        if self.config.verbosity == Verbosity::Quiet {
            return Ok(());
        }

        if result.summary.checked > 0 {
            self.write_summary(result, writer)?;
        }
        self.write_diagnostics(result, writer)
    }
}
