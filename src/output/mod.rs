//! Output formatting for run results
//!
//! This module provides:
//! - Table output for human-readable display
//! - JSON output for machine processing

mod json;
mod table;

pub use json::JsonFormatter;
pub use table::{terminal_width, truncate_name, TableFormatter};

use crate::config::DEFAULT_MAX_VERSIONS;
use crate::orchestrator::RunResult;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output for machine processing
    Json,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Table only, no footer or diagnostics
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Detailed output with per-dependency errors and exclusions
    Verbose,
}

/// Configuration for output formatting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Output format (table, json)
    pub format: OutputFormat,
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Whether to use colors
    pub color: bool,
    /// Explicit table width; `None` means detect the terminal
    pub width: Option<usize>,
    /// Versions shown per table row before wrapping
    pub max_display_columns: usize,
    /// Active filter, shown when nothing is outdated
    pub filter_description: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbosity: Verbosity::default(),
            color: true,
            width: None,
            max_display_columns: DEFAULT_MAX_VERSIONS,
            filter_description: "major,minor,patch".to_string(),
        }
    }
}

impl OutputConfig {
    /// Progress is drawn only for interactive table output
    pub fn shows_progress(&self) -> bool {
        self.format == OutputFormat::Table && self.verbosity != Verbosity::Quiet
    }
}

/// Trait for result presenters
pub trait Presenter {
    /// Format and write the run result
    fn format(&self, result: &RunResult, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create a presenter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn Presenter> {
    match config.format {
        OutputFormat::Table => Box::new(TableFormatter::new(config)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.verbosity)),
    }
}
