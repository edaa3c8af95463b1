//! Run configuration
//!
//! Built once from CLI arguments, validated before any file or network
//! access, then passed explicitly to the orchestrator and presenters.

use crate::cli::CliArgs;
use crate::domain::SeverityTier;
use crate::engine::TierFilter;
use crate::error::ConfigError;
use crate::output::{OutputConfig, OutputFormat, Verbosity};
use std::path::{Path, PathBuf};

/// Manifest file name looked up inside a directory
pub const GO_MOD_FILE: &str = "go.mod";

/// Default number of versions per table row
pub const DEFAULT_MAX_VERSIONS: usize = 10;

/// Smallest accepted `--max-versions`
pub const MIN_MAX_VERSIONS: usize = 1;

/// Largest accepted `--max-versions`
pub const MAX_MAX_VERSIONS: usize = 1000;

/// Default number of concurrent proxy requests
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Narrowest table width accepted by `--width`
pub const MIN_WIDTH: usize = 40;

/// Validated configuration for one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Path to the go.mod file
    pub manifest_path: PathBuf,
    /// Severity filter applied after classification
    pub filter: TierFilter,
    /// Also check `// indirect` requirements
    pub include_indirect: bool,
    /// Maximum concurrent proxy requests
    pub concurrency: usize,
    /// Presentation options
    pub output: OutputConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from(GO_MOD_FILE),
            filter: TierFilter::default(),
            include_indirect: false,
            concurrency: DEFAULT_CONCURRENCY,
            output: OutputConfig::default(),
        }
    }
}

impl RunConfig {
    /// Validate CLI arguments and build the run configuration
    pub fn from_cli(args: &CliArgs) -> Result<Self, ConfigError> {
        if args.quiet && args.verbose {
            return Err(ConfigError::ConflictingOptions {
                message: "--quiet and --verbose cannot be used together".to_string(),
            });
        }

        let max_display_columns = validate_max_versions(args.max_versions)?;
        let tiers = parse_filter(&args.filter)?;

        if args.concurrency == 0 {
            return Err(ConfigError::InvalidConcurrency {
                value: args.concurrency,
            });
        }

        if let Some(width) = args.width {
            if width < MIN_WIDTH {
                return Err(ConfigError::InvalidWidth {
                    value: width,
                    min: MIN_WIDTH,
                });
            }
        }

        let verbosity = if args.quiet {
            Verbosity::Quiet
        } else if args.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        let format = if args.json {
            OutputFormat::Json
        } else {
            OutputFormat::Table
        };

        let filter = TierFilter::new()
            .with_tiers(tiers)
            .with_include_incompatible(args.show_incompatible);

        Ok(Self {
            manifest_path: resolve_manifest_path(&args.path),
            output: OutputConfig {
                format,
                verbosity,
                color: !args.no_color,
                width: args.width,
                max_display_columns,
                filter_description: filter.describe(),
            },
            filter,
            include_indirect: args.include_indirect,
            concurrency: args.concurrency,
        })
    }
}

/// Check the per-row version count
pub fn validate_max_versions(value: usize) -> Result<usize, ConfigError> {
    if (MIN_MAX_VERSIONS..=MAX_MAX_VERSIONS).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::InvalidMaxVersions {
            value,
            min: MIN_MAX_VERSIONS,
            max: MAX_MAX_VERSIONS,
        })
    }
}

/// Parse a comma-separated tier list
///
/// An empty or blank list selects every tier.
pub fn parse_filter(value: &str) -> Result<Vec<SeverityTier>, ConfigError> {
    if value.trim().is_empty() {
        return Ok(SeverityTier::selectable().to_vec());
    }

    let mut tiers = Vec::new();
    for token in value.split(',') {
        let tier = token
            .parse::<SeverityTier>()
            .ok()
            .filter(|t| *t != SeverityTier::Incompatible)
            .ok_or_else(|| ConfigError::InvalidFilter {
                value: token.trim().to_string(),
            })?;
        if !tiers.contains(&tier) {
            tiers.push(tier);
        }
    }
    Ok(tiers)
}

/// Directories resolve to the go.mod inside them
pub fn resolve_manifest_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(GO_MOD_FILE)
    } else {
        path.to_path_buf()
    }
}
