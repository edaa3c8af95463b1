//! CLI argument parsing module for modcheck

use clap::Parser;
use std::path::PathBuf;

/// List outdated Go module dependencies ranked by upgrade severity
#[derive(Parser, Debug, Clone)]
#[command(
    name = "modcheck",
    version,
    about = "List outdated Go module dependencies ranked by upgrade severity"
)]
pub struct CliArgs {
    /// Directory containing go.mod, or the go.mod file itself
    #[arg(default_value = ".")]
    pub path: PathBuf,

    // Selection options
    /// How many versions to display per table row (1-1000)
    #[arg(long = "max-versions", default_value_t = 10)]
    pub max_versions: usize,

    /// Version types to display: comma-separated `major`, `minor`, `patch`
    #[arg(long, default_value = "major,minor,patch")]
    pub filter: String,

    /// Show incompatible versions (hidden by default)
    #[arg(long = "show-incompatible")]
    pub show_incompatible: bool,

    /// Also check requirements marked `// indirect`
    #[arg(long)]
    pub include_indirect: bool,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Table width in columns (default: terminal width)
    #[arg(long)]
    pub width: Option<usize>,

    // General options
    /// Maximum number of concurrent module proxy requests
    #[arg(long, default_value_t = 10)]
    pub concurrency: usize,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - no progress display
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_args() {
        let args = CliArgs::parse_from(["modcheck"]);
        assert_eq!(args.path, PathBuf::from("."));
        assert_eq!(args.max_versions, 10);
        assert_eq!(args.filter, "major,minor,patch");
        assert!(!args.show_incompatible);
        assert!(!args.include_indirect);
        assert!(!args.json);
        assert!(!args.no_color);
        assert!(args.width.is_none());
        assert_eq!(args.concurrency, 10);
        assert!(!args.verbose);
        assert!(!args.quiet);
    }

    #[test]
    fn test_path_argument() {
        let args = CliArgs::parse_from(["modcheck", "/some/project"]);
        assert_eq!(args.path, PathBuf::from("/some/project"));
    }

    #[test]
    fn test_max_versions() {
        let args = CliArgs::parse_from(["modcheck", "--max-versions", "25"]);
        assert_eq!(args.max_versions, 25);
    }

    #[test]
    fn test_max_versions_rejects_negative() {
        assert!(CliArgs::try_parse_from(["modcheck", "--max-versions", "-1"]).is_err());
    }

    #[test]
    fn test_filter() {
        let args = CliArgs::parse_from(["modcheck", "--filter", "minor,patch"]);
        assert_eq!(args.filter, "minor,patch");
    }

    #[test]
    fn test_show_incompatible() {
        let args = CliArgs::parse_from(["modcheck", "--show-incompatible"]);
        assert!(args.show_incompatible);
    }

    #[test]
    fn test_output_flags() {
        let args = CliArgs::parse_from(["modcheck", "--json", "--no-color", "--width", "100"]);
        assert!(args.json);
        assert!(args.no_color);
        assert_eq!(args.width, Some(100));
    }

    #[test]
    fn test_quiet_flags() {
        let args = CliArgs::parse_from(["modcheck", "-q"]);
        assert!(args.quiet);

        let args = CliArgs::parse_from(["modcheck", "--quiet"]);
        assert!(args.quiet);
    }

    #[test]
    fn test_combined_flags() {
        let args = CliArgs::parse_from([
            "modcheck",
            "/path/to/project",
            "--max-versions",
            "5",
            "--filter",
            "major",
            "--show-incompatible",
            "--include-indirect",
            "--concurrency",
            "4",
            "--verbose",
        ]);
        assert_eq!(args.path, PathBuf::from("/path/to/project"));
        assert_eq!(args.max_versions, 5);
        assert_eq!(args.filter, "major");
        assert!(args.show_incompatible);
        assert!(args.include_indirect);
        assert_eq!(args.concurrency, 4);
        assert!(args.verbose);
    }
}
