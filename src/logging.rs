//! Diagnostic logging setup
//!
//! Logs go to stderr so they never mix with table or JSON output.
//! `RUST_LOG` takes precedence over the verbosity flags.

use crate::output::Verbosity;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directive for a verbosity level
pub fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Verbose => "modcheck=debug",
        Verbosity::Normal => "modcheck=warn",
        Verbosity::Quiet => "modcheck=error",
    }
}

/// Install the global subscriber
///
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(Verbosity::Normal), "modcheck=warn");
        assert_eq!(default_directive(Verbosity::Verbose), "modcheck=debug");
        assert_eq!(default_directive(Verbosity::Quiet), "modcheck=error");
    }

    #[test]
    fn test_init_twice() {
        init(Verbosity::Normal);
        init(Verbosity::Verbose);
    }
}
