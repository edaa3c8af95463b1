//! modcheck - outdated Go module dependency report
//!
//! Reads go.mod, asks the module proxy for newer versions and prints the
//! outdated requirements ranked by upgrade severity.
//!
//! Exit codes: 0 on success, 1 on configuration or manifest errors,
//! 2 when some version lists could not be fetched.

use clap::Parser;
use modcheck::cli::CliArgs;
use modcheck::config::RunConfig;
use modcheck::logging;
use modcheck::orchestrator;
use modcheck::output::create_formatter;
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let config = RunConfig::from_cli(&args)?;
    logging::init(config.output.verbosity);

    tracing::debug!(
        manifest = %config.manifest_path.display(),
        filter = %config.output.filter_description,
        concurrency = config.concurrency,
        "starting modcheck v{}",
        env!("CARGO_PKG_VERSION")
    );

    let output = config.output.clone();
    let result = orchestrator::check(config).await?;

    let formatter = create_formatter(output);
    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    if result.has_fetch_failures() {
        // Partial success - some version lists are missing
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
