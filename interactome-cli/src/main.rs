//! `interactome` binary.
//!
//! Installs structured logging, dispatches the `analyze`, `lattice` or
//! `sweep` subcommand and prints the summary to stdout. Failures are logged
//! once with their stable error code and turn into a non-zero exit status.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use interactome_cli::{
    cli::{Cli, CliError, ExecutionSummary, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

/// Runs the parsed command and prints what it produced.
fn try_main() -> Result<()> {
    let summary = run_cli(Cli::parse()).context("interactome command failed")?;
    print_summary(&summary)
}

/// Renders `summary` to a locked, buffered stdout.
fn print_summary(summary: &ExecutionSummary) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    render_summary(summary, &mut out).context("failed to render summary")?;
    out.flush().context("failed to flush summary")
}

/// Stable code of the underlying [`CliError`], when it carries one.
fn failure_code(err: &anyhow::Error) -> Option<&'static str> {
    err.downcast_ref::<CliError>().and_then(CliError::code)
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(
                error = %format!("{err:#}"),
                code = failure_code(&err).map(field::display),
                "command execution failed"
            );
            ExitCode::FAILURE
        }
    }
}

#[expect(
    clippy::print_stderr,
    reason = "tracing is not installed when logging setup fails"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("interactome: cannot initialise logging: {err}");
}
