//! `hamtough` binary: verifies graph6 files or hill-climbs for tough graphs.
//!
//! Results go to stdout; diagnostics go to stderr through `tracing`.

use std::{
    io::{self, BufWriter, Write},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use hamtough_cli::{
    cli::{Cli, CliError, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    let outcome = run_cli(cli, &mut writer);
    // Lines written before a failure still reach stdout.
    let flushed = writer.flush();
    outcome.context("failed to execute command")?;
    flushed.context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let code = err.downcast_ref::<CliError>().and_then(CliError::code);
        error!(
            error = %format_args!("{err:#}"),
            code = code.map(field::display),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
