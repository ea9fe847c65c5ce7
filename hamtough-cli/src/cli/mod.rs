//! Command-line interface for the hamtough tools.
//!
//! `exhaustive` and `chordal` verify graph6 files pair by pair; `climb` runs
//! the hill-climbing search.

mod commands;

pub use commands::{
    Cli, CliError, ClimbArgs, Command, ExecutionSummary, FileOutcome, FileReport, VerifyArgs,
    VerifyMode, run_cli,
};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
