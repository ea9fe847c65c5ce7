//! Small helpers shared across CLI tests.

use std::{fs, io, path::PathBuf};

use tempfile::TempDir;

use super::{Cli, CliError, ExecutionSummary, FileOutcome, FileReport, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn write_graph6(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Err(err) = fs::write(&path, contents) {
        panic!("failed to write {}: {err}", path.display());
    }
    path
}

/// Runs `cli`, returning its result and everything it wrote.
pub(super) fn run_cli_capturing(cli: Cli) -> (Result<ExecutionSummary, CliError>, String) {
    let mut out = Vec::new();
    let result = run_cli(cli, &mut out);
    match String::from_utf8(out) {
        Ok(text) => (result, text),
        Err(err) => panic!("output is not UTF-8: {err}"),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli, &mut io::sink()) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}

pub(super) fn file_reports(summary: ExecutionSummary) -> Vec<FileReport> {
    match summary {
        ExecutionSummary::Verification(files) => files,
        ExecutionSummary::Climb(_) => panic!("expected a verification summary"),
    }
}

pub(super) fn counterexample_count(report: &FileReport) -> usize {
    match &report.outcome {
        FileOutcome::Verified(totals) => totals.counterexamples(),
        FileOutcome::Skipped { reason } => panic!("file was skipped: {reason}"),
    }
}
