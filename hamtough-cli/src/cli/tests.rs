//! Unit tests for the CLI commands.

use std::{fs, io, num::NonZeroUsize, path::PathBuf};

use clap::Parser;
use hamtough_core::{Graph, HamtoughError};
use hamtough_providers_graph6::Graph6SourceError;
use hamtough_test_support::tracing::with_recording;
use rstest::rstest;
use tracing::Level;

use super::commands::{run_verify, toughest};
use super::test_helpers::{
    counterexample_count, file_reports, run_cli_capturing, run_cli_expecting_error, temp_dir,
    write_graph6,
};
use super::{
    Cli, CliError, ClimbArgs, Command, ExecutionSummary, FileOutcome, VerifyArgs, VerifyMode,
    run_cli,
};

/// C5 followed by the star K1,4.
const ORDER_FIVE: &str = "Dhc\nDs_\n";

fn verify_cli(mode: VerifyMode, threshold: Option<f64>, paths: Vec<PathBuf>) -> Cli {
    let args = VerifyArgs { threshold, paths };
    let command = match mode {
        VerifyMode::Tuned => Command::Exhaustive(args),
        VerifyMode::Chordal => Command::Chordal(args),
    };
    Cli { command }
}

fn climb_args(order: usize, runs: usize, dot: Option<PathBuf>) -> ClimbArgs {
    ClimbArgs {
        order,
        iterations: 15,
        runs: NonZeroUsize::new(runs).expect("runs must be positive"),
        seed: Some(7),
        dot,
    }
}

#[rstest]
#[case(VerifyMode::Tuned, None, 0, 0)]
#[case(VerifyMode::Tuned, Some(0.1), 5, 10)]
#[case(VerifyMode::Chordal, None, 0, 0)]
#[case(VerifyMode::Chordal, Some(0.1), 5, 10)]
fn verification_counts_counterexamples_per_graph(
    #[case] mode: VerifyMode,
    #[case] threshold: Option<f64>,
    #[case] cycle: usize,
    #[case] star: usize,
) {
    let dir = temp_dir();
    let path = write_graph6(&dir, "order5.g6", ORDER_FIVE);
    let (result, text) = run_cli_capturing(verify_cli(mode, threshold, vec![path]));
    let reports = file_reports(result.expect("run succeeds"));
    assert_eq!(reports.len(), 1);
    assert_eq!(counterexample_count(&reports[0]), cycle + star);

    assert_eq!(text.lines().filter(|line| line.starts_with("Dhc ")).count(), cycle);
    assert_eq!(text.lines().filter(|line| line.starts_with("Ds_ ")).count(), star);
}

#[rstest]
fn counterexamples_render_as_name_and_pair() {
    let dir = temp_dir();
    let path = write_graph6(&dir, "order5.g6", ORDER_FIVE);
    let (result, text) = run_cli_capturing(verify_cli(VerifyMode::Tuned, Some(0.1), vec![path]));
    result.expect("run succeeds");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.first(), Some(&"Dhc 0 2"));
    assert_eq!(lines.get(5), Some(&"Ds_ 0 1"));
}

#[rstest]
fn missing_files_are_skipped_and_the_rest_run() {
    let dir = temp_dir();
    let missing = dir.path().join("missing.g6");
    let present = write_graph6(&dir, "order5.g6", ORDER_FIVE);
    let cli = verify_cli(VerifyMode::Tuned, Some(0.1), vec![missing.clone(), present]);

    let ((result, text), layer) = with_recording(|| run_cli_capturing(cli));
    let reports = file_reports(result.expect("a missing file is not fatal"));
    assert!(matches!(reports[0].outcome, FileOutcome::Skipped { .. }));
    assert_eq!(counterexample_count(&reports[1]), 15);
    assert_eq!(text.lines().count(), 1 + 15);
    assert_eq!(
        text.lines().next(),
        Some(format!("skipped {}", missing.display()).as_str())
    );

    let warnings = layer.events_with_message("skipping input");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].level, Level::WARN);
    assert_eq!(
        warnings[0].fields.get("code").map(String::as_str),
        Some("GRAPH6_SOURCE_OPEN")
    );
}

#[rstest]
fn lines_found_before_a_fatal_file_are_still_written() {
    let dir = temp_dir();
    let good = write_graph6(&dir, "good.g6", "Ds_\n");
    let bad = write_graph6(&dir, "bad.g6", "Dhc\nD!!\n");
    let (result, text) =
        run_cli_capturing(verify_cli(VerifyMode::Tuned, Some(0.1), vec![good, bad]));

    let err = result.expect_err("the second line of bad.g6 is malformed");
    assert!(matches!(
        err,
        CliError::Source(Graph6SourceError::Decode { line: 2, .. })
    ));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 10 + 5);
    assert_eq!(lines.first(), Some(&"Ds_ 0 1"));
    assert_eq!(lines.get(9), Some(&"Ds_ 3 4"));
    assert_eq!(lines.get(10), Some(&"Dhc 0 2"));
}

#[rstest]
fn output_failures_are_reported() {
    struct Broken;

    impl io::Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    let dir = temp_dir();
    let path = write_graph6(&dir, "order5.g6", ORDER_FIVE);
    let err = run_cli(
        verify_cli(VerifyMode::Tuned, Some(0.1), vec![path]),
        &mut Broken,
    )
    .expect_err("writing the first counterexample fails");
    assert!(matches!(err, CliError::Output(_)));
    assert_eq!(err.code(), None);
}

#[rstest]
fn empty_files_are_skipped() {
    let dir = temp_dir();
    let path = write_graph6(&dir, "empty.g6", "\n\n");
    let reports = file_reports(
        run_verify(
            VerifyMode::Tuned,
            VerifyArgs {
                threshold: None,
                paths: vec![path],
            },
            &mut io::sink(),
        )
        .expect("an empty file is not fatal"),
    );
    match &reports[0].outcome {
        FileOutcome::Skipped { reason } => assert!(reason.contains("contains no graphs")),
        FileOutcome::Verified(_) => panic!("empty file must be skipped"),
    }
}

#[rstest]
fn malformed_lines_abort_the_run() {
    let dir = temp_dir();
    let path = write_graph6(&dir, "bad.g6", "Dhc\nD!!\n");
    let err = run_cli_expecting_error(
        verify_cli(VerifyMode::Tuned, None, vec![path]),
        "malformed graph6 must fail",
    );
    assert!(matches!(
        err,
        CliError::Source(Graph6SourceError::Decode { line: 2, .. })
    ));
    assert_eq!(err.code(), Some("GRAPH6_SOURCE_DECODE"));
}

#[rstest]
fn mixed_orders_abort_the_run() {
    let dir = temp_dir();
    let path = write_graph6(&dir, "mixed.g6", "Dhc\nBw\n");
    let err = run_cli_expecting_error(
        verify_cli(VerifyMode::Tuned, None, vec![path]),
        "mixed orders must fail",
    );
    assert_eq!(err.code(), Some("GRAPH6_SOURCE_MIXED_ORDER"));
}

#[rstest]
fn untabled_orders_need_chordal_mode() {
    let dir = temp_dir();
    // C4
    let path = write_graph6(&dir, "order4.g6", "Cl\n");
    let err = run_cli_expecting_error(
        verify_cli(VerifyMode::Tuned, None, vec![path.clone()]),
        "order 4 has no tuned sizes",
    );
    assert!(matches!(
        err,
        CliError::Core(HamtoughError::UnsupportedOrder { order: 4 })
    ));
    assert_eq!(err.code(), Some("HAMTOUGH_UNSUPPORTED_ORDER"));

    let reports = file_reports(
        run_cli(verify_cli(VerifyMode::Chordal, None, vec![path]), &mut io::sink())
            .expect("chordal handles order 4"),
    );
    assert_eq!(counterexample_count(&reports[0]), 0);
}

#[rstest]
fn climb_runs_each_requested_run() {
    let dir = temp_dir();
    let dot = dir.path().join("best.dot");
    let (result, text) = run_cli_capturing(Cli {
        command: Command::Climb(climb_args(5, 3, Some(dot.clone()))),
    });
    let ExecutionSummary::Climb(outcomes) = result.expect("climb succeeds") else {
        panic!("expected a climb summary");
    };
    assert_eq!(outcomes.len(), 3);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    for (line, outcome) in lines.iter().zip(&outcomes) {
        assert_eq!(*line, outcome.to_string());
    }

    let written = fs::read_to_string(&dot).expect("DOT file was written");
    assert!(written.starts_with("graph G {\n"));
    assert!(written.ends_with("}\n"));
}

#[rstest]
fn climb_rejects_tiny_orders() {
    let err = run_cli_expecting_error(
        Cli {
            command: Command::Climb(climb_args(2, 1, None)),
        },
        "order 2 is below the minimum",
    );
    assert!(matches!(
        err,
        CliError::Core(HamtoughError::InvalidOrder { got: 2, min: 3 })
    ));
}

#[rstest]
fn toughest_prefers_the_earliest_of_equals() {
    let dir = temp_dir();
    let summary = run_cli(
        Cli {
            command: Command::Climb(climb_args(5, 2, Some(dir.path().join("g.dot")))),
        },
        &mut io::sink(),
    )
    .expect("climb succeeds");
    let ExecutionSummary::Climb(mut outcomes) = summary else {
        panic!("expected a climb summary");
    };
    outcomes[1] = outcomes[0].clone();
    outcomes[1].graph = Graph::new(5).expect("order 5 is valid");
    let best = toughest(&outcomes).expect("outcomes are not empty");
    assert_eq!(best, &outcomes[0]);
    assert!(toughest(&[]).is_none());
}

#[rstest]
fn clap_applies_climb_defaults() {
    let cli = Cli::try_parse_from(["hamtough", "climb", "--order", "8", "--iterations", "100"])
        .expect("arguments parse");
    let Command::Climb(args) = cli.command else {
        panic!("expected the climb command");
    };
    assert_eq!(args.runs.get(), 1);
    assert_eq!(args.seed, None);
    assert_eq!(args.dot, None);
}

#[rstest]
#[case(&["hamtough", "climb", "--order", "8", "--iterations", "10", "--runs", "0"])]
#[case(&["hamtough", "climb", "--order", "8"])]
#[case(&["hamtough", "exhaustive"])]
#[case(&["hamtough", "chordal", "--threshold", "steep", "a.g6"])]
fn clap_rejects_invalid_arguments(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

#[rstest]
fn clap_reads_thresholds_and_paths() {
    let cli = Cli::try_parse_from(["hamtough", "chordal", "--threshold", "1.5", "a.g6", "b.g6"])
        .expect("arguments parse");
    let Command::Chordal(args) = cli.command else {
        panic!("expected the chordal command");
    };
    assert_eq!(args.threshold, Some(1.5));
    assert_eq!(args.paths, vec![PathBuf::from("a.g6"), PathBuf::from("b.g6")]);
}
