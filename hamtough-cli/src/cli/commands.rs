//! Command implementations and argument parsing for the hamtough CLI.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    iter,
    num::NonZeroUsize,
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand};
use hamtough_core::{
    DEFAULT_CHORDAL_THRESHOLD, DEFAULT_THRESHOLD, ExhaustiveVerifier, HamtoughError,
    Graph, GraphOutcome, HillClimbBuilder, HillClimbOutcome, RunTotals, dot::write_dot,
};
use hamtough_providers_graph6::{Graph6Source, Graph6SourceError};
use thiserror::Error;
use tracing::{Span, field, info, instrument, warn};

const DEFAULT_RUNS: NonZeroUsize = NonZeroUsize::MIN;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "hamtough",
    about = "Check graph toughness against Hamilton-connectedness."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Verify graph6 files using the tuned retained-set sizes.
    Exhaustive(VerifyArgs),
    /// Verify graph6 files scanning every retained-set size.
    Chordal(VerifyArgs),
    /// Hill-climb towards tough graphs without a 0 to n-1 Hamilton path.
    Climb(ClimbArgs),
}

/// Options accepted by `exhaustive` and `chordal`.
#[derive(Debug, Args, Clone)]
pub struct VerifyArgs {
    /// Toughness threshold (defaults to 2.0, or 1.75 for `chordal`).
    #[arg(long)]
    pub threshold: Option<f64>,

    /// graph6 files, one graph per line, all graphs of one file sharing an
    /// order.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

/// Options accepted by `climb`.
#[derive(Debug, Args, Clone)]
pub struct ClimbArgs {
    /// Number of vertices.
    #[arg(long)]
    pub order: usize,

    /// Generations per run.
    #[arg(long)]
    pub iterations: usize,

    /// Independent runs.
    #[arg(long, default_value_t = DEFAULT_RUNS)]
    pub runs: NonZeroUsize,

    /// Base seed; runs draw from OS entropy when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write the toughest final graph to this file in DOT format.
    #[arg(long)]
    pub dot: Option<PathBuf>,
}

/// Retained-set sizes scanned by a verification command.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VerifyMode {
    /// The per-order tuned sizes.
    Tuned,
    /// Every size in `2..order`.
    Chordal,
}

impl VerifyMode {
    const fn label(self) -> &'static str {
        match self {
            Self::Tuned => "exhaustive",
            Self::Chordal => "chordal",
        }
    }

    /// Threshold used when none is given.
    #[must_use]
    pub const fn default_threshold(self) -> f64 {
        match self {
            Self::Tuned => DEFAULT_THRESHOLD,
            Self::Chordal => DEFAULT_CHORDAL_THRESHOLD,
        }
    }

    fn verifier(self, order: usize, threshold: f64) -> Result<ExhaustiveVerifier, HamtoughError> {
        match self {
            Self::Tuned => ExhaustiveVerifier::tuned(order, threshold),
            Self::Chordal => ExhaustiveVerifier::chordal(order, threshold),
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Writing the DOT file failed.
    #[error("failed to write `{path}`: {source}")]
    Dot {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Writing results to the output stream failed.
    #[error("failed to write results: {0}")]
    Output(#[source] io::Error),
    /// Reading a graph6 stream failed.
    #[error(transparent)]
    Source(#[from] Graph6SourceError),
    /// The core rejected the configuration or a graph.
    #[error(transparent)]
    Core(#[from] HamtoughError),
}

impl CliError {
    /// Stable code of the underlying library error, if any.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Dot { .. } | Self::Output(_) => None,
            Self::Source(err) => Some(err.code().as_str()),
            Self::Core(err) => Some(err.code().as_str()),
        }
    }
}

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    /// The file could not be read and was left out.
    Skipped {
        /// Why the file was left out.
        reason: String,
    },
    /// Every graph in the file was verified.
    Verified(RunTotals),
}

/// Outcome for one input file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    /// The input path.
    pub path: PathBuf,
    /// What happened to it.
    pub outcome: FileOutcome,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionSummary {
    /// Per-file results of `exhaustive` or `chordal`.
    Verification(Vec<FileReport>),
    /// One outcome per `climb` run.
    Climb(Vec<HillClimbOutcome>),
}

/// Executes the CLI command represented by `cli`, writing results to `out`
/// as they are produced.
///
/// Verification writes one `<graph> <p1> <p2>` line per counterexample as
/// soon as its graph is checked, and a `skipped <path>` line per unreadable
/// file. Climbs write one
/// `<seed>,<seed toughness>,<final>,<toughness>,<last improvement>` line per
/// run. Lines written before an error stay written.
///
/// # Errors
/// Returns [`CliError`] when a configuration is rejected, a file holds
/// malformed or mixed-order graph6, writing to `out` fails, or the DOT file
/// cannot be written. Files that cannot be opened or hold no graphs are
/// skipped, not errors.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use hamtough_cli::cli::{Cli, Command, ExecutionSummary, VerifyArgs, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "Dhc\n")?;
/// let cli = Cli {
///     command: Command::Exhaustive(VerifyArgs {
///         threshold: Some(0.1),
///         paths: vec![file.path().to_path_buf()],
///     }),
/// };
/// let mut out = Vec::new();
/// let ExecutionSummary::Verification(files) = run_cli(cli, &mut out)? else {
///     unreachable!("exhaustive produces a verification summary");
/// };
/// assert_eq!(files.len(), 1);
/// assert_eq!(String::from_utf8(out)?.lines().next(), Some("Dhc 0 2"));
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli, out), fields(command = field::Empty))]
pub fn run_cli<W: Write>(cli: Cli, out: &mut W) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    match cli.command {
        Command::Exhaustive(args) => {
            span.record("command", field::display(VerifyMode::Tuned.label()));
            run_verify(VerifyMode::Tuned, args, out)
        }
        Command::Chordal(args) => {
            span.record("command", field::display(VerifyMode::Chordal.label()));
            run_verify(VerifyMode::Chordal, args, out)
        }
        Command::Climb(args) => {
            span.record("command", field::display("climb"));
            run_climb(args, out)
        }
    }
}

pub(super) fn run_verify<W: Write>(
    mode: VerifyMode,
    args: VerifyArgs,
    out: &mut W,
) -> Result<ExecutionSummary, CliError> {
    let threshold = args.threshold.unwrap_or(mode.default_threshold());
    let mut reports = Vec::with_capacity(args.paths.len());
    for path in args.paths {
        let outcome = verify_file(mode, threshold, &path, out)?;
        if matches!(outcome, FileOutcome::Skipped { .. }) {
            writeln!(out, "skipped {}", path.display()).map_err(CliError::Output)?;
        }
        reports.push(FileReport { path, outcome });
    }
    Ok(ExecutionSummary::Verification(reports))
}

#[instrument(
    name = "cli.verify_file",
    err,
    skip(mode, path, out),
    fields(mode = mode.label(), path = %path.display()),
)]
pub(super) fn verify_file<W: Write>(
    mode: VerifyMode,
    threshold: f64,
    path: &Path,
    out: &mut W,
) -> Result<FileOutcome, CliError> {
    let mut source = match Graph6Source::open(path) {
        Ok(source) => source,
        Err(err) if err.is_unavailable() => return Ok(skip_file(path, &err)),
        Err(err) => return Err(err.into()),
    };
    let first = match source.next() {
        Some(Ok(graph)) => graph,
        Some(Err(err)) if err.is_unavailable() => return Ok(skip_file(path, &err)),
        Some(Err(err)) => return Err(err.into()),
        None => {
            return Ok(FileOutcome::Skipped {
                reason: "no graphs".to_owned(),
            });
        }
    };
    let verifier = mode.verifier(first.order(), threshold)?;
    let graphs = iter::once(Ok(first)).chain(source.map(|graph| graph.map_err(CliError::from)));
    let totals = verifier.try_verify_each(graphs, |graph, outcome| {
        write_counterexamples(&mut *out, graph, outcome)
    })?;
    info!(
        graphs = totals.graphs(),
        skipped = totals.skipped(),
        counterexamples = totals.counterexamples(),
        "file verified"
    );
    Ok(FileOutcome::Verified(totals))
}

fn write_counterexamples<W: Write>(
    out: &mut W,
    graph: &Graph,
    outcome: &GraphOutcome,
) -> Result<(), CliError> {
    let pairs = outcome.counterexamples();
    if pairs.is_empty() {
        return Ok(());
    }
    let name = graph.name();
    for pair in pairs {
        writeln!(out, "{name} {pair}").map_err(CliError::Output)?;
    }
    Ok(())
}

fn skip_file(path: &Path, err: &Graph6SourceError) -> FileOutcome {
    warn!(
        path = %path.display(),
        code = err.code().as_str(),
        error = %err,
        "skipping input"
    );
    FileOutcome::Skipped {
        reason: err.to_string(),
    }
}

#[instrument(
    name = "cli.climb",
    err,
    skip(args, out),
    fields(order = args.order, iterations = args.iterations, runs = args.runs.get()),
)]
pub(super) fn run_climb<W: Write>(
    args: ClimbArgs,
    out: &mut W,
) -> Result<ExecutionSummary, CliError> {
    let mut builder = HillClimbBuilder::new()
        .with_order(args.order)
        .with_iteration_budget(args.iterations);
    if let Some(seed) = args.seed {
        builder = builder.with_seed(seed);
    }
    let outcomes = builder.run_batch(args.runs.get())?;
    for outcome in &outcomes {
        writeln!(out, "{outcome}").map_err(CliError::Output)?;
    }
    if let Some(path) = args.dot.as_deref()
        && let Some(best) = toughest(&outcomes)
    {
        write_dot_file(path, best)?;
    }
    Ok(ExecutionSummary::Climb(outcomes))
}

/// The outcome with the highest final toughness; the earliest run wins ties.
pub(super) fn toughest(outcomes: &[HillClimbOutcome]) -> Option<&HillClimbOutcome> {
    outcomes.iter().reduce(|best, outcome| {
        if outcome.toughness > best.toughness {
            outcome
        } else {
            best
        }
    })
}

fn write_dot_file(path: &Path, outcome: &HillClimbOutcome) -> Result<(), CliError> {
    let to_error = |source| CliError::Dot {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    write_dot(&outcome.graph, &mut writer).map_err(to_error)?;
    writer.flush().map_err(to_error)?;
    info!(path = %path.display(), toughness = outcome.toughness, "wrote DOT graph");
    Ok(())
}
