//! Exhaustive verification of graph streams.
//!
//! For every pair of vertices in every graph the verifier looks for either a
//! Hamilton path joining the pair or a retained set whose obstruction ratio
//! falls below the configured threshold. Pairs with neither are reported as
//! counterexamples.

mod caches;


use std::{collections::BTreeMap, fmt, sync::Arc};

use tracing::{debug, info, instrument};

use crate::{
    Graph, SubsetCatalog, VertexPair, VertexSet,
    error::{HamtoughError, Result},
    telemetry,
    toughness::find_witness,
};

pub use self::caches::PairCaches;

/// Default threshold for the general verifier.
pub const DEFAULT_THRESHOLD: f64 = 2.0;
/// Default threshold for the chordal verifier.
pub const DEFAULT_CHORDAL_THRESHOLD: f64 = 1.75;

/// What happened to one graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphOutcome {
    /// The (n + 1)-closure is complete, so every pair is Hamilton-connected.
    Skipped,
    /// Every pair was examined; `counterexamples` lists those left unresolved.
    Checked {
        /// Pairs with neither a Hamilton path nor a witness.
        counterexamples: Vec<VertexPair>,
    },
}

impl GraphOutcome {
    /// Unresolved pairs; empty for skipped graphs.
    #[must_use]
    pub fn counterexamples(&self) -> &[VertexPair] {
        match self {
            Self::Skipped => &[],
            Self::Checked { counterexamples } => counterexamples,
        }
    }
}

/// Result of verifying one graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Verification {
    /// The verdict for the graph.
    pub outcome: GraphOutcome,
    /// Caches to hand to the next graph.
    pub caches: PairCaches,
}

/// A pair that is neither Hamilton-connected nor obstructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Counterexample {
    /// Name of the graph, usually its graph6 line.
    pub graph: Arc<str>,
    /// The unresolved pair.
    pub pair: VertexPair,
}

impl Counterexample {
    /// Names every unresolved pair of `outcome` after `graph`.
    #[must_use]
    pub fn from_outcome(graph: &Graph, outcome: &GraphOutcome) -> Vec<Self> {
        let pairs = outcome.counterexamples();
        if pairs.is_empty() {
            return Vec::new();
        }
        let name: Arc<str> = Arc::from(graph.name().as_ref());
        pairs
            .iter()
            .map(|&pair| Self {
                graph: Arc::clone(&name),
                pair,
            })
            .collect()
    }
}

impl fmt::Display for Counterexample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.graph, self.pair)
    }
}

/// Counts accumulated over a stream of graphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunTotals {
    graphs: usize,
    skipped: usize,
    counterexamples: usize,
}

impl RunTotals {
    /// Counts one graph's outcome.
    pub fn record(&mut self, outcome: &GraphOutcome) {
        self.graphs += 1;
        if matches!(outcome, GraphOutcome::Skipped) {
            self.skipped += 1;
        }
        self.counterexamples += outcome.counterexamples().len();
    }

    /// Number of graphs seen.
    #[must_use]
    pub const fn graphs(&self) -> usize {
        self.graphs
    }

    /// Number of graphs skipped by the closure test.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Number of unresolved pairs over all graphs.
    #[must_use]
    pub const fn counterexamples(&self) -> usize {
        self.counterexamples
    }
}

/// Totals accumulated over a stream of graphs, keeping every counterexample.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    totals: RunTotals,
    counterexamples: Vec<Counterexample>,
}

impl RunSummary {
    /// Folds one graph's outcome into the totals.
    pub fn record(&mut self, graph: &Graph, outcome: &GraphOutcome) {
        self.totals.record(outcome);
        self.counterexamples
            .extend(Counterexample::from_outcome(graph, outcome));
    }

    /// Counts without the counterexample list.
    #[must_use]
    pub const fn totals(&self) -> RunTotals {
        self.totals
    }

    /// Number of graphs seen.
    #[must_use]
    pub const fn graphs(&self) -> usize {
        self.totals.graphs
    }

    /// Number of graphs skipped by the closure test.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.totals.skipped
    }

    /// Every counterexample in stream order.
    #[must_use]
    pub fn counterexamples(&self) -> &[Counterexample] {
        &self.counterexamples
    }
}

/// Witnesses found earlier in the current graph, keyed by retained-set size.
type ReuseCache = BTreeMap<usize, Vec<VertexSet>>;

/// Checks every vertex pair of same-order graphs against a toughness
/// threshold.
///
/// # Examples
/// ```
/// use hamtough_core::{ExhaustiveVerifier, Graph, PairCaches};
///
/// let verifier = ExhaustiveVerifier::tuned(5, 2.0)?;
/// let c5 = Graph::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)])?;
/// let verification = verifier.verify(&c5, PairCaches::new())?;
/// assert!(verification.outcome.counterexamples().is_empty());
/// # Ok::<(), hamtough_core::HamtoughError>(())
/// ```
#[derive(Clone, Debug)]
pub struct ExhaustiveVerifier {
    catalog: SubsetCatalog,
    threshold: f64,
}

impl ExhaustiveVerifier {
    /// Creates a verifier scanning `catalog` with `threshold`.
    ///
    /// # Errors
    /// Returns [`HamtoughError::InvalidThreshold`] unless `threshold` is
    /// positive and finite.
    pub fn new(catalog: SubsetCatalog, threshold: f64) -> Result<Self> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(HamtoughError::InvalidThreshold { got: threshold });
        }
        Ok(Self { catalog, threshold })
    }

    /// General verifier using the tuned subset sizes for `order`.
    ///
    /// # Errors
    /// Returns [`HamtoughError::UnsupportedOrder`] when `order` has no tuned
    /// sizes, or [`HamtoughError::InvalidThreshold`].
    pub fn tuned(order: usize, threshold: f64) -> Result<Self> {
        Self::new(SubsetCatalog::tuned(order)?, threshold)
    }

    /// Chordal verifier scanning every retained-set size in `2..order`.
    ///
    /// # Errors
    /// Returns [`HamtoughError::OrderOutOfRange`] or
    /// [`HamtoughError::InvalidThreshold`].
    pub fn chordal(order: usize, threshold: f64) -> Result<Self> {
        Self::new(SubsetCatalog::exhaustive(order)?, threshold)
    }

    /// Order of the graphs this verifier accepts.
    #[must_use]
    pub fn order(&self) -> usize {
        self.catalog.order()
    }

    /// The toughness threshold.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The catalog scanned for witnesses.
    #[must_use]
    pub fn catalog(&self) -> &SubsetCatalog {
        &self.catalog
    }

    /// Verifies one graph, consuming the caches of the previous graph.
    ///
    /// Graphs whose (n + 1)-closure is complete are skipped and `previous`
    /// is handed back unchanged.
    ///
    /// # Errors
    /// Returns [`HamtoughError::OrderMismatch`] when the graph's order
    /// differs from the catalog's.
    #[instrument(
        name = "verifier.verify",
        err,
        skip(self, graph, previous),
        fields(graph = %graph.name(), order = graph.order(), threshold = self.threshold),
    )]
    pub fn verify(&self, graph: &Graph, previous: PairCaches) -> Result<Verification> {
        let order = self.order();
        if graph.order() != order {
            return Err(HamtoughError::OrderMismatch {
                expected: order,
                found: graph.order(),
            });
        }
        if graph.has_complete_closure(order + 1) {
            debug!("closure is complete, skipping graph");
            return Ok(Verification {
                outcome: GraphOutcome::Skipped,
                caches: previous,
            });
        }

        let mut caches = PairCaches::new();
        let mut reuse = ReuseCache::new();
        let mut counterexamples = Vec::new();
        for pair in VertexPair::all(order) {
            if !self.resolve(graph, pair, &previous, &mut caches, &mut reuse) {
                info!(
                    graph = %graph.name(),
                    p1 = pair.low(),
                    p2 = pair.high(),
                    "counterexample found"
                );
                counterexamples.push(pair);
            }
        }
        Ok(Verification {
            outcome: GraphOutcome::Checked { counterexamples },
            caches,
        })
    }

    /// Verifies a stream of graphs in order, threading caches between them.
    ///
    /// # Errors
    /// Stops at the first graph that [`verify`](Self::verify) rejects.
    pub fn verify_all<I>(&self, graphs: I) -> Result<RunSummary>
    where
        I: IntoIterator<Item = Graph>,
    {
        self.try_verify_all(graphs.into_iter().map(Ok))
    }

    /// Like [`verify_all`](Self::verify_all) for streams whose items may
    /// fail, such as graphs decoded from a file.
    ///
    /// # Errors
    /// Stops at the first failed item or the first graph that
    /// [`verify`](Self::verify) rejects.
    pub fn try_verify_all<I, E>(&self, graphs: I) -> std::result::Result<RunSummary, E>
    where
        I: IntoIterator<Item = std::result::Result<Graph, E>>,
        E: From<HamtoughError> + fmt::Display,
    {
        let mut summary = RunSummary::default();
        self.try_verify_each(graphs, |graph, outcome| {
            summary.record(graph, outcome);
            Ok(())
        })?;
        Ok(summary)
    }

    /// Verifies a fallible stream, handing each graph and its outcome to
    /// `on_graph` before the next item is pulled.
    ///
    /// Nothing but the counts is kept, so long streams run in constant
    /// memory and results can be written out as they are found.
    ///
    /// # Errors
    /// Stops at the first failed item, the first graph that
    /// [`verify`](Self::verify) rejects, or the first error from `on_graph`.
    ///
    /// # Examples
    /// ```
    /// use hamtough_core::{ExhaustiveVerifier, Graph, HamtoughError};
    ///
    /// let verifier = ExhaustiveVerifier::tuned(5, 0.1)?;
    /// let c5 = Graph::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)])?;
    /// let mut lines = Vec::new();
    /// let totals = verifier.try_verify_each([Ok::<_, HamtoughError>(c5)], |graph, outcome| {
    ///     for pair in outcome.counterexamples() {
    ///         lines.push(format!("{} {pair}", graph.name()));
    ///     }
    ///     Ok(())
    /// })?;
    /// assert_eq!(totals.counterexamples(), 5);
    /// assert_eq!(lines[0], "Dhc 0 2");
    /// # Ok::<(), HamtoughError>(())
    /// ```
    #[instrument(
        name = "verifier.verify_all",
        err,
        skip(self, graphs, on_graph),
        fields(order = self.order()),
    )]
    pub fn try_verify_each<I, E, F>(
        &self,
        graphs: I,
        mut on_graph: F,
    ) -> std::result::Result<RunTotals, E>
    where
        I: IntoIterator<Item = std::result::Result<Graph, E>>,
        E: From<HamtoughError> + fmt::Display,
        F: FnMut(&Graph, &GraphOutcome) -> std::result::Result<(), E>,
    {
        let mut totals = RunTotals::default();
        let mut caches = PairCaches::new();
        for graph in graphs {
            let graph = graph?;
            let Verification { outcome, caches: next } = self.verify(&graph, caches)?;
            totals.record(&outcome);
            on_graph(&graph, &outcome)?;
            caches = next;
        }
        info!(
            graphs = totals.graphs(),
            skipped = totals.skipped(),
            counterexamples = totals.counterexamples(),
            "verification finished"
        );
        Ok(totals)
    }

    /// Returns `true` once `pair` is shown Hamilton-connected or obstructed.
    fn resolve(
        &self,
        graph: &Graph,
        pair: VertexPair,
        previous: &PairCaches,
        caches: &mut PairCaches,
        reuse: &mut ReuseCache,
    ) -> bool {
        for masks in reuse.values() {
            if let Some(witness) = find_witness(graph, masks, pair, self.threshold) {
                caches.record_cut(pair, witness.retained);
                return true;
            }
        }

        match previous.hamilton_path(pair) {
            Some(path) if graph.check_hamilton_path(path) => {
                telemetry::record_hamilton_cache_hit();
                debug!(%pair, "reused Hamilton path from previous graph");
                caches.insert_hamilton_path(pair, path.clone());
                return true;
            }
            Some(_) => {}
            None => {
                let cached = previous
                    .cut(pair)
                    .filter(|cut| cut.universe() == graph.order());
                if let Some(cut) = cached
                    && let Some(witness) = find_witness(graph, &[cut], pair, self.threshold)
                {
                    telemetry::record_cut_cache_hit();
                    debug!(%pair, retained = %witness.retained, "reused cut from previous graph");
                    caches.record_cut(pair, witness.retained);
                    return true;
                }
            }
        }

        telemetry::record_hamilton_search();
        if let Some(path) = graph.find_hamilton_path(pair.low(), pair.high()) {
            caches.insert_hamilton_path(pair, path);
            return true;
        }

        for entry in self.catalog.entries() {
            if let Some(witness) = find_witness(graph, entry.masks(), pair, self.threshold) {
                caches.record_cut(pair, witness.retained);
                reuse.entry(entry.size()).or_default().push(witness.retained);
                return true;
            }
        }
        false
    }
}
