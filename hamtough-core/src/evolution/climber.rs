//! Single-survivor hill climbing towards tough non-Hamiltonian graphs.
//!
//! Each generation samples [`MUTATIONS_PER_GENERATION`] edge toggles of the
//! current graph, keeps the fittest one if it is at least as tough as the
//! parent, and discards the rest.

use std::{fmt, sync::Arc};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use rand::rngs::SmallRng;
use tracing::{debug, info, instrument};

use super::{EvolvingGraph, MutationKind, rng::run_rng};
use crate::{
    Graph, SubsetCatalog, VertexSet,
    error::{HamtoughError, Result},
    graph6,
};

/// Edge toggles sampled per generation.
pub const MUTATIONS_PER_GENERATION: usize = 4;
/// Edge probability of the random seed graph.
pub const SEED_EDGE_PROBABILITY: f64 = 0.5;
/// Largest order for which [`CONVERGED_TOUGHNESS`] is known to be optimal.
pub const CONVERGENCE_MAX_ORDER: usize = 11;
/// Toughness at which a climb on a small order stops early.
pub const CONVERGED_TOUGHNESS: f64 = 2.25;
/// Smallest order with a connected graph lacking a 0 to n - 1 Hamilton path.
pub const MIN_ORDER: usize = 3;
/// Largest order a climb accepts; the catalog holds every retained set of
/// sizes `2..order`.
pub const MAX_CLIMB_ORDER: usize = 24;

const DEFAULT_ORDER: usize = 8;
const DEFAULT_ITERATION_BUDGET: usize = 10_000;

/// Returns whether a climb at `order` can stop with `toughness`.
///
/// # Examples
/// ```
/// use hamtough_core::has_converged;
///
/// assert!(has_converged(8, 2.25));
/// assert!(!has_converged(8, 2.0));
/// assert!(!has_converged(12, 3.0));
/// ```
#[must_use]
pub fn has_converged(order: usize, toughness: f64) -> bool {
    order <= CONVERGENCE_MAX_ORDER && toughness >= CONVERGED_TOUGHNESS
}

/// Returns whether `graph` may seed a climb: it is connected and has no
/// Hamilton path from `0` to `n - 1`.
#[must_use]
pub fn is_viable_seed(graph: &Graph) -> bool {
    let n = graph.order();
    n >= 2 && graph.is_connected() && !graph.exists_hamilton_path(0, n - 1)
}

/// Configures and constructs [`HillClimber`] instances.
///
/// # Examples
/// ```
/// use hamtough_core::HillClimbBuilder;
///
/// let outcome = HillClimbBuilder::new()
///     .with_order(5)
///     .with_iteration_budget(20)
///     .with_seed(11)
///     .build()
///     .expect("builder configuration is valid")
///     .run();
/// assert!(outcome.toughness >= outcome.seed_toughness);
/// ```
#[derive(Debug, Clone)]
pub struct HillClimbBuilder {
    order: usize,
    iteration_budget: usize,
    seed: Option<u64>,
}

impl Default for HillClimbBuilder {
    fn default() -> Self {
        Self {
            order: DEFAULT_ORDER,
            iteration_budget: DEFAULT_ITERATION_BUDGET,
            seed: None,
        }
    }
}

impl HillClimbBuilder {
    /// Creates a builder populated with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the graph order.
    #[must_use]
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Returns the configured graph order.
    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    /// Overrides the number of generations per run.
    #[must_use]
    pub fn with_iteration_budget(mut self, iterations: usize) -> Self {
        self.iteration_budget = iterations;
        self
    }

    /// Returns the configured number of generations per run.
    #[must_use]
    pub fn iteration_budget(&self) -> usize {
        self.iteration_budget
    }

    /// Fixes the base seed so runs are reproducible. Without a seed each run
    /// draws from OS entropy.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns the configured base seed.
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn validate(&self) -> Result<()> {
        if self.order < MIN_ORDER {
            return Err(HamtoughError::InvalidOrder {
                got: self.order,
                min: MIN_ORDER,
            });
        }
        if self.order > MAX_CLIMB_ORDER {
            return Err(HamtoughError::OrderOutOfRange {
                order: self.order,
                max: MAX_CLIMB_ORDER,
            });
        }
        if self.iteration_budget == 0 {
            return Err(HamtoughError::InvalidIterationBudget { got: 0 });
        }
        Ok(())
    }

    /// Validates the configuration and seeds a [`HillClimber`].
    ///
    /// # Errors
    /// Returns [`HamtoughError::InvalidOrder`] below [`MIN_ORDER`],
    /// [`HamtoughError::OrderOutOfRange`] above [`MAX_CLIMB_ORDER`], and
    /// [`HamtoughError::InvalidIterationBudget`] for a zero budget.
    #[instrument(
        name = "climb.build",
        err,
        skip(self),
        fields(order = self.order, iterations = self.iteration_budget),
    )]
    pub fn build(self) -> Result<HillClimber> {
        self.validate()?;
        let catalog = Arc::new(SubsetCatalog::exhaustive(self.order)?);
        Ok(HillClimber::seeded(
            self.iteration_budget,
            catalog,
            run_rng(self.seed, 0),
        ))
    }

    /// Runs `runs` independent climbs and returns their outcomes in run
    /// order. Run `i` draws from its own RNG derived from the base seed and
    /// `i`, so `run_batch(1)` reproduces `build()?.run()`.
    ///
    /// # Errors
    /// Returns the same configuration errors as [`build`](Self::build).
    #[instrument(
        name = "climb.run_batch",
        err,
        skip(self),
        fields(order = self.order, iterations = self.iteration_budget, runs = runs),
    )]
    pub fn run_batch(self, runs: usize) -> Result<Vec<HillClimbOutcome>> {
        self.validate()?;
        let catalog = Arc::new(SubsetCatalog::exhaustive(self.order)?);
        let budget = self.iteration_budget;
        let seed = self.seed;
        let run_one = |idx: usize| {
            HillClimber::seeded(budget, Arc::clone(&catalog), run_rng(seed, idx)).run()
        };

        #[cfg(feature = "parallel")]
        let outcomes = (0..runs).into_par_iter().map(run_one).collect();
        #[cfg(not(feature = "parallel"))]
        let outcomes = (0..runs).map(run_one).collect();

        Ok(outcomes)
    }
}

/// Final state of one climb.
#[derive(Clone, Debug, PartialEq)]
pub struct HillClimbOutcome {
    /// graph6 encoding of the seed graph.
    pub seed_graph6: String,
    /// Fitness of the seed graph.
    pub seed_toughness: f64,
    /// The surviving graph.
    pub graph: Graph,
    /// Fitness of the surviving graph.
    pub toughness: f64,
    /// Generation index of the last strict improvement, `0` if none.
    pub last_improvement: usize,
    /// Generations executed.
    pub iterations: usize,
}

impl HillClimbOutcome {
    /// graph6 encoding of the surviving graph.
    #[must_use]
    pub fn final_graph6(&self) -> String {
        graph6::encode(&self.graph)
    }
}

impl fmt::Display for HillClimbOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{:.5},{},{:.5},{}",
            self.seed_graph6,
            self.seed_toughness,
            self.final_graph6(),
            self.toughness,
            self.last_improvement
        )
    }
}

/// One running climb.
#[derive(Debug)]
pub struct HillClimber {
    graph: EvolvingGraph,
    catalog: Arc<SubsetCatalog>,
    rng: SmallRng,
    iteration_budget: usize,
    seed_graph6: String,
    seed_toughness: f64,
    toughness: f64,
    best_cut: Option<VertexSet>,
}

impl HillClimber {
    fn seeded(iteration_budget: usize, catalog: Arc<SubsetCatalog>, mut rng: SmallRng) -> Self {
        let order = catalog.order();
        let graph = loop {
            let candidate = EvolvingGraph::random_unchecked(order, SEED_EDGE_PROBABILITY, &mut rng);
            if is_viable_seed(candidate.graph()) {
                break candidate;
            }
        };
        let fitness = graph.solve_mutation(&catalog, 0.0, None, MutationKind::Addition);
        let seed_graph6 = graph.to_graph6();
        debug!(seed = %seed_graph6, toughness = fitness.toughness, "seed graph chosen");
        Self {
            graph,
            catalog,
            rng,
            iteration_budget,
            seed_graph6,
            seed_toughness: fitness.toughness,
            toughness: fitness.toughness,
            best_cut: fitness.cut,
        }
    }

    /// The current survivor.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        self.graph.graph()
    }

    /// Fitness of the current survivor.
    #[must_use]
    pub fn toughness(&self) -> f64 {
        self.toughness
    }

    /// Fitness of the seed graph.
    #[must_use]
    pub fn seed_toughness(&self) -> f64 {
        self.seed_toughness
    }

    /// Retained set behind the current fitness, when known.
    #[must_use]
    pub fn best_cut(&self) -> Option<VertexSet> {
        self.best_cut
    }

    /// Runs one generation. Returns `true` when a mutation was kept.
    ///
    /// Candidates qualify when at least as tough as the survivor; the first
    /// strictly toughest qualifying candidate wins. The best cut is replaced
    /// whenever a candidate is strictly tougher than the survivor.
    pub fn next_generation(&mut self) -> bool {
        let mut winner = None;
        let mut winning_toughness = 0.0_f64;
        for _ in 0..MUTATIONS_PER_GENERATION {
            let Some(mutation) = self.graph.mutate(&mut self.rng) else {
                break;
            };
            let fitness =
                self.graph
                    .solve_mutation(&self.catalog, self.toughness, self.best_cut, mutation.kind());
            if fitness.toughness >= self.toughness && fitness.toughness > winning_toughness {
                if fitness.toughness > self.toughness {
                    self.best_cut = fitness.cut;
                }
                winning_toughness = fitness.toughness;
                winner = Some(mutation);
            }
            self.graph.undo(&mutation);
        }

        let Some(mutation) = winner else {
            return false;
        };
        self.graph.perform(&mutation);
        self.toughness = winning_toughness;
        debug!(
            kind = ?mutation.kind(),
            u = mutation.pair().low(),
            v = mutation.pair().high(),
            toughness = self.toughness,
            "mutation kept"
        );
        true
    }

    /// Runs generations until the budget is spent or the climb converges.
    #[instrument(
        name = "climb.run",
        skip(self),
        fields(order = self.catalog.order(), iterations = self.iteration_budget),
    )]
    pub fn run(mut self) -> HillClimbOutcome {
        let order = self.catalog.order();
        let mut previous = self.toughness;
        let mut last_improvement = 0;
        let mut iterations = 0;
        for iteration in 0..self.iteration_budget {
            iterations = iteration + 1;
            let changed = self.next_generation();
            if changed && self.toughness > previous {
                previous = self.toughness;
                last_improvement = iteration;
            }
            if has_converged(order, self.toughness) {
                break;
            }
        }
        info!(
            seed = %self.seed_graph6,
            toughness = self.toughness,
            last_improvement,
            iterations,
            "climb finished"
        );
        HillClimbOutcome {
            seed_graph6: self.seed_graph6,
            seed_toughness: self.seed_toughness,
            graph: self.graph.into_graph(),
            toughness: self.toughness,
            last_improvement,
            iterations,
        }
    }
}
