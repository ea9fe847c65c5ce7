//! Mutable graphs for the evolutionary search.
//!
//! An [`EvolvingGraph`] owns one [`Graph`] and changes it one edge at a time.
//! Fitness is judged on the pair `(0, n - 1)`: the lowest obstruction ratio
//! over a [`SubsetCatalog`], with a Hamilton path disqualifying a candidate
//! outright.

mod climber;
mod rng;


use rand::Rng;

use crate::{
    Graph, MAX_ORDER, SubsetCatalog, VertexPair, VertexSet,
    error::{HamtoughError, Result},
    graph6, telemetry,
    toughness::pair_ratio,
};

pub use self::climber::{
    CONVERGED_TOUGHNESS, CONVERGENCE_MAX_ORDER, HillClimbBuilder, HillClimbOutcome, HillClimber,
    MAX_CLIMB_ORDER, MIN_ORDER, MUTATIONS_PER_GENERATION, SEED_EDGE_PROBABILITY, has_converged,
    is_viable_seed,
};

/// Whether a mutation adds or removes an edge.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MutationKind {
    /// A missing edge is inserted.
    Addition,
    /// An existing edge is deleted.
    Removal,
}

/// A single edge toggle, as produced by [`EvolvingGraph::mutate`].
///
/// Only `mutate` builds these, so the pair always names two distinct
/// vertices of the graph it was drawn from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Mutation {
    kind: MutationKind,
    pair: VertexPair,
}

impl Mutation {
    /// Direction of the toggle.
    #[must_use]
    pub const fn kind(&self) -> MutationKind {
        self.kind
    }

    /// The edge toggled.
    #[must_use]
    pub const fn pair(&self) -> VertexPair {
        self.pair
    }

    /// The mutation that reverses this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let kind = match self.kind {
            MutationKind::Addition => MutationKind::Removal,
            MutationKind::Removal => MutationKind::Addition,
        };
        Self {
            kind,
            pair: self.pair,
        }
    }
}

/// Lowest obstruction ratio found for the pair `(0, n - 1)` and the retained
/// set achieving it.
///
/// `toughness == 0.0` with no cut means an edge addition created a Hamilton
/// path; `f64::INFINITY` with no cut means no retained set produced a ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fitness {
    /// The ratio, or the sentinels described above.
    pub toughness: f64,
    /// Retained set achieving `toughness`.
    pub cut: Option<VertexSet>,
}

impl Fitness {
    const UNBOUNDED: Self = Self {
        toughness: f64::INFINITY,
        cut: None,
    };

    const DISQUALIFIED: Self = Self {
        toughness: 0.0,
        cut: None,
    };

    fn consider(&mut self, graph: &Graph, retained: VertexSet, pair: VertexPair) {
        if let Some(ratio) = pair_ratio(graph, retained, pair)
            && ratio < self.toughness
        {
            self.toughness = ratio;
            self.cut = Some(retained);
        }
    }
}

/// A graph that mutates in place.
///
/// # Examples
/// ```
/// use hamtough_core::EvolvingGraph;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(3);
/// let mut evolving = EvolvingGraph::random(6, 0.5, &mut rng)?;
/// let before = evolving.graph().clone();
/// let mutation = evolving.mutate(&mut rng).expect("order 6 has toggles");
/// assert_ne!(evolving.graph(), &before);
/// evolving.undo(&mutation);
/// assert_eq!(evolving.graph(), &before);
/// # Ok::<(), hamtough_core::HamtoughError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvolvingGraph {
    graph: Graph,
}

impl EvolvingGraph {
    /// Wraps an existing graph.
    #[must_use]
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }

    /// Samples a graph where each of the `C(order, 2)` edges is present
    /// independently with probability `edge_probability`.
    ///
    /// # Errors
    /// Returns [`HamtoughError::OrderOutOfRange`] above [`MAX_ORDER`] and
    /// [`HamtoughError::InvalidEdgeProbability`] outside `[0, 1]`.
    pub fn random<R: Rng + ?Sized>(
        order: usize,
        edge_probability: f64,
        rng: &mut R,
    ) -> Result<Self> {
        if order > MAX_ORDER {
            return Err(HamtoughError::OrderOutOfRange {
                order,
                max: MAX_ORDER,
            });
        }
        if !(0.0..=1.0).contains(&edge_probability) {
            return Err(HamtoughError::InvalidEdgeProbability {
                got: edge_probability,
            });
        }
        Ok(Self::random_unchecked(order, edge_probability, rng))
    }

    pub(crate) fn random_unchecked<R: Rng + ?Sized>(
        order: usize,
        edge_probability: f64,
        rng: &mut R,
    ) -> Self {
        let mut graph = Graph::with_order(order);
        for j in 1..order {
            for i in 0..j {
                if rng.gen_bool(edge_probability) {
                    graph.add_edge(i, j);
                }
            }
        }
        Self { graph }
    }

    /// The current graph.
    #[must_use]
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Consumes the wrapper, returning the graph.
    #[must_use]
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Applies a random edge toggle and returns it.
    ///
    /// A fair coin picks addition or removal; ordered vertex pairs are then
    /// drawn uniformly until one admits that toggle. When the graph is
    /// complete (or empty) the other kind is used. Returns `None` on graphs
    /// with fewer than two vertices.
    pub fn mutate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Mutation> {
        let n = self.graph.order();
        if n < 2 {
            return None;
        }
        let edges = self.graph.edge_count();
        let mut kind = if rng.gen_bool(0.5) {
            MutationKind::Addition
        } else {
            MutationKind::Removal
        };
        if kind == MutationKind::Addition && edges == n * (n - 1) / 2 {
            kind = MutationKind::Removal;
        } else if kind == MutationKind::Removal && edges == 0 {
            kind = MutationKind::Addition;
        }
        let wants_edge = kind == MutationKind::Removal;
        let pair = loop {
            let x = rng.gen_range(0..n);
            let y = rng.gen_range(0..n);
            if x != y && self.graph.has_edge(x, y) == wants_edge {
                break VertexPair::new(x, y);
            }
        };
        let mutation = Mutation { kind, pair };
        self.perform(&mutation);
        Some(mutation)
    }

    /// Applies `mutation`.
    ///
    /// # Panics
    /// Panics if `mutation` was drawn from a graph with more vertices than
    /// this one.
    pub fn perform(&mut self, mutation: &Mutation) {
        let (u, v) = (mutation.pair.low(), mutation.pair.high());
        match mutation.kind {
            MutationKind::Addition => self.graph.add_edge(u, v),
            MutationKind::Removal => self.graph.remove_edge(u, v),
        }
    }

    /// Reverses `mutation`.
    pub fn undo(&mut self, mutation: &Mutation) {
        self.perform(&mutation.inverse());
    }

    /// Scores the current graph on the pair `(0, n - 1)`.
    ///
    /// The previous best cut is tried first. For additions a Hamilton path
    /// between `0` and `n - 1` disqualifies the graph with fitness `0`. Then
    /// every catalog mask is scanned for the lowest ratio. The scan stops as
    /// soon as the running minimum drops strictly below `required`, since the
    /// candidate can no longer compete.
    #[must_use]
    pub fn solve_mutation(
        &self,
        catalog: &SubsetCatalog,
        required: f64,
        previous_cut: Option<VertexSet>,
        kind: MutationKind,
    ) -> Fitness {
        let n = self.graph.order();
        if n < 2 {
            return Fitness::UNBOUNDED;
        }
        let pair = VertexPair::new(0, n - 1);
        let mut best = Fitness::UNBOUNDED;

        if let Some(cut) = previous_cut.filter(|cut| cut.universe() == n) {
            best.consider(&self.graph, cut, pair);
            if best.toughness < required {
                return best;
            }
        }

        if kind == MutationKind::Addition && self.graph.exists_hamilton_path(0, n - 1) {
            return Fitness::DISQUALIFIED;
        }

        telemetry::record_toughness_scan();
        for retained in catalog.masks() {
            best.consider(&self.graph, retained, pair);
            if best.toughness < required {
                break;
            }
        }
        best
    }

    /// Encodes the current edge set as graph6.
    #[must_use]
    pub fn to_graph6(&self) -> String {
        graph6::encode(&self.graph)
    }
}
