//! Seeded graph streams for benchmarks.

use hamtough_core::{EvolvingGraph, Graph};
use rand::{SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Configuration for [`random_graphs`].
#[derive(Clone, Debug)]
pub struct GraphStreamConfig {
    /// Number of vertices in every graph.
    pub order: usize,
    /// Number of graphs to generate.
    pub count: usize,
    /// Probability of each edge.
    pub edge_probability: f64,
    /// RNG seed.
    pub seed: u64,
}

/// Generates `config.count` random graphs of one order.
///
/// The same configuration always yields the same graphs.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] for an empty stream and
/// [`BenchSetupError::Core`] for an invalid order or probability.
pub fn random_graphs(config: &GraphStreamConfig) -> Result<Vec<Graph>, BenchSetupError> {
    if config.count == 0 {
        return Err(BenchSetupError::ZeroValue { context: "count" });
    }
    let mut rng = SmallRng::seed_from_u64(config.seed);
    (0..config.count)
        .map(|_| {
            EvolvingGraph::random(config.order, config.edge_probability, &mut rng)
                .map(EvolvingGraph::into_graph)
                .map_err(BenchSetupError::from)
        })
        .collect()
}

/// The cycle on `order` vertices with one chord from `0` to `order / 2`.
///
/// Hamilton paths exist for most pairs, so the search does real work without
/// exhausting the whole tree.
///
/// # Errors
/// Returns [`BenchSetupError::Core`] when `order` is out of range.
pub fn chorded_cycle(order: usize) -> Result<Graph, BenchSetupError> {
    let chord = (0, order / 2);
    let edges = (0..order).map(|v| (v, (v + 1) % order)).chain([chord]);
    Ok(Graph::from_edges(order, edges)?)
}
