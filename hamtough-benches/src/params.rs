//! Benchmark parameter types.

use std::fmt;

/// Parameters for a per-graph benchmark.
#[derive(Clone, Debug)]
pub struct GraphBenchParams {
    /// Number of vertices.
    pub order: usize,
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.order)
    }
}

/// Parameters for a verification benchmark.
#[derive(Clone, Debug)]
pub struct VerifyBenchParams {
    /// Number of vertices.
    pub order: usize,
    /// Graphs in the stream.
    pub graphs: usize,
    /// Toughness threshold.
    pub threshold: f64,
}

impl fmt::Display for VerifyBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "n={},graphs={},t={}",
            self.order, self.graphs, self.threshold
        )
    }
}
