//! Shared test utilities for `hamtough-core`.

use hamtough_test_support::property::ProptestRunProfile;
use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use test_strategy::Arbitrary;

use crate::Graph;

/// Builds a standard proptest configuration from the shared run profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `HAMTOUGH_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// The cycle `0 - 1 - ... - (n-1) - 0`.
pub(crate) fn cycle(n: usize) -> Graph {
    Graph::from_edges(n, (0..n).map(|v| (v, (v + 1) % n))).expect("cycle edges are valid")
}

/// The path `0 - 1 - ... - (n-1)`.
pub(crate) fn path(n: usize) -> Graph {
    Graph::from_edges(n, (1..n).map(|v| (v - 1, v))).expect("path edges are valid")
}

/// The complete graph on `n` vertices.
pub(crate) fn complete(n: usize) -> Graph {
    Graph::from_edges(n, (0..n).flat_map(|u| ((u + 1)..n).map(move |v| (u, v))))
        .expect("complete graph edges are valid")
}

/// The star with centre `0` and `leaves` leaves.
pub(crate) fn star(leaves: usize) -> Graph {
    Graph::from_edges(leaves + 1, (1..=leaves).map(|v| (0, v))).expect("star edges are valid")
}

/// Two disjoint copies of `K_size` on `0..size` and `size..2*size`.
pub(crate) fn two_cliques(size: usize) -> Graph {
    let edges = (0..size).flat_map(|u| {
        ((u + 1)..size).flat_map(move |v| [(u, v), (u + size, v + size)])
    });
    Graph::from_edges(2 * size, edges).expect("clique edges are valid")
}

/// Graph families with known Hamilton-path structure.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(crate) enum GraphFamily {
    #[weight(2)]
    Cycle,
    Path,
    Complete,
    Star,
}

impl GraphFamily {
    /// Builds the family member on `n` vertices. The star's centre is `0`.
    pub(crate) fn build(self, n: usize) -> Graph {
        match self {
            Self::Cycle => cycle(n),
            Self::Path => path(n),
            Self::Complete => complete(n),
            Self::Star => star(n - 1),
        }
    }

    /// Whether the member on `n >= 4` vertices has a Hamilton path joining
    /// `low < high`.
    pub(crate) fn joins(self, n: usize, low: usize, high: usize) -> bool {
        match self {
            Self::Cycle => high - low == 1 || (low == 0 && high == n - 1),
            Self::Path => low == 0 && high == n - 1,
            Self::Complete => true,
            Self::Star => false,
        }
    }
}

/// Strategy producing arbitrary graphs with order in `orders`.
pub(crate) fn arbitrary_graph(
    orders: std::ops::RangeInclusive<usize>,
) -> impl Strategy<Value = Graph> {
    orders.prop_flat_map(|n| {
        let pairs = n * n.saturating_sub(1) / 2;
        proptest::collection::vec(any::<bool>(), pairs).prop_map(move |bits| {
            let mut graph = Graph::with_order(n);
            let mut flags = bits.into_iter();
            for v in 1..n {
                for u in 0..v {
                    if flags.next().unwrap_or(false) {
                        graph.add_edge(u, v);
                    }
                }
            }
            graph
        })
    })
}
