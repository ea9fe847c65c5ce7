//! Per-graph caches handed from one verified graph to the next.

use std::collections::HashMap;

use crate::{HamiltonPath, VertexPair, VertexSet};

/// Hamilton paths and cuts recorded while verifying one graph.
///
/// Consecutive graphs in an enumeration stream tend to share structure, so a
/// path or cut that resolved a pair in the previous graph is tried first on
/// the next one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PairCaches {
    hamilton: HashMap<VertexPair, HamiltonPath>,
    cuts: HashMap<VertexPair, VertexSet>,
}

impl PairCaches {
    /// Creates empty caches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded Hamilton path for `pair`.
    #[must_use]
    pub fn hamilton_path(&self, pair: VertexPair) -> Option<&HamiltonPath> {
        self.hamilton.get(&pair)
    }

    /// Recorded retained set for `pair`.
    #[must_use]
    pub fn cut(&self, pair: VertexPair) -> Option<VertexSet> {
        self.cuts.get(&pair).copied()
    }

    /// Records a Hamilton path, replacing any earlier one for `pair`.
    pub fn insert_hamilton_path(&mut self, pair: VertexPair, path: HamiltonPath) {
        self.hamilton.insert(pair, path);
    }

    /// Records a retained set for `pair` unless one is already present.
    /// Returns `true` when the set was stored.
    pub fn record_cut(&mut self, pair: VertexPair, retained: VertexSet) -> bool {
        let mut stored = false;
        self.cuts.entry(pair).or_insert_with(|| {
            stored = true;
            retained
        });
        stored
    }

    /// Pairs with a recorded Hamilton path, in ascending order.
    #[must_use]
    pub fn hamilton_pairs(&self) -> Vec<VertexPair> {
        let mut pairs: Vec<_> = self.hamilton.keys().copied().collect();
        pairs.sort_unstable();
        pairs
    }

    /// Pairs with a recorded cut, in ascending order.
    #[must_use]
    pub fn cut_pairs(&self) -> Vec<VertexPair> {
        let mut pairs: Vec<_> = self.cuts.keys().copied().collect();
        pairs.sort_unstable();
        pairs
    }

    /// Returns `true` when neither cache holds an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hamilton.is_empty() && self.cuts.is_empty()
    }
}
