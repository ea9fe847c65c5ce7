//! Simple undirected graphs stored as per-vertex neighbour bitsets.
//!
//! The order of a [`Graph`] is fixed at construction. Edge edits are
//! crate-private and only reachable through
//! [`EvolvingGraph`](crate::EvolvingGraph).

mod closure;
mod hamilton;


use std::{borrow::Cow, fmt, sync::Arc};

use crate::{
    error::{Graph6Error, HamtoughError, Result},
    graph6,
    vertex_set::{VertexSet, bit, low_bits},
};

pub use self::hamilton::HamiltonPath;

/// Largest supported order: the biggest graph whose graph6 header fits in one
/// byte.
pub const MAX_ORDER: usize = 62;

/// An undirected, loop-free simple graph on the vertices `0..order`.
///
/// # Examples
/// ```
/// use hamtough_core::Graph;
///
/// let path = Graph::from_edges(3, [(0, 1), (1, 2)])?;
/// assert_eq!(path.order(), 3);
/// assert_eq!(path.edge_count(), 2);
/// assert!(path.exists_hamilton_path(0, 2));
/// assert!(!path.exists_hamilton_path(0, 1));
/// # Ok::<(), hamtough_core::HamtoughError>(())
/// ```
#[derive(Clone)]
pub struct Graph {
    adjacency: Vec<u64>,
    label: Option<Arc<str>>,
}

impl Graph {
    /// Creates a graph with `order` isolated vertices.
    ///
    /// # Errors
    /// Returns [`HamtoughError::OrderOutOfRange`] when `order` exceeds
    /// [`MAX_ORDER`].
    pub fn new(order: usize) -> Result<Self> {
        if order > MAX_ORDER {
            return Err(HamtoughError::OrderOutOfRange {
                order,
                max: MAX_ORDER,
            });
        }
        Ok(Self::with_order(order))
    }

    /// Infallible constructor for callers that already validated `order`.
    pub(crate) fn with_order(order: usize) -> Self {
        debug_assert!(order <= MAX_ORDER);
        Self {
            adjacency: vec![0; order],
            label: None,
        }
    }

    /// Creates a graph from an edge list. Duplicate edges are merged.
    ///
    /// # Errors
    /// Returns [`HamtoughError::OrderOutOfRange`] for oversized orders and
    /// [`HamtoughError::InvalidEdge`] for self-loops or endpoints outside
    /// `0..order`.
    pub fn from_edges<I>(order: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::new(order)?;
        for (left, right) in edges {
            if left == right || left >= order || right >= order {
                return Err(HamtoughError::InvalidEdge { left, right, order });
            }
            graph.add_edge(left, right);
        }
        Ok(graph)
    }

    /// Decodes a graph6 line. The line becomes the graph's label.
    ///
    /// # Errors
    /// Propagates any [`Graph6Error`] raised by [`graph6::decode`].
    pub fn from_graph6(text: &str) -> core::result::Result<Self, Graph6Error> {
        graph6::decode(text)
    }

    /// Attaches a display label, typically the graph6 line it came from.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Arc<str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// The label attached at construction, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Display name: the label when present, otherwise the graph6 encoding.
    #[must_use]
    pub fn name(&self) -> Cow<'_, str> {
        match &self.label {
            Some(label) => Cow::Borrowed(label),
            None => Cow::Owned(graph6::encode(self)),
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn order(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        let twice: usize = self
            .adjacency
            .iter()
            .map(|row| row.count_ones() as usize)
            .sum();
        twice / 2
    }

    /// Degree of `v`, or zero when `v` is not a vertex.
    #[must_use]
    pub fn degree(&self, v: usize) -> usize {
        self.adjacency
            .get(v)
            .map_or(0, |row| row.count_ones() as usize)
    }

    /// Returns whether `u` and `v` are adjacent.
    #[must_use]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        v < self.order() && self.adjacency.get(u).is_some_and(|row| row & bit(v) != 0)
    }

    /// Neighbourhood of `v`. Empty when `v` is not a vertex.
    #[must_use]
    pub fn neighbours(&self, v: usize) -> VertexSet {
        VertexSet::from_bits(self.order(), self.adjacency.get(v).copied().unwrap_or(0))
    }

    /// Iterates over the edges as `(u, v)` with `u < v`, ordered by `u` then
    /// `v`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, &row)| {
            VertexSet::from_bits(self.order(), row & !low_bits(u + 1))
                .iter()
                .map(move |v| (u, v))
        })
    }

    /// Number of connected components. The empty graph has none.
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components_within(low_bits(self.order()))
    }

    /// Returns `true` when the graph has exactly one component.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.component_count() == 1
    }

    /// Vertices reachable from `start` using only vertices in `retained`.
    /// Empty when `start` itself is not retained.
    pub(crate) fn reach_within(&self, start: usize, retained: u64) -> u64 {
        let mut seen = bit(start) & retained;
        let mut frontier = seen;
        while frontier != 0 {
            let v = frontier.trailing_zeros() as usize;
            frontier &= frontier - 1;
            let fresh = self.adjacency[v] & retained & !seen;
            seen |= fresh;
            frontier |= fresh;
        }
        seen
    }

    /// Number of components of the subgraph induced by `retained`.
    pub(crate) fn components_within(&self, retained: u64) -> usize {
        let mut remaining = retained;
        let mut count = 0;
        while remaining != 0 {
            let v = remaining.trailing_zeros() as usize;
            remaining &= !self.reach_within(v, retained);
            count += 1;
        }
        count
    }

    pub(crate) fn row(&self, v: usize) -> u64 {
        self.adjacency[v]
    }

    pub(crate) fn add_edge(&mut self, u: usize, v: usize) {
        self.adjacency[u] |= bit(v);
        self.adjacency[v] |= bit(u);
        self.label = None;
    }

    pub(crate) fn remove_edge(&mut self, u: usize, v: usize) {
        self.adjacency[u] &= !bit(v);
        self.adjacency[v] &= !bit(u);
        self.label = None;
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.adjacency == other.adjacency
    }
}

impl Eq for Graph {}

impl fmt::Debug for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("order", &self.order())
            .field("edges", &self.edges().collect::<Vec<_>>())
            .field("label", &self.label)
            .finish()
    }
}
