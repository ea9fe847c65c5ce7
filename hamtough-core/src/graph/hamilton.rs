//! Exact Hamilton-path search.

use super::Graph;
use crate::vertex_set::bit;

/// An ordered sequence of vertices visiting every vertex of a graph once.
///
/// Paths are produced by [`Graph::find_hamilton_path`] or carried over from a
/// previous graph; [`Graph::check_hamilton_path`] re-validates a path
/// against the current edge set.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct HamiltonPath(Vec<usize>);

impl HamiltonPath {
    /// Wraps a candidate vertex sequence without validating it.
    #[must_use]
    pub fn new(vertices: Vec<usize>) -> Self {
        Self(vertices)
    }

    /// The visited vertices in order.
    #[must_use]
    pub fn vertices(&self) -> &[usize] {
        &self.0
    }

    /// Number of vertices on the path.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the empty sequence.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First vertex, if any.
    #[must_use]
    pub fn start(&self) -> Option<usize> {
        self.0.first().copied()
    }

    /// Last vertex, if any.
    #[must_use]
    pub fn end(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Consumes the path, returning its vertices.
    #[must_use]
    pub fn into_vec(self) -> Vec<usize> {
        self.0
    }
}

/// One level of the depth-first search.
struct Frame {
    vertex: usize,
    untried: u64,
}

impl Graph {
    /// Returns whether a Hamilton path joins `from` and `to`.
    #[must_use]
    pub fn exists_hamilton_path(&self, from: usize, to: usize) -> bool {
        self.find_hamilton_path(from, to).is_some()
    }

    /// Searches for a Hamilton path from `from` to `to`.
    ///
    /// The search is exact backtracking over an explicit stack so its depth
    /// is bounded by the order rather than the call stack. `to` is entered
    /// only as the final vertex. On the single-vertex graph the path `[from]`
    /// is returned when `from == to`.
    ///
    /// # Examples
    /// ```
    /// use hamtough_core::Graph;
    ///
    /// let c4 = Graph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)])?;
    /// let path = c4.find_hamilton_path(0, 3).expect("C4 has a 0-3 Hamilton path");
    /// assert_eq!(path.vertices(), &[0, 1, 2, 3]);
    /// assert!(c4.find_hamilton_path(0, 2).is_none());
    /// # Ok::<(), hamtough_core::HamtoughError>(())
    /// ```
    #[must_use]
    pub fn find_hamilton_path(&self, from: usize, to: usize) -> Option<HamiltonPath> {
        let n = self.order();
        if from >= n || to >= n {
            return None;
        }
        if n == 1 {
            return (from == to).then(|| HamiltonPath(vec![from]));
        }
        if from == to {
            return None;
        }

        let target = bit(to);
        let mut path = Vec::with_capacity(n);
        path.push(from);
        let mut visited = bit(from);
        let mut stack = vec![Frame {
            vertex: from,
            untried: self.row(from),
        }];

        while let Some(frame) = stack.last_mut() {
            let placing_last = path.len() + 1 == n;
            let open = frame.untried & !visited;
            let candidates = if placing_last {
                open & target
            } else {
                open & !target
            };
            if candidates == 0 {
                visited &= !bit(frame.vertex);
                path.pop();
                stack.pop();
                continue;
            }
            let next = candidates.trailing_zeros() as usize;
            frame.untried &= !bit(next);
            path.push(next);
            if placing_last {
                return Some(HamiltonPath(path));
            }
            visited |= bit(next);
            stack.push(Frame {
                vertex: next,
                untried: self.row(next),
            });
        }
        None
    }

    /// Returns whether `path` is a Hamilton path of the current graph: it has
    /// exactly `order` distinct vertices and consecutive vertices are
    /// adjacent.
    #[must_use]
    pub fn check_hamilton_path(&self, path: &HamiltonPath) -> bool {
        let n = self.order();
        if path.len() != n {
            return false;
        }
        let mut seen = 0_u64;
        for &v in path.vertices() {
            if v >= n || seen & bit(v) != 0 {
                return false;
            }
            seen |= bit(v);
        }
        path.vertices()
            .windows(2)
            .all(|step| self.has_edge(step[0], step[1]))
    }
}
