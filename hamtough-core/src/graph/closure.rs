//! Degree-sum closure.
//!
//! The k-closure repeatedly joins non-adjacent vertices whose degrees sum to at
//! least `k`. When the (n + 1)-closure is complete every pair of vertices is
//! Hamilton-connected, so callers can skip the graph entirely.

use super::Graph;
use crate::vertex_set::bit;

/// Vertices grouped by current degree with O(1) moves between groups.
struct DegreeBuckets {
    members: Vec<Vec<usize>>,
    slot: Vec<usize>,
}

impl DegreeBuckets {
    fn new(degrees: &[usize]) -> Self {
        let n = degrees.len();
        let mut members = vec![Vec::new(); n];
        let mut slot = vec![0; n];
        for (v, &d) in degrees.iter().enumerate() {
            slot[v] = members[d].len();
            members[d].push(v);
        }
        Self { members, slot }
    }

    fn promote(&mut self, v: usize, from: usize) {
        let idx = self.slot[v];
        let bucket = &mut self.members[from];
        bucket.swap_remove(idx);
        if let Some(&moved) = bucket.get(idx) {
            self.slot[moved] = idx;
        }
        let next = &mut self.members[from + 1];
        self.slot[v] = next.len();
        next.push(v);
    }

    fn members(&self, degree: usize) -> &[usize] {
        self.members
            .get(degree)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl Graph {
    /// Returns whether the k-closure of the graph is complete.
    ///
    /// The closure is built on a scratch copy; `self` is left unchanged.
    /// Graphs with fewer than two vertices are trivially complete.
    ///
    /// # Examples
    /// ```
    /// use hamtough_core::Graph;
    ///
    /// let k4 = Graph::from_edges(4, [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)])?;
    /// assert!(k4.has_complete_closure(5));
    /// let c4 = Graph::from_edges(4, [(0, 1), (1, 2), (2, 3), (3, 0)])?;
    /// assert!(!c4.has_complete_closure(5));
    /// assert!(c4.has_complete_closure(4));
    /// # Ok::<(), hamtough_core::HamtoughError>(())
    /// ```
    #[must_use]
    pub fn has_complete_closure(&self, k: usize) -> bool {
        let n = self.order();
        if n < 2 {
            return true;
        }
        let mut adjacency = self.adjacency.clone();
        let mut degrees: Vec<usize> = adjacency
            .iter()
            .map(|row| row.count_ones() as usize)
            .collect();
        let mut buckets = DegreeBuckets::new(&degrees);
        let mut pending = vec![0_u64; n];
        let mut queue = Vec::new();

        for u in 0..n {
            for v in (u + 1)..n {
                if degrees[u] + degrees[v] >= k && adjacency[u] & bit(v) == 0 {
                    queue.push((u, v));
                    pending[u] |= bit(v);
                    pending[v] |= bit(u);
                }
            }
        }

        let mut cursor = 0;
        while let Some(&(x, y)) = queue.get(cursor) {
            cursor += 1;
            for v in [x, y] {
                let d = degrees[v];
                buckets.promote(v, d);
                let Some(partner_degree) = k.checked_sub(d + 1) else {
                    continue;
                };
                for &z in buckets.members(partner_degree) {
                    if z != v && (adjacency[z] | pending[z]) & bit(v) == 0 {
                        queue.push((z, v));
                        pending[z] |= bit(v);
                        pending[v] |= bit(z);
                    }
                }
            }
            adjacency[x] |= bit(y);
            adjacency[y] |= bit(x);
            degrees[x] += 1;
            degrees[y] += 1;
        }

        degrees.iter().all(|&d| d == n - 1)
    }
}
