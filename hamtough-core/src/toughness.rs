//! Pair-relative toughness-bound test.
//!
//! For a retained set `M` of size `k` on a graph of order `n`, the cut is the
//! complement of `M`. Components of the subgraph induced by `M` are counted,
//! less the components that hold an endpoint of the pair under test. When the
//! adjusted count `c` is positive the ratio `(2(n - k) + 1) / (2c)` bounds the
//! toughness needed for the pair; a ratio strictly below the threshold marks
//! `M` as a witness that the pair need not be Hamilton-connected.

use crate::{
    Graph, telemetry,
    vertex_set::{VertexPair, VertexSet},
};

/// A retained set whose obstruction ratio falls below the threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Witness {
    /// The retained vertices; the cut is their complement.
    pub retained: VertexSet,
    /// The obstruction ratio of the retained set.
    pub ratio: f64,
}

/// Obstruction ratio for `retained` vertices out of `order` with `components`
/// adjusted components, or `None` when `components` is zero.
///
/// # Examples
/// ```
/// use hamtough_core::obstruction_ratio;
///
/// assert_eq!(obstruction_ratio(5, 2, 1), Some(3.5));
/// assert_eq!(obstruction_ratio(5, 2, 2), Some(1.75));
/// assert_eq!(obstruction_ratio(5, 2, 0), None);
/// ```
#[must_use]
pub fn obstruction_ratio(order: usize, retained: usize, components: usize) -> Option<f64> {
    if components == 0 {
        return None;
    }
    let cut = order.saturating_sub(retained) as f64;
    Some((2.0 * cut + 1.0) / (2.0 * components as f64))
}

/// Components of `graph[retained]` that contain neither endpoint of `pair`.
#[must_use]
pub fn adjusted_components(graph: &Graph, retained: VertexSet, pair: VertexPair) -> usize {
    let mask = retained.bits();
    let total = graph.components_within(mask);
    let low = graph.reach_within(pair.low(), mask);
    let high = graph.reach_within(pair.high(), mask);
    let touched = match (low != 0, high != 0) {
        (false, false) => 0,
        (true, false) | (false, true) => 1,
        (true, true) if low == high => 1,
        (true, true) => 2,
    };
    total - touched
}

/// Obstruction ratio of `retained` for `pair`, or `None` when every component
/// holds an endpoint.
#[must_use]
pub fn pair_ratio(graph: &Graph, retained: VertexSet, pair: VertexPair) -> Option<f64> {
    let components = adjusted_components(graph, retained, pair);
    obstruction_ratio(graph.order(), retained.count(), components)
}

/// Returns the first mask in `masks` whose ratio for `pair` is strictly below
/// `threshold`.
///
/// # Examples
/// ```
/// use hamtough_core::{Graph, VertexPair, find_witness, generate_subsets};
///
/// let c5 = Graph::from_edges(5, [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)])?;
/// let masks = generate_subsets(5, 2);
/// let witness = find_witness(&c5, &masks, VertexPair::new(0, 2), 2.0)
///     .expect("C5 has a low-toughness cut for a non-adjacent pair");
/// assert_eq!(witness.retained.iter().collect::<Vec<_>>(), vec![1, 3]);
/// assert_eq!(witness.ratio, 1.75);
/// assert!(find_witness(&c5, &masks, VertexPair::new(0, 2), 1.75).is_none());
/// # Ok::<(), hamtough_core::HamtoughError>(())
/// ```
#[must_use]
pub fn find_witness(
    graph: &Graph,
    masks: &[VertexSet],
    pair: VertexPair,
    threshold: f64,
) -> Option<Witness> {
    telemetry::record_toughness_scan();
    masks.iter().find_map(|&retained| {
        pair_ratio(graph, retained, pair)
            .filter(|&ratio| ratio < threshold)
            .map(|ratio| Witness { retained, ratio })
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::{
        generate_subsets,
        test_utils::{arbitrary_graph, cycle, star, suite_proptest_config},
    };

    #[rstest]
    // Neither endpoint retained: both components count.
    #[case(&[1, 3], 0, 2, 2)]
    // One endpoint retained.
    #[case(&[0, 3], 0, 2, 1)]
    // Both retained in one component.
    #[case(&[0, 1], 0, 1, 0)]
    // Both retained in different components.
    #[case(&[0, 2], 0, 2, 0)]
    fn adjusted_components_on_c5(
        #[case] retained: &[usize],
        #[case] p1: usize,
        #[case] p2: usize,
        #[case] expected: usize,
    ) {
        let graph = cycle(5);
        let mask = VertexSet::from_vertices(5, retained.iter().copied());
        assert_eq!(
            adjusted_components(&graph, mask, VertexPair::new(p1, p2)),
            expected
        );
    }

    #[test]
    fn star_leaves_form_a_cheap_cut() {
        // Removing the centre of K1,4 leaves four isolated leaves.
        let graph = star(4);
        let retained = VertexSet::from_vertices(5, [1, 2, 3, 4]);
        let ratio = pair_ratio(&graph, retained, VertexPair::new(1, 2));
        assert_eq!(ratio, Some(1.5 / 2.0));
    }

    #[test]
    fn find_witness_returns_none_without_masks() {
        assert!(find_witness(&cycle(5), &[], VertexPair::new(0, 2), 10.0).is_none());
    }

    proptest! {
        #![proptest_config(suite_proptest_config(64))]

        #[test]
        fn witnesses_are_monotonic_in_threshold(
            graph in arbitrary_graph(4..=8),
            size in 1_usize..4,
            low in 0.5_f64..3.0,
            delta in 0.0_f64..2.0,
        ) {
            let masks = generate_subsets(graph.order(), size);
            let pair = VertexPair::new(0, graph.order() - 1);
            if let Some(witness) = find_witness(&graph, &masks, pair, low) {
                prop_assert!(witness.ratio < low);
                prop_assert!(find_witness(&graph, &masks, pair, low + delta).is_some());
            }
        }
    }
}
