#![allow(dead_code, reason = "each integration test uses a different subset")]

use hamtough_core::Graph;

pub fn cycle(n: usize) -> Graph {
    Graph::from_edges(n, (0..n).map(|v| (v, (v + 1) % n))).expect("cycle edges are valid")
}

pub fn complete(n: usize) -> Graph {
    Graph::from_edges(n, (0..n).flat_map(|u| ((u + 1)..n).map(move |v| (u, v))))
        .expect("complete graph edges are valid")
}

pub fn star(leaves: usize) -> Graph {
    Graph::from_edges(leaves + 1, (1..=leaves).map(|v| (0, v))).expect("star edges are valid")
}

pub fn path(n: usize) -> Graph {
    Graph::from_edges(n, (1..n).map(|v| (v - 1, v))).expect("path edges are valid")
}
