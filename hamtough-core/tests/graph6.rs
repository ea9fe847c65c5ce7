mod common;

use common::{complete, path};
use hamtough_core::{Graph, Graph6Error, dot::write_dot, graph6};
use rstest::rstest;

#[rstest]
fn bw_is_the_triangle() {
    let graph = Graph::from_graph6("Bw").expect("valid graph6");
    assert_eq!(graph, complete(3));
    assert_eq!(graph.name(), "Bw");
    assert!(graph.exists_hamilton_path(0, 2));
}

#[rstest]
fn bg_is_the_three_vertex_path() {
    let graph = Graph::from_graph6("Bg").expect("valid graph6");
    assert_eq!(graph, path(3));
    let found = graph
        .find_hamilton_path(0, 2)
        .expect("the path is its own Hamilton path");
    assert_eq!(found.vertices(), &[0, 1, 2]);
    assert!(graph.find_hamilton_path(0, 1).is_none());
}

#[rstest]
#[case("Bw\r\n")]
#[case("  Bw")]
#[case("Bw?")]
fn whitespace_and_terminators_are_tolerated(#[case] line: &str) {
    assert_eq!(graph6::decode(line).expect("valid graph6"), complete(3));
}

#[rstest]
fn errors_surface_through_from_graph6() {
    assert_eq!(
        Graph::from_graph6("D"),
        Err(Graph6Error::Truncated {
            order: 5,
            expected: 2,
            found: 0,
        })
    );
}

#[rstest]
fn unlabelled_graphs_are_named_by_their_encoding() {
    assert_eq!(path(3).name(), "Bg");
    assert_eq!(graph6::encode(&complete(3)), "Bw");
}

#[rstest]
fn dot_export_lists_vertices_then_edges() {
    let mut out = Vec::new();
    write_dot(&complete(3), &mut out).expect("writing to a Vec cannot fail");
    let text = String::from_utf8(out).expect("DOT output is UTF-8");
    assert_eq!(text, "graph G {\n0;\n1;\n2;\n0--1 ;\n0--2 ;\n1--2 ;\n}\n");
}
