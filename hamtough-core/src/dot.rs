//! Graphviz DOT export.

use std::io::{self, Write};

use crate::Graph;

/// Writes `graph` as an undirected Graphviz graph named `G`.
///
/// # Errors
/// Propagates any I/O error raised by `out`.
///
/// # Examples
/// ```
/// use hamtough_core::{Graph, dot::write_dot};
///
/// let path = Graph::from_edges(3, [(0, 1), (1, 2)])?;
/// let mut out = Vec::new();
/// write_dot(&path, &mut out)?;
/// assert_eq!(
///     String::from_utf8(out)?,
///     "graph G {\n0;\n1;\n2;\n0--1 ;\n1--2 ;\n}\n"
/// );
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_dot<W: Write>(graph: &Graph, mut out: W) -> io::Result<()> {
    writeln!(out, "graph G {{")?;
    for v in 0..graph.order() {
        writeln!(out, "{v};")?;
    }
    for (u, v) in graph.edges() {
        writeln!(out, "{u}--{v} ;")?;
    }
    writeln!(out, "}}")?;
    out.flush()
}
