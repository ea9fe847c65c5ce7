//! The graph6 text encoding for graphs of order at most [`MAX_ORDER`].
//!
//! A graph6 line is a header byte `order + 63` followed by the upper triangle
//! of the adjacency matrix in column-major order (`j = 1..n`, `i = 0..j`),
//! packed six bits per byte, most significant bit first, each byte offset by
//! 63 and the final byte padded with zero bits.

use crate::{Graph, MAX_ORDER, error::Graph6Error, vertex_set::bit};

const OFFSET: u8 = 63;
const LONG_FORM_MARKER: u8 = 126;
const BITS_PER_BYTE: usize = 6;

fn body_len(order: usize) -> usize {
    (order * order.saturating_sub(1) / 2).div_ceil(BITS_PER_BYTE)
}

fn sextet(position: usize, byte: u8) -> Result<u8, Graph6Error> {
    if (OFFSET..=LONG_FORM_MARKER).contains(&byte) {
        Ok(byte - OFFSET)
    } else {
        Err(Graph6Error::InvalidByte { position, byte })
    }
}

/// Decodes one graph6 line. The line (without surrounding whitespace) becomes
/// the graph's label.
///
/// Zero-valued bytes (`?`) after the body are tolerated, so a trailing
/// terminator byte is accepted.
///
/// # Errors
/// Returns a [`Graph6Error`] for empty input, bytes outside `63..=126`, the
/// multi-byte order header, a short body, or non-zero trailing data.
///
/// # Examples
/// ```
/// use hamtough_core::graph6;
///
/// let triangle = graph6::decode("Bw")?;
/// assert_eq!(triangle.order(), 3);
/// assert_eq!(triangle.edge_count(), 3);
/// let path = graph6::decode("Bg")?;
/// assert_eq!(path.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 2)]);
/// # Ok::<(), hamtough_core::Graph6Error>(())
/// ```
pub fn decode(line: &str) -> Result<Graph, Graph6Error> {
    let text = line.trim();
    let bytes = text.as_bytes();
    let (&header, body) = bytes.split_first().ok_or(Graph6Error::Empty)?;
    let order = usize::from(sextet(0, header)?);
    if header == LONG_FORM_MARKER {
        return Err(Graph6Error::LongForm { max: MAX_ORDER });
    }

    let expected = body_len(order);
    if body.len() < expected {
        return Err(Graph6Error::Truncated {
            order,
            expected,
            found: body.len(),
        });
    }

    let mut graph = Graph::with_order(order);
    let mut cells = (1..order).flat_map(|j| (0..j).map(move |i| (i, j)));
    for (offset, &byte) in body[..expected].iter().enumerate() {
        let value = sextet(offset + 1, byte)?;
        for shift in (0..BITS_PER_BYTE).rev() {
            let Some((i, j)) = cells.next() else {
                break;
            };
            if value & (1 << shift) != 0 {
                graph.add_edge(i, j);
            }
        }
    }
    for (offset, &byte) in body[expected..].iter().enumerate() {
        let position = offset + expected + 1;
        if sextet(position, byte)? != 0 {
            return Err(Graph6Error::TrailingData { position });
        }
    }
    Ok(graph.with_label(text))
}

/// Encodes a graph as a canonical graph6 line with no terminator.
///
/// # Examples
/// ```
/// use hamtough_core::{Graph, graph6};
///
/// let path = Graph::from_edges(3, [(0, 1), (1, 2)])?;
/// assert_eq!(graph6::encode(&path), "Bg");
/// # Ok::<(), hamtough_core::HamtoughError>(())
/// ```
#[must_use]
pub fn encode(graph: &Graph) -> String {
    let order = graph.order();
    let mut out = String::with_capacity(1 + body_len(order));
    out.push(char::from(OFFSET + order as u8));
    let mut current = 0_u8;
    let mut filled = 0;
    for j in 1..order {
        let column = graph.row(j);
        for i in 0..j {
            current <<= 1;
            if column & bit(i) != 0 {
                current |= 1;
            }
            filled += 1;
            if filled == BITS_PER_BYTE {
                out.push(char::from(OFFSET + current));
                current = 0;
                filled = 0;
            }
        }
    }
    if filled > 0 {
        current <<= BITS_PER_BYTE - filled;
        out.push(char::from(OFFSET + current));
    }
    out
}
