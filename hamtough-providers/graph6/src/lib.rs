//! Streaming graph6 source: one graph per line from a file or reader.

mod errors;
mod source;

pub use errors::{Graph6SourceError, Graph6SourceErrorCode};
pub use source::Graph6Source;
