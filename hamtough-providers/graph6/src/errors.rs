use std::{io, path::PathBuf};

use hamtough_core::Graph6Error;
use thiserror::Error;

/// Errors raised while reading a graph6 stream.
#[derive(Debug, Error)]
pub enum Graph6SourceError {
    /// The input file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Open {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Reading a line failed.
    #[error("failed to read line {line} of `{name}`: {source}")]
    Read {
        /// Name of the stream.
        name: String,
        /// One-based line number.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A line was not valid graph6.
    #[error("line {line} of `{name}` is not valid graph6: {source}")]
    Decode {
        /// Name of the stream.
        name: String,
        /// One-based line number.
        line: usize,
        /// Decoder diagnosis.
        #[source]
        source: Graph6Error,
    },
    /// A graph's order differed from the first graph's.
    #[error("line {line} of `{name}` has order {found} but the stream has order {expected}")]
    MixedOrder {
        /// Name of the stream.
        name: String,
        /// One-based line number.
        line: usize,
        /// Order fixed by the first graph.
        expected: usize,
        /// Order of the offending graph.
        found: usize,
    },
    /// The stream held no graphs.
    #[error("`{name}` contains no graphs")]
    EmptyInput {
        /// Name of the stream.
        name: String,
    },
}

/// Stable machine-readable codes for [`Graph6SourceError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Graph6SourceErrorCode {
    /// See [`Graph6SourceError::Open`].
    Open,
    /// See [`Graph6SourceError::Read`].
    Read,
    /// See [`Graph6SourceError::Decode`].
    Decode,
    /// See [`Graph6SourceError::MixedOrder`].
    MixedOrder,
    /// See [`Graph6SourceError::EmptyInput`].
    EmptyInput,
}

impl Graph6SourceErrorCode {
    /// The stable string form of this code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "GRAPH6_SOURCE_OPEN",
            Self::Read => "GRAPH6_SOURCE_READ",
            Self::Decode => "GRAPH6_SOURCE_DECODE",
            Self::MixedOrder => "GRAPH6_SOURCE_MIXED_ORDER",
            Self::EmptyInput => "GRAPH6_SOURCE_EMPTY_INPUT",
        }
    }
}

impl Graph6SourceError {
    /// The stable code for this error.
    #[must_use]
    pub const fn code(&self) -> Graph6SourceErrorCode {
        match self {
            Self::Open { .. } => Graph6SourceErrorCode::Open,
            Self::Read { .. } => Graph6SourceErrorCode::Read,
            Self::Decode { .. } => Graph6SourceErrorCode::Decode,
            Self::MixedOrder { .. } => Graph6SourceErrorCode::MixedOrder,
            Self::EmptyInput { .. } => Graph6SourceErrorCode::EmptyInput,
        }
    }

    /// Whether the stream could not be read at all, as opposed to holding
    /// bad content.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Open { .. } | Self::EmptyInput { .. })
    }
}
