//! Error types for the hamtough core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while decoding a graph6 string.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Graph6Error {
    /// The input contained no header byte.
    #[error("graph6 input is empty")]
    Empty,
    /// A byte fell outside the printable graph6 range `63..=126`.
    #[error("byte {byte:#04x} at position {position} is not a graph6 character")]
    InvalidByte {
        /// Offset of the offending byte within the input.
        position: usize,
        /// The offending byte.
        byte: u8,
    },
    /// The header announced the multi-byte order form, which is not supported.
    #[error("graph6 orders above {max} (multi-byte header) are not supported")]
    LongForm {
        /// Largest order representable with a one-byte header.
        max: usize,
    },
    /// The body ended before the adjacency triangle was complete.
    #[error("graph6 body has {found} bytes but order {order} requires {expected}")]
    Truncated {
        /// Order announced by the header.
        order: usize,
        /// Number of body bytes required by the order.
        expected: usize,
        /// Number of body bytes present.
        found: usize,
    },
    /// Non-zero data followed the adjacency triangle.
    #[error("unexpected graph6 data at position {position}")]
    TrailingData {
        /// Offset of the first unexpected byte.
        position: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`Graph6Error`] variants.
    enum Graph6ErrorCode for Graph6Error {
        /// The input contained no header byte.
        Empty => Empty => "GRAPH6_EMPTY",
        /// A byte fell outside the printable graph6 range.
        InvalidByte => InvalidByte { .. } => "GRAPH6_INVALID_BYTE",
        /// The header announced the multi-byte order form.
        LongForm => LongForm { .. } => "GRAPH6_LONG_FORM",
        /// The body ended before the adjacency triangle was complete.
        Truncated => Truncated { .. } => "GRAPH6_TRUNCATED",
        /// Non-zero data followed the adjacency triangle.
        TrailingData => TrailingData { .. } => "GRAPH6_TRAILING_DATA",
    }
}

/// Error type produced when configuring or running the verification engines.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum HamtoughError {
    /// No tuned subset-size table exists for the requested order.
    #[error("no subset-size table is configured for graphs of order {order}")]
    UnsupportedOrder {
        /// The order that has no table entry.
        order: usize,
    },
    /// The requested graph order is too small for the engine.
    #[error("graph order must be at least {min} (got {got})")]
    InvalidOrder {
        /// The order supplied by the caller.
        got: usize,
        /// Smallest order the engine accepts.
        min: usize,
    },
    /// The requested graph order exceeds the bitset representation.
    #[error("graph order {order} exceeds the supported maximum of {max}")]
    OrderOutOfRange {
        /// The order supplied by the caller.
        order: usize,
        /// Largest supported order.
        max: usize,
    },
    /// The hill climber was asked to run zero iterations.
    #[error("iteration budget must be at least 1 (got {got})")]
    InvalidIterationBudget {
        /// The budget supplied by the caller.
        got: usize,
    },
    /// A toughness threshold was not a positive finite number.
    #[error("toughness threshold must be positive and finite (got {got})")]
    InvalidThreshold {
        /// The threshold supplied by the caller.
        got: f64,
    },
    /// An edge probability fell outside `[0, 1]`.
    #[error("edge probability must lie in [0, 1] (got {got})")]
    InvalidEdgeProbability {
        /// The probability supplied by the caller.
        got: f64,
    },
    /// A graph did not match the order the engine was configured for.
    #[error("expected a graph of order {expected} but got order {found}")]
    OrderMismatch {
        /// Order the engine was configured for.
        expected: usize,
        /// Order of the supplied graph.
        found: usize,
    },
    /// An edge referenced a vertex outside the graph or joined a vertex to itself.
    #[error("edge ({left}, {right}) is invalid for a graph of order {order}")]
    InvalidEdge {
        /// First endpoint as provided.
        left: usize,
        /// Second endpoint as provided.
        right: usize,
        /// Order of the graph.
        order: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`HamtoughError`] variants.
    enum HamtoughErrorCode for HamtoughError {
        /// No tuned subset-size table exists for the requested order.
        UnsupportedOrder => UnsupportedOrder { .. } => "HAMTOUGH_UNSUPPORTED_ORDER",
        /// The requested graph order is too small.
        InvalidOrder => InvalidOrder { .. } => "HAMTOUGH_INVALID_ORDER",
        /// The requested graph order exceeds the bitset representation.
        OrderOutOfRange => OrderOutOfRange { .. } => "HAMTOUGH_ORDER_OUT_OF_RANGE",
        /// The hill climber was asked to run zero iterations.
        InvalidIterationBudget => InvalidIterationBudget { .. } => "HAMTOUGH_INVALID_ITERATION_BUDGET",
        /// A toughness threshold was not a positive finite number.
        InvalidThreshold => InvalidThreshold { .. } => "HAMTOUGH_INVALID_THRESHOLD",
        /// An edge probability fell outside `[0, 1]`.
        InvalidEdgeProbability => InvalidEdgeProbability { .. } => "HAMTOUGH_INVALID_EDGE_PROBABILITY",
        /// A graph did not match the configured order.
        OrderMismatch => OrderMismatch { .. } => "HAMTOUGH_ORDER_MISMATCH",
        /// An edge was out of range or a self-loop.
        InvalidEdge => InvalidEdge { .. } => "HAMTOUGH_INVALID_EDGE",
    }
}

impl HamtoughError {
    /// Returns whether the error stems from invalid caller configuration
    /// rather than from the data being processed.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidOrder { .. }
                | Self::OrderOutOfRange { .. }
                | Self::InvalidIterationBudget { .. }
                | Self::InvalidThreshold { .. }
                | Self::InvalidEdgeProbability { .. }
        )
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, HamtoughError>;
