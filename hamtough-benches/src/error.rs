//! Benchmark setup error type.

use hamtough_core::HamtoughError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// The core rejected a graph or configuration.
    #[error("hamtough operation failed: {0}")]
    Core(#[from] HamtoughError),
    /// A zero value was passed where a non-zero integer was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// A description of the parameter that was unexpectedly zero.
        context: &'static str,
    },
}
