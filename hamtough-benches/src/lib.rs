//! Benchmark support crate for hamtough.
//!
//! Provides seeded graph streams and parameter types used by the Criterion
//! benchmarks for Hamilton search, degree closure, exhaustive verification
//! and hill climbing.

pub mod error;
pub mod params;
pub mod source;
