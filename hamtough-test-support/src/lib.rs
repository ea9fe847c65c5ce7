//! Shared test utilities used across hamtough crates.

pub mod property;
pub mod tracing;
