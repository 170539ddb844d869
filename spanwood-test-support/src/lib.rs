//! Shared test utilities used across spanwood crates.

pub mod property;
pub mod tracing;
