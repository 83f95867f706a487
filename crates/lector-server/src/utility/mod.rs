//! Helpers shared across the crate.

pub mod tracing_targets;
