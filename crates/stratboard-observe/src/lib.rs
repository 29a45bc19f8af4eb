//! Observability setup for stratboard.

pub mod tracing_setup;
