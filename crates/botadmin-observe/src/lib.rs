//! Observability setup for the botadmin console.

pub mod tracing_setup;
