//! Logging setup for applications embedding the skill tree engine.

pub mod tracing_setup;

pub use tracing_setup::{LogFormat, build_subscriber, init_tracing};
