//! Shared domain types for the skill tree rollup engine.
//!
//! This crate contains the data model used across the workspace: skill nodes,
//! prerequisite edges, rollup results, representative paths, graph snapshots,
//! the rollup configuration and the graph error type.
//!
//! Zero logic dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod skill;
