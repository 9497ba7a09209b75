//! Skill tree score rollup engine.
//!
//! Builds an in-memory prerequisite graph for one skill tree, then computes a
//! rolled-up mastery score for every skill over its whole prerequisite subtree,
//! along with descendant sets, direct edge lookups and representative paths.
//! Pure computation: no I/O outside the `config` and `snapshot` loaders.

pub mod collector;
pub mod config;
pub mod graph;
pub mod snapshot;

pub use collector::Collector;
