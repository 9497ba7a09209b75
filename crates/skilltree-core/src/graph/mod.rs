//! Skill graph algorithms.
//!
//! - `store` -- arena adjacency storage with O(1) id and edge-pair lookup
//! - `descendants` -- per-node reachable closure, cycle-safe
//! - `aggregate` -- per-observation score rollup over a closure
//! - `path` -- shortest representative path via breadth-first search

pub mod aggregate;
pub mod descendants;
pub mod path;
pub mod store;

pub use aggregate::ScoreAggregator;
pub use descendants::DescendantResolver;
pub use path::PathFinder;
pub use store::GraphStore;
