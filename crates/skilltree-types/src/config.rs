//! Rollup configuration types.
//!
//! `RollupConfig` controls the neutral score reported for unobserved skills and
//! how repeated edges between the same ordered pair of skills are handled.

use serde::{Deserialize, Serialize};

/// What `add_edge` does when an edge between the same ordered pair already exists.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateEdgePolicy {
    /// Last write wins: the later edge's id and direction replace the earlier
    /// edge in place, so the hop keeps its original child iteration position.
    #[default]
    Replace,
    /// The second edge is refused with `GraphError::DuplicateEdge`.
    Reject,
}

/// Top-level configuration for score rollups.
///
/// Usually loaded from a `rollup.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RollupConfig {
    /// `full_score` reported when a skill's closure has no observations.
    #[serde(default = "default_neutral_score")]
    pub neutral_score: f64,

    /// Policy for a second edge between the same ordered pair of skills.
    #[serde(default)]
    pub duplicate_edges: DuplicateEdgePolicy,
}

fn default_neutral_score() -> f64 {
    0.5
}

impl Default for RollupConfig {
    fn default() -> Self {
        Self {
            neutral_score: default_neutral_score(),
            duplicate_edges: DuplicateEdgePolicy::default(),
        }
    }
}
