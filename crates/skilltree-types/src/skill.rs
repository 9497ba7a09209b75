//! Skill graph domain types.
//!
//! Defines the nodes and prerequisite edges fed into the rollup engine, the
//! per-skill rollup it produces, and the representative path between skills.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Graph inputs
// ---------------------------------------------------------------------------

/// A skill and its raw, normalized performance observations.
///
/// Each score is one observation in `0..=1`. The list may be empty for skills
/// nobody has practised yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillNode {
    pub id: String,
    #[serde(default)]
    pub scores: Vec<f64>,
}

impl SkillNode {
    pub fn new(id: impl Into<String>, scores: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            scores,
        }
    }
}

/// Which way a prerequisite edge is traversed.
///
/// Only `ToChild` (parent skill -> prerequisite skill) exists today.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EdgeDirection {
    #[default]
    ToChild,
}

impl fmt::Display for EdgeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToChild => write!(f, "to_child"),
        }
    }
}

/// A directed prerequisite link. `id` is the identity of the stored link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillEdge {
    pub id: String,
    pub from_id: String,
    pub to_id: String,
    #[serde(default)]
    pub direction: EdgeDirection,
}

impl SkillEdge {
    /// Build a parent -> child edge.
    pub fn to_child(
        id: impl Into<String>,
        from_id: impl Into<String>,
        to_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            from_id: from_id.into(),
            to_id: to_id.into(),
            direction: EdgeDirection::ToChild,
        }
    }
}

/// Nodes and edges of one connected skill tree, in insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GraphSnapshot {
    #[serde(default)]
    pub nodes: Vec<SkillNode>,
    #[serde(default)]
    pub edges: Vec<SkillEdge>,
}

// ---------------------------------------------------------------------------
// Derived outputs
// ---------------------------------------------------------------------------

/// Rolled-up mastery for one skill and its whole prerequisite subtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RollupResult {
    pub node_id: String,
    /// Mean of `all_scores`, or the configured neutral score when empty.
    pub full_score: f64,
    /// Own scores followed by every descendant's scores, each skill counted once.
    pub all_scores: Vec<f64>,
    /// The reachable closure, always including `node_id` itself.
    pub descendants: BTreeSet<String>,
}

impl RollupResult {
    /// Number of skills strictly below this one.
    pub fn skills_below(&self) -> usize {
        self.descendants.len().saturating_sub(1)
    }

    /// Number of raw observations feeding the rollup.
    pub fn observation_count(&self) -> usize {
        self.all_scores.len()
    }

    /// Summary statistics over `all_scores`.
    ///
    /// `mean` mirrors `full_score` so the neutral default carries through;
    /// `min`, `max` and `std_dev` are `None` when nothing was observed.
    pub fn stats(&self) -> ScoreStats {
        let count = self.all_scores.len();
        if count == 0 {
            return ScoreStats {
                count,
                mean: self.full_score,
                min: None,
                max: None,
                std_dev: None,
            };
        }

        let min = self.all_scores.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self
            .all_scores
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max);
        let variance = self
            .all_scores
            .iter()
            .map(|s| (s - self.full_score).powi(2))
            .sum::<f64>()
            / count as f64;

        ScoreStats {
            count,
            mean: self.full_score,
            min: Some(min),
            max: Some(max),
            std_dev: Some(variance.sqrt()),
        }
    }
}

/// Caller-facing statistics derived from a [`RollupResult`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoreStats {
    pub count: usize,
    pub mean: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Population standard deviation.
    pub std_dev: Option<f64>,
}

/// A representative root-to-skill path: node ids plus the edge ids between them.
///
/// `edge_ids.len() == node_ids.len() - 1` for a non-empty path. An empty path
/// means the target is not reachable from the start.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillPath {
    pub node_ids: Vec<String>,
    pub edge_ids: Vec<String>,
}

impl SkillPath {
    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    /// Number of hops (edges) in the path.
    pub fn len(&self) -> usize {
        self.edge_ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rollup(scores: Vec<f64>, full_score: f64, descendants: &[&str]) -> RollupResult {
        RollupResult {
            node_id: descendants[0].to_string(),
            full_score,
            all_scores: scores,
            descendants: descendants.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn test_edge_direction_serializes_snake_case() {
        let json = serde_json::to_string(&EdgeDirection::ToChild).unwrap();
        assert_eq!(json, "\"to_child\"");
        assert_eq!(EdgeDirection::ToChild.to_string(), "to_child");
    }

    #[test]
    fn test_edge_direction_defaults_when_missing() {
        let edge: SkillEdge =
            serde_json::from_str(r#"{"id":"e1","from_id":"a","to_id":"b"}"#).unwrap();
        assert_eq!(edge, SkillEdge::to_child("e1", "a", "b"));
    }

    #[test]
    fn test_node_scores_default_to_empty() {
        let node: SkillNode = serde_json::from_str(r#"{"id":"a"}"#).unwrap();
        assert!(node.scores.is_empty());
    }

    #[test]
    fn test_skills_below_excludes_self() {
        let r = rollup(vec![], 0.5, &["a", "b", "c"]);
        assert_eq!(r.skills_below(), 2);
        assert_eq!(rollup(vec![], 0.5, &["leaf"]).skills_below(), 0);
    }

    #[test]
    fn test_stats_over_observations() {
        let r = rollup(vec![0.2, 0.4, 0.6], 0.4, &["a"]);
        let stats = r.stats();
        assert_eq!(stats.count, 3);
        assert_eq!(stats.min, Some(0.2));
        assert_eq!(stats.max, Some(0.6));
        let expected = (0.08f64 / 3.0).sqrt();
        assert!((stats.std_dev.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_stats_without_observations_keeps_neutral_mean() {
        let stats = rollup(vec![], 0.5, &["a"]).stats();
        assert_eq!(stats.count, 0);
        assert!((stats.mean - 0.5).abs() < f64::EPSILON);
        assert!(stats.min.is_none());
        assert!(stats.max.is_none());
        assert!(stats.std_dev.is_none());
    }

    #[test]
    fn test_empty_path() {
        let path = SkillPath::default();
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
    }
}
