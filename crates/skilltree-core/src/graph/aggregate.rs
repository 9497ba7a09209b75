//! Score rollup over a descendant closure.
//!
//! Scores are concatenated and averaged per observation: a skill with many
//! recorded attempts weighs proportionally more than a sibling with one.

use petgraph::graph::NodeIndex;

use skilltree_types::skill::RollupResult;

use super::store::GraphStore;

/// Turns a node's closure into a [`RollupResult`].
#[derive(Debug, Clone, Copy)]
pub struct ScoreAggregator {
    neutral_score: f64,
}

impl ScoreAggregator {
    pub fn new(neutral_score: f64) -> Self {
        Self { neutral_score }
    }

    pub fn neutral_score(&self) -> f64 {
        self.neutral_score
    }

    /// Roll up `node` over `closure`, which must contain each skill once.
    pub fn rollup(&self, store: &GraphStore, node: NodeIndex, closure: &[NodeIndex]) -> RollupResult {
        let all_scores: Vec<f64> = closure
            .iter()
            .flat_map(|&d| store.node(d).scores.iter().copied())
            .collect();

        RollupResult {
            node_id: store.node(node).id.clone(),
            full_score: self.mean(&all_scores),
            all_scores,
            descendants: closure.iter().map(|&d| store.node(d).id.clone()).collect(),
        }
    }

    /// Arithmetic mean, or the neutral score for no observations.
    pub fn mean(&self, scores: &[f64]) -> f64 {
        if scores.is_empty() {
            return self.neutral_score;
        }
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

impl Default for ScoreAggregator {
    fn default() -> Self {
        Self::new(0.5)
    }
}
