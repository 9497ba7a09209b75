//! Public entry point for score rollups.
//!
//! `Collector` owns one [`GraphStore`] and composes the descendant resolver,
//! the score aggregator and the path finder behind a single API. Callers
//! populate it with `add_node` / `add_edge` (any error aborts construction),
//! then call [`Collector::calculate_node_scores`], which cannot fail.
//!
//! The collector does not know which skill is "the" root of a tree; callers
//! pass it to [`Collector::first_parent_path`] explicitly.

use std::collections::{BTreeMap, BTreeSet};

use skilltree_types::config::RollupConfig;
use skilltree_types::error::GraphError;
use skilltree_types::skill::{GraphSnapshot, RollupResult, SkillEdge, SkillNode, SkillPath};

use crate::graph::{DescendantResolver, GraphStore, PathFinder, ScoreAggregator};

#[derive(Debug, Clone)]
pub struct Collector {
    store: GraphStore,
    aggregator: ScoreAggregator,
}

impl Collector {
    /// Create an empty collector with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&RollupConfig::default())
    }

    pub fn with_config(config: &RollupConfig) -> Self {
        Self {
            store: GraphStore::new(config.duplicate_edges),
            aggregator: ScoreAggregator::new(config.neutral_score),
        }
    }

    /// Build from all nodes, then all edges, stopping at the first error.
    pub fn from_parts(
        nodes: impl IntoIterator<Item = SkillNode>,
        edges: impl IntoIterator<Item = SkillEdge>,
        config: &RollupConfig,
    ) -> Result<Self, GraphError> {
        let mut collector = Self::with_config(config);
        for node in nodes {
            collector.add_node(node)?;
        }
        for edge in edges {
            collector.add_edge(edge)?;
        }
        Ok(collector)
    }

    pub fn from_snapshot(snapshot: GraphSnapshot, config: &RollupConfig) -> Result<Self, GraphError> {
        Self::from_parts(snapshot.nodes, snapshot.edges, config)
    }

    /// Export nodes and edges in insertion order.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.store.nodes().cloned().collect(),
            edges: self.store.edges().cloned().collect(),
        }
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    pub fn add_node(&mut self, node: SkillNode) -> Result<(), GraphError> {
        self.store.add_node(node).map(|_| ())
    }

    pub fn add_edge(&mut self, edge: SkillEdge) -> Result<(), GraphError> {
        self.store.add_edge(edge).map(|_| ())
    }

    // -----------------------------------------------------------------------
    // Rollups
    // -----------------------------------------------------------------------

    /// Rollup for every skill, keyed by skill id.
    ///
    /// Read-only over the store, so repeated calls return equal maps.
    #[tracing::instrument(
        skip_all,
        fields(nodes = self.store.node_count(), edges = self.store.edge_count())
    )]
    pub fn calculate_node_scores(&self) -> BTreeMap<String, RollupResult> {
        if let Some(on_cycle) = self.store.find_cycle() {
            tracing::warn!(skill = on_cycle, "skill graph contains a cycle; closures stop at revisited skills");
        }

        let resolver = DescendantResolver::new(&self.store);
        let results: BTreeMap<String, RollupResult> = resolver
            .resolve_all()
            .into_iter()
            .map(|(idx, closure)| {
                let rollup = self.aggregator.rollup(&self.store, idx, &closure);
                (rollup.node_id.clone(), rollup)
            })
            .collect();

        tracing::debug!(skills = results.len(), "computed skill rollups");
        results
    }

    /// Rollup for a single skill.
    pub fn rollup_for(&self, id: &str) -> Result<RollupResult, GraphError> {
        let idx = self.store.require(id)?;
        let closure = DescendantResolver::new(&self.store).resolve(idx);
        Ok(self.aggregator.rollup(&self.store, idx, &closure))
    }

    /// Reachable closure of `id`, including `id`.
    pub fn descendants_of(&self, id: &str) -> Result<BTreeSet<String>, GraphError> {
        let idx = self.store.require(id)?;
        Ok(DescendantResolver::new(&self.store)
            .resolve(idx)
            .into_iter()
            .map(|d| self.store.node(d).id.clone())
            .collect())
    }

    // -----------------------------------------------------------------------
    // Provenance
    // -----------------------------------------------------------------------

    /// Id of the direct edge `from_id -> to_id`.
    pub fn edge_id(&self, from_id: &str, to_id: &str) -> Option<&str> {
        self.store.edge_id(from_id, to_id)
    }

    /// Representative shortest path from the caller's root skill to `target_id`.
    ///
    /// Empty when the target lies outside the root's closure; `NotFound` when
    /// either id was never added.
    pub fn first_parent_path(&self, root_id: &str, target_id: &str) -> Result<SkillPath, GraphError> {
        PathFinder::new(&self.store).find(root_id, target_id)
    }

    pub fn children_of(&self, id: &str) -> Result<Vec<&SkillNode>, GraphError> {
        self.store.children_of(id)
    }

    /// Skills nothing points down to, in insertion order.
    pub fn roots(&self) -> Vec<&SkillNode> {
        self.store.roots()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.store.contains(id)
    }

    pub fn node_count(&self) -> usize {
        self.store.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.store.edge_count()
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skilltree_types::config::DuplicateEdgePolicy;

    fn ids(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sorted(mut scores: Vec<f64>) -> Vec<f64> {
        scores.sort_by(|a, b| a.partial_cmp(b).unwrap());
        scores
    }

    /// A(1.0, 0.5) -> B(0.8) -> C()
    fn linear_chain() -> Collector {
        let mut c = Collector::new();
        c.add_node(SkillNode::new("A", vec![1.0, 0.5])).unwrap();
        c.add_node(SkillNode::new("B", vec![0.8])).unwrap();
        c.add_node(SkillNode::new("C", vec![])).unwrap();
        c.add_edge(SkillEdge::to_child("e1", "A", "B")).unwrap();
        c.add_edge(SkillEdge::to_child("e2", "B", "C")).unwrap();
        c
    }

    /// A -> {B, D} -> C
    fn diamond() -> Collector {
        Collector::from_parts(
            vec![
                SkillNode::new("A", vec![0.2]),
                SkillNode::new("B", vec![0.4]),
                SkillNode::new("C", vec![1.0, 1.0]),
                SkillNode::new("D", vec![]),
            ],
            vec![
                SkillEdge::to_child("ab", "A", "B"),
                SkillEdge::to_child("ad", "A", "D"),
                SkillEdge::to_child("bc", "B", "C"),
                SkillEdge::to_child("dc", "D", "C"),
            ],
            &RollupConfig::default(),
        )
        .unwrap()
    }

    // -----------------------------------------------------------------------
    // Linear chain scenario
    // -----------------------------------------------------------------------

    #[test]
    fn test_linear_chain_rollups() {
        let results = linear_chain().calculate_node_scores();
        assert_eq!(results.len(), 3);

        let a = &results["A"];
        assert_eq!(a.descendants, ids(&["A", "B", "C"]));
        assert_eq!(sorted(a.all_scores.clone()), vec![0.5, 0.8, 1.0]);
        assert!((a.full_score - 2.3 / 3.0).abs() < 1e-9);
        assert_eq!(a.skills_below(), 2);

        let c = &results["C"];
        assert_eq!(c.descendants, ids(&["C"]));
        assert!((c.full_score - 0.5).abs() < f64::EPSILON);
        assert!(c.all_scores.is_empty());
    }

    #[test]
    fn test_linear_chain_provenance() {
        let c = linear_chain();
        assert_eq!(c.edge_id("A", "B"), Some("e1"));
        assert_eq!(c.edge_id("A", "C"), None);

        let path = c.first_parent_path("A", "C").unwrap();
        assert_eq!(path.node_ids, vec!["A", "B", "C"]);
        assert_eq!(path.edge_ids, vec!["e1", "e2"]);
    }

    // -----------------------------------------------------------------------
    // Diamond scenario
    // -----------------------------------------------------------------------

    #[test]
    fn test_diamond_counts_shared_skill_once() {
        let results = diamond().calculate_node_scores();
        let a = &results["A"];
        assert_eq!(a.descendants, ids(&["A", "B", "C", "D"]));
        assert_eq!(a.all_scores.len(), 4, "C's two scores must be counted once");
        assert!((a.full_score - 2.6 / 4.0).abs() < 1e-9);
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    #[test]
    fn test_leaves_roll_up_to_themselves() {
        let c = diamond();
        let results = c.calculate_node_scores();
        for node in c.snapshot().nodes {
            if c.children_of(&node.id).unwrap().is_empty() {
                let r = &results[&node.id];
                assert_eq!(r.descendants, ids(&[node.id.as_str()]));
                assert_eq!(r.all_scores, node.scores);
            }
        }
    }

    #[test]
    fn test_subtree_containment_and_score_counts() {
        let c = diamond();
        let results = c.calculate_node_scores();
        let scores: BTreeMap<String, usize> = c
            .snapshot()
            .nodes
            .into_iter()
            .map(|n| (n.id, n.scores.len()))
            .collect();

        for (id, rollup) in &results {
            for child in c.children_of(id).unwrap() {
                assert!(
                    rollup.descendants.is_superset(&results[&child.id].descendants),
                    "{id} must contain the subtree of {}",
                    child.id
                );
            }
            let expected: usize = rollup.descendants.iter().map(|d| scores[d]).sum();
            assert_eq!(rollup.observation_count(), expected);
        }
    }

    #[test]
    fn test_calculate_is_idempotent() {
        let c = diamond();
        let before = c.snapshot();
        assert_eq!(c.calculate_node_scores(), c.calculate_node_scores());
        assert_eq!(c.snapshot(), before, "computation must not mutate the graph");
    }

    #[test]
    fn test_path_to_self_and_unrelated() {
        let mut c = linear_chain();
        c.add_node(SkillNode::new("X", vec![0.9])).unwrap();

        let own = c.first_parent_path("A", "A").unwrap();
        assert_eq!(own.node_ids, vec!["A"]);
        assert!(own.edge_ids.is_empty());

        let unrelated = c.first_parent_path("A", "X").unwrap();
        assert!(unrelated.is_empty());
        assert!(unrelated.edge_ids.is_empty());

        assert_eq!(
            c.first_parent_path("A", "never-added").unwrap_err(),
            GraphError::NotFound("never-added".into())
        );
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn test_from_parts_fails_fast_on_unknown_endpoint() {
        let err = Collector::from_parts(
            vec![SkillNode::new("A", vec![])],
            vec![SkillEdge::to_child("e1", "A", "B")],
            &RollupConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, GraphError::UnknownNode { ref node_id, .. } if node_id == "B"));
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut c = linear_chain();
        assert_eq!(
            c.add_node(SkillNode::new("A", vec![])).unwrap_err(),
            GraphError::DuplicateNode("A".into())
        );
        assert_eq!(c.node_count(), 3);
    }

    #[test]
    fn test_config_is_applied() {
        let config = RollupConfig {
            neutral_score: 0.0,
            duplicate_edges: DuplicateEdgePolicy::Reject,
        };
        let mut c = Collector::with_config(&config);
        c.add_node(SkillNode::new("A", vec![])).unwrap();
        c.add_node(SkillNode::new("B", vec![])).unwrap();
        c.add_edge(SkillEdge::to_child("e1", "A", "B")).unwrap();
        assert!(c.add_edge(SkillEdge::to_child("e2", "A", "B")).is_err());
        assert_eq!(c.rollup_for("A").unwrap().full_score, 0.0);
    }

    #[test]
    fn test_snapshot_rebuilds_equal_graph() {
        let original = diamond();
        let rebuilt =
            Collector::from_snapshot(original.snapshot(), &RollupConfig::default()).unwrap();
        assert_eq!(rebuilt.calculate_node_scores(), original.calculate_node_scores());
        assert_eq!(rebuilt.edge_count(), 4);
    }

    // -----------------------------------------------------------------------
    // Single-skill queries
    // -----------------------------------------------------------------------

    #[test]
    fn test_rollup_for_matches_full_calculation() {
        let c = diamond();
        let all = c.calculate_node_scores();
        assert_eq!(c.rollup_for("B").unwrap(), all["B"]);
        assert!(c.rollup_for("nope").is_err());
    }

    #[test]
    fn test_descendants_of() {
        let c = linear_chain();
        assert_eq!(c.descendants_of("B").unwrap(), ids(&["B", "C"]));
        assert_eq!(
            c.descendants_of("Z").unwrap_err(),
            GraphError::NotFound("Z".into())
        );
    }

    #[test]
    fn test_roots() {
        let c = diamond();
        let roots: Vec<&str> = c.roots().into_iter().map(|n| n.id.as_str()).collect();
        assert_eq!(roots, vec!["A"]);
        assert!(c.contains("D"));
    }

    #[test]
    fn test_cyclic_input_still_terminates() {
        let mut c = linear_chain();
        c.add_edge(SkillEdge::to_child("back", "C", "A")).unwrap();
        let results = c.calculate_node_scores();
        for rollup in results.values() {
            assert_eq!(rollup.descendants, ids(&["A", "B", "C"]));
            assert_eq!(rollup.observation_count(), 3);
        }
    }
}
