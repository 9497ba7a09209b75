//! Arena-backed adjacency storage for one skill tree.
//!
//! Nodes and edges live in a `petgraph` `DiGraph`, addressed by index. Two side
//! tables give O(1) lookup of a node index by skill id and of an edge index by
//! ordered `(from, to)` pair. Edge indices are handed out in insertion order,
//! which is what child iteration order is defined by.

use std::collections::HashMap;

use petgraph::Direction::{Incoming, Outgoing};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use skilltree_types::config::DuplicateEdgePolicy;
use skilltree_types::error::GraphError;
use skilltree_types::skill::{EdgeDirection, SkillEdge, SkillNode};

/// Node and edge tables for a single query's skill graph.
///
/// Built fresh per request and discarded afterwards. Not meant to be shared
/// across threads while being populated.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    graph: DiGraph<SkillNode, SkillEdge>,
    index: HashMap<String, NodeIndex>,
    pairs: HashMap<(NodeIndex, NodeIndex), EdgeIndex>,
    duplicate_edges: DuplicateEdgePolicy,
}

impl GraphStore {
    pub fn new(duplicate_edges: DuplicateEdgePolicy) -> Self {
        Self {
            duplicate_edges,
            ..Self::default()
        }
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    /// Register a skill. Ids are unique; a node is never overwritten.
    pub fn add_node(&mut self, node: SkillNode) -> Result<NodeIndex, GraphError> {
        if self.index.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        if let Some(&score) = node.scores.iter().find(|s| !(0.0..=1.0).contains(*s)) {
            return Err(GraphError::InvalidScore {
                node_id: node.id,
                score,
            });
        }

        tracing::debug!(skill = %node.id, observations = node.scores.len(), "adding skill node");
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.index.insert(id, idx);
        Ok(idx)
    }

    /// Register a directed edge. Both endpoints must already exist.
    ///
    /// A second edge between the same ordered pair follows the configured
    /// [`DuplicateEdgePolicy`].
    pub fn add_edge(&mut self, edge: SkillEdge) -> Result<EdgeIndex, GraphError> {
        let from = self.require_endpoint(&edge, &edge.from_id)?;
        let to = self.require_endpoint(&edge, &edge.to_id)?;

        if let Some(&existing) = self.pairs.get(&(from, to)) {
            return match self.duplicate_edges {
                DuplicateEdgePolicy::Reject => Err(GraphError::DuplicateEdge {
                    from_id: edge.from_id,
                    to_id: edge.to_id,
                }),
                DuplicateEdgePolicy::Replace => {
                    tracing::warn!(
                        from = %edge.from_id,
                        to = %edge.to_id,
                        replaced = %self.graph[existing].id,
                        edge_id = %edge.id,
                        "duplicate edge replaces earlier edge"
                    );
                    self.graph[existing] = edge;
                    Ok(existing)
                }
            };
        }

        tracing::debug!(
            edge_id = %edge.id,
            from = %edge.from_id,
            to = %edge.to_id,
            direction = %edge.direction,
            "adding skill edge"
        );
        let idx = self.graph.add_edge(from, to, edge);
        self.pairs.insert((from, to), idx);
        Ok(idx)
    }

    fn require_endpoint(&self, edge: &SkillEdge, node_id: &str) -> Result<NodeIndex, GraphError> {
        self.index
            .get(node_id)
            .copied()
            .ok_or_else(|| GraphError::UnknownNode {
                edge_id: edge.id.clone(),
                node_id: node_id.to_string(),
            })
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    /// Like [`node_index`](Self::node_index) but an unknown id is an error.
    pub fn require(&self, id: &str) -> Result<NodeIndex, GraphError> {
        self.node_index(id)
            .ok_or_else(|| GraphError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node(&self, idx: NodeIndex) -> &SkillNode {
        &self.graph[idx]
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Id of the direct edge `from_id -> to_id`, if there is one.
    ///
    /// Deeper descendants do not count: only a single hop matches.
    pub fn edge_id(&self, from_id: &str, to_id: &str) -> Option<&str> {
        let from = self.node_index(from_id)?;
        let to = self.node_index(to_id)?;
        self.edge_id_between(from, to)
    }

    pub(crate) fn edge_id_between(&self, from: NodeIndex, to: NodeIndex) -> Option<&str> {
        self.pairs
            .get(&(from, to))
            .map(|&e| self.graph[e].id.as_str())
    }

    /// Skills directly below `id` via child edges, in edge insertion order.
    pub fn children_of(&self, id: &str) -> Result<Vec<&SkillNode>, GraphError> {
        let idx = self.require(id)?;
        Ok(self
            .child_indices(idx)
            .into_iter()
            .map(|c| &self.graph[c])
            .collect())
    }

    /// Child node indices of `idx`, ordered by edge insertion.
    pub(crate) fn child_indices(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges_directed(idx, Outgoing)
            .filter(|e| e.weight().direction == EdgeDirection::ToChild)
            .map(|e| (e.id(), e.target()))
            .collect();
        // petgraph walks its adjacency list newest-first; edge indices are
        // assigned in insertion order and never reused (no removals).
        out.sort_unstable_by_key(|(e, _)| e.index());
        out.into_iter().map(|(_, n)| n).collect()
    }

    /// Node indices in insertion order.
    pub(crate) fn indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &SkillNode> + '_ {
        self.graph.node_weights()
    }

    /// Edges in insertion order (a replaced edge keeps its original slot).
    pub fn edges(&self) -> impl Iterator<Item = &SkillEdge> + '_ {
        self.graph.edge_weights()
    }

    /// Skills with no incoming child edge, in insertion order.
    pub fn roots(&self) -> Vec<&SkillNode> {
        self.graph
            .node_indices()
            .filter(|&n| {
                !self
                    .graph
                    .edges_directed(n, Incoming)
                    .any(|e| e.weight().direction == EdgeDirection::ToChild)
            })
            .map(|n| &self.graph[n])
            .collect()
    }

    /// Id of some skill on a cycle, or `None` when the graph is acyclic.
    pub fn find_cycle(&self) -> Option<&str> {
        toposort(&self.graph, None)
            .err()
            .map(|cycle| self.graph[cycle.node_id()].id.as_str())
    }
}
