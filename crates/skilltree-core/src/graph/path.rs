//! Representative path reconstruction between two skills.
//!
//! Breadth-first search from the start skill over child edges. Each node's
//! parent is recorded the first time it is discovered, and children are
//! expanded in edge insertion order, so when several shortest paths exist the
//! one returned is the first discovered under that order. The result is
//! shortest by hop count and deterministic, but not unique.

use std::collections::{HashMap, VecDeque};

use petgraph::graph::NodeIndex;

use skilltree_types::error::GraphError;
use skilltree_types::skill::SkillPath;

use super::store::GraphStore;

#[derive(Debug, Clone, Copy)]
pub struct PathFinder<'a> {
    store: &'a GraphStore,
}

impl<'a> PathFinder<'a> {
    pub fn new(store: &'a GraphStore) -> Self {
        Self { store }
    }

    /// Shortest path from `start_id` down to `target_id`.
    ///
    /// - Either id never added: [`GraphError::NotFound`].
    /// - Target outside the start's closure: `Ok` with an empty path.
    /// - `start_id == target_id`: `([start], [])`.
    pub fn find(&self, start_id: &str, target_id: &str) -> Result<SkillPath, GraphError> {
        let start = self.store.require(start_id)?;
        let target = self.store.require(target_id)?;

        let Some(node_path) = self.search(start, target) else {
            tracing::debug!(start = start_id, target = target_id, "target not reachable from start");
            return Ok(SkillPath::default());
        };

        let mut edge_ids = Vec::with_capacity(node_path.len().saturating_sub(1));
        for hop in node_path.windows(2) {
            // Every hop came from a child edge, so the pair is always indexed.
            if let Some(edge_id) = self.store.edge_id_between(hop[0], hop[1]) {
                edge_ids.push(edge_id.to_string());
            }
        }

        let node_ids: Vec<String> = node_path
            .iter()
            .map(|&n| self.store.node(n).id.clone())
            .collect();
        tracing::debug!(start = start_id, target = target_id, hops = edge_ids.len(), "path found");

        Ok(SkillPath { node_ids, edge_ids })
    }

    /// BFS with parent pointers; `None` when `target` is unreachable.
    fn search(&self, start: NodeIndex, target: NodeIndex) -> Option<Vec<NodeIndex>> {
        let mut parent: HashMap<NodeIndex, Option<NodeIndex>> = HashMap::from([(start, None)]);
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            if current == target {
                return Some(Self::walk_back(&parent, target));
            }
            for child in self.store.child_indices(current) {
                parent.entry(child).or_insert_with(|| {
                    queue.push_back(child);
                    Some(current)
                });
            }
        }

        None
    }

    fn walk_back(parent: &HashMap<NodeIndex, Option<NodeIndex>>, target: NodeIndex) -> Vec<NodeIndex> {
        let mut path = vec![target];
        let mut cursor = target;
        while let Some(&Some(prev)) = parent.get(&cursor) {
            path.push(prev);
            cursor = prev;
        }
        path.reverse();
        path
    }
}
