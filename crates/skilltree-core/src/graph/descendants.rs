//! Descendant closure: every skill reachable below a given skill.
//!
//! Each traversal carries its own visited set seeded with the start node, so
//! reconverging branches (diamonds) are counted once and an accidental cycle
//! cannot loop forever.

use std::collections::{HashSet, VecDeque};

use petgraph::graph::NodeIndex;

use super::store::GraphStore;

/// Computes reachable closures over a [`GraphStore`].
///
/// One breadth-first walk per start node, O(N) each. Skill trees are tens to
/// low hundreds of nodes, so resolving every node is cheap enough without
/// memoizing subtree unions.
#[derive(Debug, Clone, Copy)]
pub struct DescendantResolver<'a> {
    store: &'a GraphStore,
}

impl<'a> DescendantResolver<'a> {
    pub fn new(store: &'a GraphStore) -> Self {
        Self { store }
    }

    /// Closure of `start`, including `start` itself, in discovery order.
    ///
    /// Only membership is meaningful; the order is deterministic so that
    /// downstream score concatenation is reproducible.
    pub fn resolve(&self, start: NodeIndex) -> Vec<NodeIndex> {
        let mut visited: HashSet<NodeIndex> = HashSet::from([start]);
        let mut order = vec![start];
        let mut queue = VecDeque::from([start]);

        while let Some(current) = queue.pop_front() {
            for child in self.store.child_indices(current) {
                if visited.insert(child) {
                    order.push(child);
                    queue.push_back(child);
                }
            }
        }

        order
    }

    /// Closure for every node, in node insertion order.
    pub fn resolve_all(&self) -> Vec<(NodeIndex, Vec<NodeIndex>)> {
        self.store
            .indices()
            .map(|idx| (idx, self.resolve(idx)))
            .collect()
    }
}
