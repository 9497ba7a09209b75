use thiserror::Error;

/// Errors raised while building or querying a skill graph.
///
/// Construction errors (`DuplicateNode`, `UnknownNode`, `DuplicateEdge`,
/// `InvalidScore`) abort graph population. `NotFound` signals a lookup on an
/// id that was never added, which is a caller or data bug rather than a
/// topological fact.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("skill '{0}' already exists")]
    DuplicateNode(String),

    #[error("edge '{edge_id}' references unknown skill '{node_id}'")]
    UnknownNode { edge_id: String, node_id: String },

    #[error("edge from '{from_id}' to '{to_id}' already exists")]
    DuplicateEdge { from_id: String, to_id: String },

    #[error("skill '{0}' not found")]
    NotFound(String),

    #[error("skill '{node_id}' has invalid score {score} (expected a value in 0..=1)")]
    InvalidScore { node_id: String, score: f64 },
}
