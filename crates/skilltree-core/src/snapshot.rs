//! JSON snapshots of a skill tree.
//!
//! A snapshot is the node and edge lists a caller fetched for one tree, in the
//! order they should be added. Useful for fixtures and offline replays.

use std::path::Path;

use anyhow::Context as _;

use skilltree_types::config::RollupConfig;
use skilltree_types::skill::GraphSnapshot;

use crate::collector::Collector;

/// Read a [`GraphSnapshot`] from a JSON file.
pub fn load_snapshot(path: &Path) -> anyhow::Result<GraphSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse snapshot {}", path.display()))
}

/// Read a snapshot and build a [`Collector`] from it.
pub fn load_collector(path: &Path, config: &RollupConfig) -> anyhow::Result<Collector> {
    let snapshot = load_snapshot(path)?;
    let collector = Collector::from_snapshot(snapshot, config)
        .with_context(|| format!("snapshot {} is not a valid skill graph", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        nodes = collector.node_count(),
        edges = collector.edge_count(),
        "loaded skill graph snapshot"
    );
    Ok(collector)
}
