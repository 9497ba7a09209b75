//! Rollup configuration loader.
//!
//! Reads a `rollup.toml` and deserializes it into [`RollupConfig`]. The
//! lenient loader falls back to defaults when the file is missing or
//! malformed; the strict parser reports why.

use std::path::Path;

use anyhow::{Context as _, bail};

use skilltree_types::config::RollupConfig;

/// Parse and validate a TOML rollup configuration.
pub fn parse_rollup_config(content: &str) -> anyhow::Result<RollupConfig> {
    let config: RollupConfig =
        toml::from_str(content).context("invalid rollup configuration")?;

    if !(0.0..=1.0).contains(&config.neutral_score) {
        bail!(
            "neutral_score must be within 0..=1, got {}",
            config.neutral_score
        );
    }

    Ok(config)
}

/// Load the rollup configuration from `path`.
///
/// - If the file does not exist, returns [`RollupConfig::default()`].
/// - If the file cannot be read or fails validation, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub fn load_rollup_config(path: &Path) -> RollupConfig {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No rollup config at {}, using defaults", path.display());
            return RollupConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return RollupConfig::default();
        }
    };

    match parse_rollup_config(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to load {}: {err:#}, using defaults", path.display());
            RollupConfig::default()
        }
    }
}
