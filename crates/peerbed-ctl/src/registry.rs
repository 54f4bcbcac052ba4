//! Node registry — the persisted set of configured nodes.
//!
//! A `nodes.json` under the testbed root, in index order. The lifecycle
//! library only consumes the loaded list; this crate owns the format.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use peerbed_core::Node;

pub const REGISTRY_FILE: &str = "nodes.json";

pub fn registry_path(root: &Path) -> PathBuf {
    root.join(REGISTRY_FILE)
}

/// Load every configured node, in index order.
pub fn load_nodes(root: &Path) -> Result<Vec<Node>> {
    let path = registry_path(root);
    let text = fs::read_to_string(&path).with_context(|| {
        format!(
            "failed to read {} — did you run `peerbed init`?",
            path.display()
        )
    })?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Persist the node list. Atomic (temp file, then rename) so a crashed
/// invocation cannot leave a half-written registry behind.
pub fn save_nodes(root: &Path, nodes: &[Node]) -> Result<()> {
    let path = registry_path(root);
    let tmp = path.with_extension("json.tmp");
    let text = serde_json::to_string_pretty(nodes).context("failed to serialize registry")?;
    fs::write(&tmp, text).with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, &path)
        .with_context(|| format!("failed to rename {} to {}", tmp.display(), path.display()))?;
    Ok(())
}

/// Bounds-checked node lookup by CLI index.
pub fn node_index(nodes: &[Node], index: usize) -> Result<usize> {
    anyhow::ensure!(
        index < nodes.len(),
        "no node {} (registry has {} node(s))",
        index,
        nodes.len()
    );
    Ok(index)
}
