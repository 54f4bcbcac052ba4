//! Environment derivation — pure transformations, no ambient mutation.
//!
//! The process-wide environment is only ever read here; derived lists are
//! handed to child processes explicitly, so every function is testable
//! against a plain slice.

use std::path::Path;

use crate::error::HarnessError;
use crate::node::Node;

/// Environment variable naming the active node's data directory.
pub const DAEMON_PATH: &str = "DAEMON_PATH";

/// Return a copy of `base` with `key` set to `value`.
///
/// An existing entry is overwritten in place (position preserved) so the
/// variable appears exactly once; otherwise the pair is appended.
pub fn derive_env(base: &[(String, String)], key: &str, value: &str) -> Vec<(String, String)> {
    let mut env = base.to_vec();
    match env.iter_mut().find(|(k, _)| k == key) {
        Some(entry) => entry.1 = value.to_string(),
        None => env.push((key.to_string(), value.to_string())),
    }
    env
}

/// The environment a node's daemon and its subcommands run under: the
/// current process environment with `DAEMON_PATH` pointing at `dir`.
pub fn daemon_env(dir: &Path) -> Vec<(String, String)> {
    let base: Vec<(String, String)> = std::env::vars().collect();
    derive_env(&base, DAEMON_PATH, &dir.to_string_lossy())
}

/// Environment for an interactive shell against `active`: `DAEMON_PATH`
/// for the active node plus one `NODE<i>` variable per registry node
/// carrying its peer identity.
///
/// Any node without a discovered identity is a hard error — downstream
/// consumers expect a fully-addressable cluster.
pub fn shell_env(nodes: &[Node], active: &Node) -> Result<Vec<(String, String)>, HarnessError> {
    let base: Vec<(String, String)> = std::env::vars().collect();
    let mut env = derive_env(&base, DAEMON_PATH, &active.dir.to_string_lossy());
    for (i, node) in nodes.iter().enumerate() {
        let peer_id = node.peer_identity();
        if peer_id.is_empty() {
            return Err(HarnessError::MissingIdentity {
                dir: node.dir.clone(),
            });
        }
        env = derive_env(&env, &format!("NODE{i}"), peer_id);
    }
    Ok(env)
}
