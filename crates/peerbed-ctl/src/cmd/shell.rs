//! `peerbed shell` — spawn an interactive shell wired to a node.

use std::os::unix::process::CommandExt;
use std::process::Command;

use anyhow::{Context, Result};
use peerbed_core::config::HarnessConfig;
use peerbed_core::env::shell_env;

use crate::registry;

/// Exec `$SHELL` with `DAEMON_PATH` pointing at node `n` and a `NODE<i>`
/// identity variable per cluster node. Replaces this process on success.
pub fn cmd_shell(args: &[&str]) -> Result<()> {
    let [index] = args else {
        anyhow::bail!("usage: peerbed shell <n>");
    };
    let index: usize = index
        .parse()
        .with_context(|| format!("invalid node index: {index}"))?;

    let config = HarnessConfig::load()?;
    let nodes = registry::load_nodes(&config.root)?;
    let index = registry::node_index(&nodes, index)?;

    let shell = std::env::var("SHELL").context("SHELL is not set")?;
    let env = shell_env(&nodes, &nodes[index])?;

    println!("Spawning {shell} for node {index} — exit to return.");
    let err = Command::new(&shell).env_clear().envs(env).exec();
    Err(err).with_context(|| format!("failed to exec {shell}"))
}
