//! `peerbed run` — run a command under a node's environment.

use anyhow::{Context, Result};
use peerbed_core::config::HarnessConfig;

use crate::registry;

const USAGE: &str = "usage: peerbed run <n> -- <cmd...>";

pub fn cmd_run(args: &[&str]) -> Result<()> {
    let (first, rest) = args.split_first().context(USAGE)?;
    let index: usize = first
        .parse()
        .with_context(|| format!("invalid node index: {first}"))?;

    let (sep, cmdline) = rest.split_first().context(USAGE)?;
    anyhow::ensure!(*sep == "--" && !cmdline.is_empty(), USAGE);

    let config = HarnessConfig::load()?;
    let nodes = registry::load_nodes(&config.root)?;
    let index = registry::node_index(&nodes, index)?;

    let argv: Vec<String> = cmdline.iter().map(|s| s.to_string()).collect();
    let output = peerbed_node::run::run_cmd(&nodes[index], &argv)?;
    print!("{output}");
    Ok(())
}
