//! `peerbed start`, `stop`, and `restart`.

use anyhow::{Context, Result};
use peerbed_core::config::HarnessConfig;
use peerbed_core::{HarnessError, Node};

use crate::registry;

/// Parse `[n] [-- extra...]`: an optional node index followed by
/// pass-through daemon arguments.
fn parse_selection(args: &[&str]) -> Result<(Option<usize>, Vec<String>)> {
    let mut index = None;
    let mut rest = args;

    if let Some((first, tail)) = rest.split_first() {
        if *first != "--" {
            index = Some(
                first
                    .parse()
                    .with_context(|| format!("invalid node index: {first}"))?,
            );
            rest = tail;
        }
    }

    let extra = match rest.split_first() {
        Some((sep, tail)) => {
            anyhow::ensure!(*sep == "--", "unexpected argument: {sep}");
            tail.iter().map(|s| s.to_string()).collect()
        }
        None => Vec::new(),
    };
    Ok((index, extra))
}

fn selected(nodes: &[Node], index: Option<usize>) -> Result<Vec<usize>> {
    match index {
        Some(i) => Ok(vec![registry::node_index(nodes, i)?]),
        None => Ok((0..nodes.len()).collect()),
    }
}

async fn start_nodes(
    config: &HarnessConfig,
    nodes: &mut [Node],
    selection: &[usize],
    extra: &[String],
) -> Result<()> {
    for &i in selection {
        let node = &mut nodes[i];
        let pid = peerbed_node::start(node, extra)
            .with_context(|| format!("failed to start node {i}"))?;
        println!("Started daemon {}, pid = {}", node.dir.display(), pid);

        peerbed_node::wait_until_ready(node, &config.readiness)
            .await
            .with_context(|| format!("node {i} never became ready"))?;
        println!("Node {} ready: {}", i, node.peer_identity());
    }
    Ok(())
}

/// Stop a set of nodes. When stopping everything, a node that is not
/// running is reported and skipped; an explicit single-node stop
/// surfaces it as an error.
fn stop_nodes(nodes: &[Node], selection: &[usize], tolerate_stopped: bool) -> Result<()> {
    for &i in selection {
        match peerbed_node::kill_node(&nodes[i].dir) {
            Ok(()) => println!("Stopped node {i}"),
            Err(HarnessError::NotRunning { .. }) if tolerate_stopped => {
                println!("Node {i} is not running")
            }
            Err(e) => return Err(e).with_context(|| format!("failed to stop node {i}")),
        }
    }
    Ok(())
}

pub async fn cmd_start(args: &[&str]) -> Result<()> {
    let config = HarnessConfig::load()?;
    let mut nodes = registry::load_nodes(&config.root)?;
    let (index, extra) = parse_selection(args)?;
    let selection = selected(&nodes, index)?;

    start_nodes(&config, &mut nodes, &selection, &extra).await?;

    // Persist discovered identities so a later invocation can broadcast
    // them without re-querying.
    registry::save_nodes(&config.root, &nodes)?;
    Ok(())
}

pub fn cmd_stop(args: &[&str]) -> Result<()> {
    let config = HarnessConfig::load()?;
    let nodes = registry::load_nodes(&config.root)?;
    let (index, extra) = parse_selection(args)?;
    anyhow::ensure!(extra.is_empty(), "stop takes no extra arguments");
    let selection = selected(&nodes, index)?;

    stop_nodes(&nodes, &selection, index.is_none())
}

pub async fn cmd_restart(args: &[&str]) -> Result<()> {
    let config = HarnessConfig::load()?;
    let mut nodes = registry::load_nodes(&config.root)?;
    let (index, extra) = parse_selection(args)?;
    let selection = selected(&nodes, index)?;

    stop_nodes(&nodes, &selection, true)?;
    start_nodes(&config, &mut nodes, &selection, &extra).await?;

    registry::save_nodes(&config.root, &nodes)?;
    Ok(())
}
