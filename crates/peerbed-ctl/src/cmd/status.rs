//! `peerbed status` — per-node liveness, PID, and identity.

use anyhow::Result;
use peerbed_core::config::HarnessConfig;

use crate::registry;

pub fn cmd_status() -> Result<()> {
    let config = HarnessConfig::load()?;
    let nodes = registry::load_nodes(&config.root)?;

    println!("═══════════════════════════════════════");
    println!("  Peerbed Testbed Status");
    println!("═══════════════════════════════════════");
    println!("  Root  : {}", config.root.display());
    println!("  Nodes : {}", nodes.len());

    for (i, node) in nodes.iter().enumerate() {
        let pid = match peerbed_node::liveness::running_pid(&node.dir) {
            Ok(pid) => pid,
            Err(e) => {
                println!("  ┌─ node {i}");
                println!("  └─ error : {e}");
                continue;
            }
        };

        println!("  ┌─ node {} ({})", i, node.flavor);
        println!("  │  dir      : {}", node.dir.display());
        match pid {
            Some(pid) => println!("  │  state    : running (pid {pid})"),
            None => println!("  │  state    : stopped"),
        }
        println!("  │  api port : {}", node.api_port);
        let identity = node.peer_identity();
        println!(
            "  └─ identity : {}",
            if identity.is_empty() { "(unknown)" } else { identity }
        );
    }

    Ok(())
}
