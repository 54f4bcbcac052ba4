//! `peerbed attr` — read a node attribute.

use anyhow::{Context, Result};
use peerbed_core::config::HarnessConfig;
use peerbed_core::{Attr, HarnessError};
use peerbed_node::stats;

use crate::registry;

pub async fn cmd_attr(args: &[&str]) -> Result<()> {
    let [name, index] = args else {
        anyhow::bail!("usage: peerbed attr <name> <n>  (id|path|bw-in|bw-out)");
    };
    let attr: Attr = name.parse().map_err(anyhow::Error::msg)?;
    let index: usize = index
        .parse()
        .with_context(|| format!("invalid node index: {index}"))?;

    let config = HarnessConfig::load()?;
    let nodes = registry::load_nodes(&config.root)?;
    let index = registry::node_index(&nodes, index)?;
    let node = &nodes[index];

    match attr {
        Attr::Id => {
            let identity = node.peer_identity();
            if identity.is_empty() {
                return Err(HarnessError::MissingIdentity {
                    dir: node.dir.clone(),
                }
                .into());
            }
            println!("{identity}");
        }
        Attr::Path => println!("{}", node.dir.display()),
        Attr::BwIn => println!("{}", stats::bandwidth(node).await?.total_in),
        Attr::BwOut => println!("{}", stats::bandwidth(node).await?.total_out),
    }
    Ok(())
}
