//! `peerbed init` — allocate and bootstrap node directories.

use anyhow::{Context, Result};
use peerbed_core::config::HarnessConfig;
use peerbed_core::{Flavor, Node};

use crate::registry;

pub fn cmd_init(args: &[&str]) -> Result<()> {
    let mut count: usize = 1;
    let mut flavor: Option<Flavor> = None;
    let mut binary: Option<String> = None;
    let mut port_base: Option<u16> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i] {
            "--count" => {
                i += 1;
                count = args
                    .get(i)
                    .context("--count requires a value")?
                    .parse()
                    .context("--count must be a number")?;
            }
            "--flavor" => {
                i += 1;
                let value = args.get(i).context("--flavor requires a value")?;
                flavor = Some(value.parse().map_err(anyhow::Error::msg)?);
            }
            "--binary" => {
                i += 1;
                binary = Some(
                    args.get(i)
                        .context("--binary requires a value")?
                        .to_string(),
                );
            }
            "--port-base" => {
                i += 1;
                port_base = Some(
                    args.get(i)
                        .context("--port-base requires a value")?
                        .parse()
                        .context("--port-base must be a port number")?,
                );
            }
            other => anyhow::bail!("unknown init option: {other}"),
        }
        i += 1;
    }

    if let Err(e) = HarnessConfig::write_default_if_missing() {
        tracing::warn!(error = %e, "failed to write default config");
    }
    let config = HarnessConfig::load().context("failed to load harness config")?;
    let flavor = flavor.unwrap_or(config.daemon.flavor);
    let binary = binary.unwrap_or_else(|| config.daemon.binary.clone());
    let port_base = port_base.unwrap_or(config.daemon.api_port_base);

    std::fs::create_dir_all(&config.root)
        .with_context(|| format!("failed to create testbed root {}", config.root.display()))?;

    let mut nodes = Vec::with_capacity(count);
    for i in 0..count {
        let node = Node::new(
            config.root.join(i.to_string()),
            binary.clone(),
            flavor,
            port_base + i as u16,
        );
        peerbed_node::init_node(&node).with_context(|| format!("failed to initialize node {i}"))?;
        println!("Initialized node {} at {}", i, node.dir.display());
        nodes.push(node);
    }

    registry::save_nodes(&config.root, &nodes)?;
    println!(
        "Testbed ready: {} node(s) under {}",
        nodes.len(),
        config.root.display()
    );
    Ok(())
}
