//! Bandwidth counters — an external query against the daemon's control
//! API, consumed by `peerbed attr`. The counters' meaning belongs to the
//! daemon; the harness only relays them.

use serde::Deserialize;

use peerbed_core::{Flavor, HarnessError, Node};

#[derive(Debug, Clone, Deserialize)]
pub struct BandwidthStats {
    pub total_in: u64,
    pub total_out: u64,
}

/// Fetch cumulative bandwidth counters from a running node.
pub async fn bandwidth(node: &Node) -> Result<BandwidthStats, HarnessError> {
    match node.flavor {
        Flavor::HttpApi => {
            let url = format!("http://127.0.0.1:{}/stats/bw", node.api_port);
            reqwest::get(&url)
                .await
                .map_err(|e| HarnessError::QueryFailed {
                    detail: e.to_string(),
                })?
                .json()
                .await
                .map_err(|e| HarnessError::QueryFailed {
                    detail: e.to_string(),
                })
        }
        Flavor::IdCommand => Err(HarnessError::QueryFailed {
            detail: "bandwidth stats are not supported by this daemon flavor".to_string(),
        }),
    }
}
