//! Readiness — block until a freshly started node answers an identity
//! query.
//!
//! "Ready" is distinct from "the process exists": the daemon needs time
//! after the fork to bind its control API, and callers must not dial a
//! node that has not identified itself yet.

use std::time::Duration;

use serde::Deserialize;

use peerbed_core::config::ReadinessConfig;
use peerbed_core::{Flavor, HarnessError, Node};

use crate::run;

#[derive(Deserialize)]
struct IdResponse {
    peer_id: String,
}

/// Poll the node until it reports its identity, recording it on the node.
///
/// Sleeps `settle_ms` once for the fork to settle, then issues up to
/// `attempts` identity queries `retry_ms` apart, accepting the first
/// non-empty identity. Exhausting the window is a hard
/// `ReadinessTimeout` — a node that never identified itself is unusable
/// by everything downstream, so the failure surfaces here rather than as
/// an empty identity later.
pub async fn wait_until_ready(
    node: &mut Node,
    cfg: &ReadinessConfig,
) -> Result<(), HarnessError> {
    tokio::time::sleep(Duration::from_millis(cfg.settle_ms)).await;

    for attempt in 1..=cfg.attempts {
        match identity_query(node).await {
            Ok(peer_id) if !peer_id.is_empty() => {
                tracing::info!(dir = %node.dir.display(), peer_id, "node ready");
                node.peer_id = Some(peer_id);
                return Ok(());
            }
            Ok(_) => tracing::debug!(attempt, "identity query returned an empty id"),
            Err(e) => tracing::debug!(attempt, error = %e, "identity query failed, retrying"),
        }
        tokio::time::sleep(Duration::from_millis(cfg.retry_ms)).await;
    }

    Err(HarnessError::ReadinessTimeout {
        dir: node.dir.clone(),
        attempts: cfg.attempts,
    })
}

/// One identity query, per daemon flavor.
async fn identity_query(node: &Node) -> Result<String, HarnessError> {
    match node.flavor {
        Flavor::HttpApi => {
            let url = format!("http://127.0.0.1:{}/id", node.api_port);
            let resp: IdResponse = reqwest::get(&url)
                .await
                .map_err(|e| HarnessError::QueryFailed {
                    detail: e.to_string(),
                })?
                .json()
                .await
                .map_err(|e| HarnessError::QueryFailed {
                    detail: e.to_string(),
                })?;
            Ok(resp.peer_id)
        }
        Flavor::IdCommand => {
            let args = vec![node.binary.clone(), "id".to_string()];
            Ok(run::run_cmd(node, &args)?.trim().to_string())
        }
    }
}
