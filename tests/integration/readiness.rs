use crate::*;

use std::fs;

use peerbed_core::config::ReadinessConfig;
use peerbed_core::HarnessError;
use peerbed_node::{kill_node, start, wait_until_ready};

#[tokio::test]
async fn readiness_discovers_identity_for_the_id_command_flavor() {
    let root = scratch_root("ready-id");
    let binary = fake_daemon(&root, COOPERATIVE, true);
    let mut node = make_node(&root, 0, &binary, Flavor::IdCommand, 0);

    start(&node, &[]).unwrap();
    wait_until_ready(&mut node, &ReadinessConfig::default())
        .await
        .unwrap();

    let identity = node.peer_identity().to_string();
    assert!(
        identity.starts_with("peer-"),
        "unexpected identity: {identity:?}"
    );

    kill_node(&node.dir).unwrap();
    let _ = fs::remove_dir_all(&root);
}

#[tokio::test]
async fn readiness_times_out_when_the_daemon_never_identifies() {
    let root = scratch_root("ready-timeout");
    let binary = fake_daemon(&root, COOPERATIVE, false);
    let mut node = make_node(&root, 0, &binary, Flavor::IdCommand, 0);

    start(&node, &[]).unwrap();

    let cfg = ReadinessConfig {
        settle_ms: 50,
        attempts: 3,
        retry_ms: 50,
    };
    match wait_until_ready(&mut node, &cfg).await {
        Err(HarnessError::ReadinessTimeout { attempts, .. }) => assert_eq!(attempts, 3),
        other => panic!("expected ReadinessTimeout, got {other:?}"),
    }
    assert_eq!(node.peer_id, None, "no identity may be recorded on timeout");

    kill_node(&node.dir).unwrap();
    let _ = fs::remove_dir_all(&root);
}

#[tokio::test]
async fn readiness_discovers_identity_over_http() {
    if !python3_available() {
        eprintln!("SKIP: python3 not available for the HTTP fake daemon");
        return;
    }

    let root = scratch_root("ready-http");
    let binary = fake_http_daemon(&root);
    let api_port = 41000 + (std::process::id() % 1000) as u16;
    let mut node = make_node(&root, 0, &binary, Flavor::HttpApi, api_port);

    start(&node, &[]).unwrap();

    // The interpreter takes longer to come up than a shell one-liner;
    // give readiness a wider window than the defaults.
    let cfg = ReadinessConfig {
        settle_ms: 100,
        attempts: 30,
        retry_ms: 100,
    };
    wait_until_ready(&mut node, &cfg).await.unwrap();
    assert_eq!(node.peer_identity(), format!("peer-http-{api_port}"));

    kill_node(&node.dir).unwrap();
    let _ = fs::remove_dir_all(&root);
}
