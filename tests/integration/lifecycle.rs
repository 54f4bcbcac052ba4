use crate::*;

use std::fs;
use std::time::Duration;

use peerbed_core::HarnessError;
use peerbed_node::{is_alive, kill_node, start};

#[test]
fn start_writes_pid_file_and_node_is_alive() {
    let root = scratch_root("start");
    let binary = fake_daemon(&root, COOPERATIVE, true);
    let node = make_node(&root, 0, &binary, Flavor::IdCommand, 0);

    assert!(!is_alive(&node.dir).unwrap(), "fresh node must not be alive");

    let pid = start(&node, &[]).unwrap();

    let pid_file = node.dir.join("daemon.pid");
    assert!(
        wait_for(Duration::from_millis(100), || pid_file.exists()),
        "pid file did not appear"
    );
    let recorded: i32 = fs::read_to_string(&pid_file).unwrap().trim().parse().unwrap();
    assert!(recorded > 0);
    assert_eq!(recorded, pid);
    assert!(is_alive(&node.dir).unwrap());

    // The launcher must have redirected both streams into the node dir.
    assert!(node.dir.join("daemon.stdout").exists());
    assert!(node.dir.join("daemon.stderr").exists());

    kill_node(&node.dir).unwrap();
    assert!(!is_alive(&node.dir).unwrap());
    assert!(!pid_file.exists(), "pid file must be gone after kill");

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn double_start_returns_already_running_and_keeps_pid() {
    let root = scratch_root("double-start");
    let binary = fake_daemon(&root, COOPERATIVE, true);
    let node = make_node(&root, 0, &binary, Flavor::IdCommand, 0);

    let pid = start(&node, &[]).unwrap();

    match start(&node, &[]) {
        Err(HarnessError::AlreadyRunning { pid: running, .. }) => assert_eq!(running, pid),
        other => panic!("expected AlreadyRunning, got {other:?}"),
    }

    // The original process is untouched and its record unchanged.
    let recorded: i32 = fs::read_to_string(node.dir.join("daemon.pid"))
        .unwrap()
        .trim()
        .parse()
        .unwrap();
    assert_eq!(recorded, pid);
    assert!(is_alive(&node.dir).unwrap());

    kill_node(&node.dir).unwrap();
    let _ = fs::remove_dir_all(&root);
}

#[test]
fn missing_binary_fails_launch_without_pid_file() {
    let root = scratch_root("missing-binary");
    let node = make_node(&root, 0, &root.join("no-such-daemon"), Flavor::IdCommand, 0);

    match start(&node, &[]) {
        Err(HarnessError::LaunchFailed { .. }) => {}
        other => panic!("expected LaunchFailed, got {other:?}"),
    }
    assert!(!node.dir.join("daemon.pid").exists());
    assert!(!is_alive(&node.dir).unwrap());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn node_can_be_restarted_after_kill() {
    let root = scratch_root("restart");
    let binary = fake_daemon(&root, COOPERATIVE, true);
    let node = make_node(&root, 0, &binary, Flavor::IdCommand, 0);

    let first = start(&node, &[]).unwrap();
    kill_node(&node.dir).unwrap();
    assert!(!is_alive(&node.dir).unwrap());

    let second = start(&node, &[]).unwrap();
    assert_ne!(first, second, "restart must fork a fresh process");
    assert!(is_alive(&node.dir).unwrap());

    kill_node(&node.dir).unwrap();
    let _ = fs::remove_dir_all(&root);
}
