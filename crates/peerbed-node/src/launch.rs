//! Process launcher — fork the daemon, redirect its logs, record its PID.

use std::fs::OpenOptions;
use std::process::{Command, Stdio};

use peerbed_core::env::daemon_env;
use peerbed_core::{HarnessError, Node};

use crate::liveness;
use crate::pidfile;
use crate::run;

pub const STDOUT_FILE: &str = "daemon.stdout";
pub const STDERR_FILE: &str = "daemon.stderr";

/// Start the node's daemon process and return the child PID.
///
/// The liveness check happens here, immediately before the fork — not at
/// some earlier point — because a concurrent harness invocation may have
/// started the node in between. A live process means `AlreadyRunning`;
/// this function never double-launches.
///
/// stdout and stderr go to append-created log files inside the node
/// directory so the launcher and the daemon share no buffers, and
/// restarts keep prior log history.
pub fn start(node: &Node, extra_args: &[String]) -> Result<i32, HarnessError> {
    if let Some(pid) = liveness::running_pid(&node.dir)? {
        return Err(HarnessError::AlreadyRunning {
            dir: node.dir.clone(),
            pid,
        });
    }

    let open_log = |name: &str| {
        OpenOptions::new()
            .append(true)
            .create(true)
            .open(node.dir.join(name))
            .map_err(|source| HarnessError::LaunchFailed {
                binary: node.binary.clone(),
                source,
            })
    };
    let stdout = open_log(STDOUT_FILE)?;
    let stderr = open_log(STDERR_FILE)?;

    let child = Command::new(&node.binary)
        .arg("daemon")
        .args(node.flavor.daemon_args(node.api_port))
        .args(extra_args)
        .current_dir(&node.dir)
        .env_clear()
        .envs(daemon_env(&node.dir))
        .stdin(Stdio::null())
        .stdout(stdout)
        .stderr(stderr)
        .spawn()
        .map_err(|source| HarnessError::LaunchFailed {
            binary: node.binary.clone(),
            source,
        })?;

    let pid = child.id() as i32;

    // If the PID cannot be persisted the harness can never manage this
    // child again; fail the start and let the error carry the orphan PID.
    pidfile::write_pid(&node.dir, pid)?;

    // A zombie still answers signal 0; reap the child on exit so liveness
    // probes see it disappear.
    std::thread::spawn(move || {
        let mut child = child;
        let _ = child.wait();
    });

    tracing::info!(dir = %node.dir.display(), pid, "daemon started");
    Ok(pid)
}

/// Bootstrap a node's on-disk state before first start.
///
/// Creates the directory; flavors with an `init` subcommand run it under
/// the node environment, with captured output folded into the error on
/// failure.
pub fn init_node(node: &Node) -> Result<(), HarnessError> {
    std::fs::create_dir_all(&node.dir).map_err(|e| HarnessError::CommandFailed {
        command: format!("create {}", node.dir.display()),
        detail: e.to_string(),
    })?;

    if node.flavor.needs_init() {
        run::run_cmd(node, &[node.binary.clone(), "init".to_string()])?;
    }
    Ok(())
}
