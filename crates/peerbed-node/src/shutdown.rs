//! Shutdown escalation — interrupt, interrupt, quit, kill.
//!
//! Some daemons need a moment to flush state on the first interrupt; the
//! second identical interrupt guards against the signal having been
//! dropped rather than ignored, before assuming the process is
//! unresponsive and escalating. The final SIGKILL wait is unbounded by
//! default — the OS is assumed to honor it eventually — but test
//! environments can bound it with [`kill_node_with_deadline`].

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;

use peerbed_core::HarnessError;

use crate::liveness::pid_alive;
use crate::pidfile;

const POLL_INTERVAL: Duration = Duration::from_millis(10);
const INTERRUPT_WAIT: Duration = Duration::from_millis(1000);
const QUIT_WAIT: Duration = Duration::from_millis(5000);

/// Stop the daemon recorded in `dir`, escalating until the process is
/// gone, then remove the PID file.
pub fn kill_node(dir: &Path) -> Result<(), HarnessError> {
    kill_node_with_deadline(dir, None)
}

/// Like [`kill_node`], but with an upper bound on the final SIGKILL wait.
///
/// Exceeding the bound returns `KillTimedOut` and leaves the PID file in
/// place — the process still exists, so the record must too.
pub fn kill_node_with_deadline(
    dir: &Path,
    final_wait: Option<Duration>,
) -> Result<(), HarnessError> {
    let pid = pidfile::read_pid(dir)?.ok_or_else(|| HarnessError::NotRunning {
        dir: dir.to_path_buf(),
    })?;

    let stages = [
        (Signal::SIGINT, INTERRUPT_WAIT),
        (Signal::SIGINT, INTERRUPT_WAIT),
        (Signal::SIGQUIT, QUIT_WAIT),
    ];

    let mut gone = false;
    for (sig, wait) in stages {
        send(pid, sig)?;
        if wait_gone(pid, Some(wait)) {
            gone = true;
            break;
        }
        tracing::debug!(pid, signal = sig.as_str(), "daemon survived, escalating");
    }

    if !gone {
        send(pid, Signal::SIGKILL)?;
        if !wait_gone(pid, final_wait) {
            return Err(HarnessError::KillTimedOut {
                pid,
                waited_ms: final_wait.unwrap_or_default().as_millis() as u64,
            });
        }
    }

    pidfile::remove_pid(dir)?;
    tracing::info!(dir = %dir.display(), pid, "daemon stopped");
    Ok(())
}

/// Deliver one signal. Failure (e.g. the process vanished between probe
/// and delivery) is a hard error distinguishable from "timed out
/// waiting"; the escalation sequence does not continue past it.
fn send(pid: i32, sig: Signal) -> Result<(), HarnessError> {
    signal::kill(Pid::from_raw(pid), sig).map_err(|errno| HarnessError::SignalFailed {
        pid,
        signal: sig.as_str(),
        source: std::io::Error::from_raw_os_error(errno as i32),
    })
}

/// Poll every 10 ms until the PID disappears. `deadline` of `None` polls
/// indefinitely. Returns whether the process is gone.
fn wait_gone(pid: i32, deadline: Option<Duration>) -> bool {
    let start = Instant::now();
    loop {
        if !pid_alive(pid) {
            return true;
        }
        if let Some(limit) = deadline {
            if start.elapsed() >= limit {
                return false;
            }
        }
        thread::sleep(POLL_INTERVAL);
    }
}
