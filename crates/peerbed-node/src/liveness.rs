//! Liveness probing via zero-effect signals.

use std::path::Path;

use nix::errno::Errno;
use nix::sys::signal;
use nix::unistd::Pid;

use peerbed_core::HarnessError;

use crate::pidfile;

/// Is the process with this PID currently present?
///
/// Sends signal 0 — an existence check that never disturbs the target.
/// EPERM means the process exists but belongs to someone else; that still
/// counts as alive.
pub fn pid_alive(pid: i32) -> bool {
    match signal::kill(Pid::from_raw(pid), None) {
        Ok(()) => true,
        Err(Errno::EPERM) => true,
        Err(_) => false,
    }
}

/// Whether the node in `dir` has a live daemon process.
///
/// A missing PID file is simply "not alive", not an error; an unparsable
/// one is `CorruptState`.
pub fn is_alive(dir: &Path) -> Result<bool, HarnessError> {
    match pidfile::read_pid(dir)? {
        Some(pid) => Ok(pid_alive(pid)),
        None => Ok(false),
    }
}

/// The live PID recorded for `dir`, if any. Start uses this for its
/// precondition check so the refusal can name the offending process.
pub fn running_pid(dir: &Path) -> Result<Option<i32>, HarnessError> {
    match pidfile::read_pid(dir)? {
        Some(pid) if pid_alive(pid) => Ok(Some(pid)),
        _ => Ok(None),
    }
}
