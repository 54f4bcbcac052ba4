//! PID file handling — the on-disk process record for a node.
//!
//! The file holds a plain-text positive integer and exists iff the
//! harness believes the node may be running. It is deliberately the only
//! cross-process-visible state, so a separate tool invocation can
//! re-attach to a running node.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use peerbed_core::HarnessError;

pub const PID_FILE: &str = "daemon.pid";

pub fn pid_path(dir: &Path) -> PathBuf {
    dir.join(PID_FILE)
}

/// Read the recorded PID. A missing file means "not running" (`None`);
/// an unreadable or unparsable one is corrupt state needing manual
/// intervention.
pub fn read_pid(dir: &Path) -> Result<Option<i32>, HarnessError> {
    let path = pid_path(dir);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(HarnessError::CorruptState {
                path,
                detail: e.to_string(),
            })
        }
    };
    match contents.trim().parse::<i32>() {
        Ok(pid) if pid > 0 => Ok(Some(pid)),
        _ => Err(HarnessError::CorruptState {
            path,
            detail: format!("expected a positive integer, got {:?}", contents.trim()),
        }),
    }
}

/// Persist a freshly forked child's PID as plain text.
pub fn write_pid(dir: &Path, pid: i32) -> Result<(), HarnessError> {
    let path = pid_path(dir);
    fs::write(&path, pid.to_string()).map_err(|source| HarnessError::PersistFailed {
        path,
        pid,
        source,
    })
}

/// Remove the PID file once the process is confirmed gone. "Already
/// absent" is fine; any other failure leaves harness state inconsistent
/// and is surfaced as `CleanupFailed`.
pub fn remove_pid(dir: &Path) -> Result<(), HarnessError> {
    let path = pid_path(dir);
    match fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(HarnessError::CleanupFailed { path, source }),
    }
}
