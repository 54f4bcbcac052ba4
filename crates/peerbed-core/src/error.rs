//! Harness error taxonomy.
//!
//! Lifecycle operations return these directly; the CLI binary wraps them
//! with anyhow context at its edges. Nothing is silently swallowed: the
//! only documented retry loops are liveness polling and readiness probing.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// Start attempted on a directory whose PID file points at a live
    /// process. Recoverable — the caller decides to skip or kill first.
    #[error("node in {} is already running (pid {pid})", .dir.display())]
    AlreadyRunning { dir: PathBuf, pid: i32 },

    /// Exec-level failure: binary missing, not executable, fork refused.
    #[error("failed to launch {binary}: {source}")]
    LaunchFailed {
        binary: String,
        source: std::io::Error,
    },

    /// The daemon forked but its PID could not be persisted. The child is
    /// now an orphan the harness cannot manage; `pid` identifies it so
    /// the caller can surface or reap it.
    #[error("daemon started (pid {pid}) but writing {} failed: {source}", .path.display())]
    PersistFailed {
        path: PathBuf,
        pid: i32,
        source: std::io::Error,
    },

    /// PID file exists but is unreadable or unparsable. Manual
    /// intervention needed.
    #[error("pid file {} is corrupt: {detail}", .path.display())]
    CorruptState { path: PathBuf, detail: String },

    /// No PID file in the directory; stop fails before any signal is sent.
    #[error("no daemon running in {}", .dir.display())]
    NotRunning { dir: PathBuf },

    /// A termination signal could not be delivered. Ends the escalation
    /// sequence; no further signals are attempted.
    #[error("failed to send {signal} to pid {pid}: {source}")]
    SignalFailed {
        pid: i32,
        signal: &'static str,
        source: std::io::Error,
    },

    /// The process is gone but its PID file could not be removed. On-disk
    /// harness state is now inconsistent; callers must not continue.
    #[error("failed to remove pid file {}: {source}", .path.display())]
    CleanupFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Only reachable when a caller bounds the final SIGKILL wait.
    #[error("pid {pid} survived SIGKILL for {waited_ms} ms")]
    KillTimedOut { pid: i32, waited_ms: u64 },

    /// The node never answered an identity query within the retry window.
    #[error("node in {} did not report an identity after {attempts} attempts", .dir.display())]
    ReadinessTimeout { dir: PathBuf, attempts: u32 },

    /// A daemon subcommand exited non-zero or could not be run; `detail`
    /// carries the captured stderr where available.
    #[error("command `{command}` failed: {detail}")]
    CommandFailed { command: String, detail: String },

    /// A control-API query failed (connection refused, bad response).
    #[error("control api query failed: {detail}")]
    QueryFailed { detail: String },

    /// Identity broadcast was requested but a registry node has none.
    #[error("node in {} has no peer identity", .dir.display())]
    MissingIdentity { dir: PathBuf },

    /// A daemon-owned artifact (`api` file, `config` file) is missing or
    /// unusable.
    #[error("daemon artifact {} unusable: {detail}", .path.display())]
    ConfigArtifact { path: PathBuf, detail: String },
}
