//! peerbed-node — lifecycle operations for managed daemon processes.
//!
//! Start with readiness detection, PID tracking, liveness probing, and
//! graceful-to-forceful shutdown escalation. The PID file inside each node
//! directory is the sole source of truth for "is this node running";
//! every mutating operation re-verifies it on entry instead of trusting
//! in-memory state, because a separate harness invocation may be racing
//! against the same directory.

pub mod launch;
pub mod liveness;
pub mod pidfile;
pub mod ready;
pub mod run;
pub mod shutdown;
pub mod stats;

pub use launch::{init_node, start};
pub use liveness::is_alive;
pub use ready::wait_until_ready;
pub use shutdown::{kill_node, kill_node_with_deadline};
