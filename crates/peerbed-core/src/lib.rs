//! peerbed-core — shared node model, configuration, and error types.
//! All other peerbed crates depend on this one.

pub mod config;
pub mod env;
pub mod error;
pub mod node;

pub use error::HarnessError;
pub use node::{dial_addr, Attr, Flavor, Node};
