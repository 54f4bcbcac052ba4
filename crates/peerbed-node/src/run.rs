//! Run daemon CLI subcommands under a node's environment.

use std::process::Command;

use peerbed_core::env::daemon_env;
use peerbed_core::{HarnessError, Node};

/// Run `args` (argv, program first) with the node's derived environment,
/// capturing stdout. A spawn failure or non-zero exit surfaces the
/// captured stderr.
pub fn run_cmd(node: &Node, args: &[String]) -> Result<String, HarnessError> {
    let (program, rest) = args.split_first().ok_or_else(|| HarnessError::CommandFailed {
        command: String::new(),
        detail: "empty command".to_string(),
    })?;
    let rendered = args.join(" ");

    let output = Command::new(program)
        .args(rest)
        .env_clear()
        .envs(daemon_env(&node.dir))
        .output()
        .map_err(|e| HarnessError::CommandFailed {
            command: rendered.clone(),
            detail: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(HarnessError::CommandFailed {
            command: rendered,
            detail: format!(
                "{}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
