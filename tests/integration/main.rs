//! Peerbed integration test harness.
//!
//! Tests drive the lifecycle library against real child processes: small
//! shell scripts standing in for daemons, each running in a scratch node
//! directory under the system temp dir. Every test kills the processes it
//! spawns and removes its scratch directory on success; directories from
//! failed runs are left behind for inspection.

mod lifecycle;
mod readiness;

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub use peerbed_core::{Flavor, Node};

/// Daemon that exits cleanly on the first interrupt.
pub const COOPERATIVE: &str = "trap 'exit 0' INT";
/// Daemon that ignores interrupt and quit; only SIGKILL works.
pub const STUBBORN: &str = "trap '' INT QUIT";

/// Scratch testbed directory, unique per test.
pub fn scratch_root(test: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("peerbed-it-{}-{}", test, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("failed to create scratch dir");
    dir
}

/// Write an executable fake-daemon script and return its path.
///
/// The script answers the daemon contract: `daemon` runs until signalled
/// (per `trap_spec`), `id` prints the identity recorded at startup,
/// `init` is a no-op. When `writes_identity` is set, the daemon drops its
/// identity into `$DAEMON_PATH/identity` shortly after starting, so
/// readiness has something to poll.
pub fn fake_daemon(root: &Path, trap_spec: &str, writes_identity: bool) -> PathBuf {
    let identity_line = if writes_identity {
        r#"echo "peer-$$" > "$DAEMON_PATH/identity""#
    } else {
        ":"
    };
    let script = format!(
        r#"#!/bin/sh
case "$1" in
  daemon)
    {trap_spec}
    sleep 0.1
    {identity_line}
    while :; do sleep 0.05; done
    ;;
  id)
    cat "$DAEMON_PATH/identity" 2>/dev/null || exit 1
    ;;
  init)
    exit 0
    ;;
esac
"#
    );
    write_script(root, "faked", &script)
}

/// Fake daemon for the HTTP flavor: `daemon` serves `GET /id` as JSON on
/// the port passed via `--api-port=`. Needs python3; tests skip without it.
pub fn fake_http_daemon(root: &Path) -> PathBuf {
    let script = r#"#!/bin/sh
case "$1" in
  daemon)
    port=0
    for a in "$@"; do
      case "$a" in
        --api-port=*) port="${a#*=}" ;;
      esac
    done
    exec python3 - "$port" <<'EOF'
import json
import sys
from http.server import BaseHTTPRequestHandler, HTTPServer

class Handler(BaseHTTPRequestHandler):
    def do_GET(self):
        body = json.dumps({"peer_id": "peer-http-" + sys.argv[1]}).encode()
        self.send_response(200)
        self.send_header("Content-Type", "application/json")
        self.send_header("Content-Length", str(len(body)))
        self.end_headers()
        self.wfile.write(body)

    def log_message(self, *args):
        pass

HTTPServer(("127.0.0.1", int(sys.argv[1])), Handler).serve_forever()
EOF
    ;;
esac
"#;
    write_script(root, "fakehttpd", script)
}

fn write_script(root: &Path, name: &str, script: &str) -> PathBuf {
    let path = root.join(name);
    fs::write(&path, script).expect("failed to write fake daemon script");
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

/// Allocate a node directory under `root` and build its `Node`.
pub fn make_node(root: &Path, index: usize, binary: &Path, flavor: Flavor, api_port: u16) -> Node {
    let dir = root.join(index.to_string());
    fs::create_dir_all(&dir).expect("failed to create node dir");
    Node::new(dir, binary.to_string_lossy().into_owned(), flavor, api_port)
}

/// Poll every 10 ms until `cond` holds or `timeout` expires.
pub fn wait_for<F: Fn() -> bool>(timeout: Duration, cond: F) -> bool {
    let start = Instant::now();
    while start.elapsed() < timeout {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    false
}

/// Whether python3 is usable on this machine.
pub fn python3_available() -> bool {
    std::process::Command::new("python3")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}
