//! Node model — one managed daemon instance plus its data directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

/// Which daemon implementation backs a node.
///
/// Flavors differ in the fixed flags the daemon is launched with and in
/// how the harness retrieves the peer identity after start. Selected at
/// node construction and stored in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Flavor {
    /// Daemon exposes an HTTP control API; identity comes from `GET /id`.
    HttpApi,
    /// Daemon answers an `id` subcommand run under the node environment.
    IdCommand,
}

impl Flavor {
    /// Fixed flags placed before any caller-supplied arguments:
    /// the control-API bind address and the network listen address.
    pub fn daemon_args(&self, api_port: u16) -> Vec<String> {
        match self {
            Flavor::HttpApi => vec![
                format!("--api-port={api_port}"),
                "--listen=/ip4/127.0.0.1/tcp/0".to_string(),
            ],
            Flavor::IdCommand => vec![
                format!("--api=127.0.0.1:{api_port}"),
                "--listen=/ip4/127.0.0.1/tcp/0".to_string(),
            ],
        }
    }

    /// Whether the daemon needs an `init` subcommand run before first start.
    pub fn needs_init(&self) -> bool {
        matches!(self, Flavor::HttpApi)
    }
}

impl std::str::FromStr for Flavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http-api" => Ok(Flavor::HttpApi),
            "id-command" => Ok(Flavor::IdCommand),
            other => Err(format!("unknown flavor: {other}")),
        }
    }
}

impl std::fmt::Display for Flavor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Flavor::HttpApi => write!(f, "http-api"),
            Flavor::IdCommand => write!(f, "id-command"),
        }
    }
}

/// One managed daemon instance.
///
/// `dir` doubles as the node's identity namespace: exactly one node per
/// directory, and never two concurrently-running daemons in the same one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub dir: PathBuf,
    /// Daemon binary; resolved through PATH when not absolute.
    pub binary: String,
    pub flavor: Flavor,
    pub api_port: u16,
    /// Daemon-assigned identity; `None` until readiness discovers it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer_id: Option<String>,
}

impl Node {
    pub fn new(
        dir: impl Into<PathBuf>,
        binary: impl Into<String>,
        flavor: Flavor,
        api_port: u16,
    ) -> Self {
        Self {
            dir: dir.into(),
            binary: binary.into(),
            flavor,
            api_port,
            peer_id: None,
        }
    }

    /// The discovered peer identity, empty if none yet. Consumers that
    /// need a fully-addressable cluster treat empty as an error.
    pub fn peer_identity(&self) -> &str {
        self.peer_id.as_deref().unwrap_or("")
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join("config")
    }

    pub fn api_file_path(&self) -> PathBuf {
        self.dir.join("api")
    }

    /// Dial address of the control API, from the `api` file the daemon
    /// writes once it has bound its listener.
    pub fn api_addr(&self) -> Result<String, HarnessError> {
        let path = self.api_file_path();
        let raw = fs::read_to_string(&path).map_err(|e| HarnessError::ConfigArtifact {
            path: path.clone(),
            detail: e.to_string(),
        })?;
        dial_addr(raw.trim()).ok_or_else(|| HarnessError::ConfigArtifact {
            path,
            detail: format!("unparsable listen address {:?}", raw.trim()),
        })
    }

    /// The daemon's own `config` artifact, passed through untyped — its
    /// schema belongs to the daemon, not to the harness.
    pub fn read_config(&self) -> Result<serde_json::Value, HarnessError> {
        let path = self.config_path();
        let text = fs::read_to_string(&path).map_err(|e| HarnessError::ConfigArtifact {
            path: path.clone(),
            detail: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| HarnessError::ConfigArtifact {
            path,
            detail: e.to_string(),
        })
    }

    pub fn write_config(&self, config: &serde_json::Value) -> Result<(), HarnessError> {
        let path = self.config_path();
        let text = serde_json::to_string_pretty(config).map_err(|e| {
            HarnessError::ConfigArtifact {
                path: path.clone(),
                detail: e.to_string(),
            }
        })?;
        fs::write(&path, text).map_err(|e| HarnessError::ConfigArtifact {
            path,
            detail: e.to_string(),
        })
    }
}

/// Node attributes addressable from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr {
    Id,
    Path,
    BwIn,
    BwOut,
}

impl std::str::FromStr for Attr {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(Attr::Id),
            "path" => Ok(Attr::Path),
            "bw-in" => Ok(Attr::BwIn),
            "bw-out" => Ok(Attr::BwOut),
            other => Err(format!("unrecognized attribute: {other}")),
        }
    }
}

/// Convert a TCP listen multiaddr to a plain `host:port` dial string.
///
/// Pure; returns `None` for anything it does not understand. This is the
/// whole of the harness's multiaddress knowledge — dialing itself is the
/// caller's business.
pub fn dial_addr(listen: &str) -> Option<String> {
    let mut parts = listen.trim().trim_start_matches('/').split('/');
    let (proto, host, transport, port) =
        (parts.next()?, parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || transport != "tcp" {
        return None;
    }
    port.parse::<u16>().ok()?;
    match proto {
        "ip4" => Some(format!("{host}:{port}")),
        "ip6" => Some(format!("[{host}]:{port}")),
        _ => None,
    }
}
