//! Configuration for the peerbed harness.
//!
//! Resolution order: environment variables → config file → defaults.
//!
//! Config file location:
//!   1. $PEERBED_CONFIG (explicit override)
//!   2. $XDG_CONFIG_HOME/peerbed/config.toml
//!   3. ~/.config/peerbed/config.toml

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::node::Flavor;

/// Top-level harness configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Testbed root; node directories live at `<root>/<index>`.
    pub root: PathBuf,
    pub daemon: DaemonConfig,
    pub readiness: ReadinessConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DaemonConfig {
    /// Daemon binary to launch. Resolved through PATH if not absolute.
    pub binary: String,
    pub flavor: Flavor,
    /// Control-API port of node 0; node `<i>` gets `api_port_base + i`.
    pub api_port_base: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    /// Settle delay after fork before the first identity query.
    pub settle_ms: u64,
    pub attempts: u32,
    pub retry_ms: u64,
}

// ── Defaults ──────────────────────────────────────────────────────────────────

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            root: data_dir().join("testbed"),
            daemon: DaemonConfig::default(),
            readiness: ReadinessConfig::default(),
        }
    }
}

impl Default for DaemonConfig {
    fn default() -> Self {
        Self {
            binary: "p2pd".to_string(),
            flavor: Flavor::HttpApi,
            api_port_base: 5001,
        }
    }
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            settle_ms: 100,
            attempts: 10,
            retry_ms: 100,
        }
    }
}

// ── Path helpers ──────────────────────────────────────────────────────────────

fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_or_home().join(".config"))
        .join("peerbed")
}

pub fn data_dir() -> PathBuf {
    std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_or_home().join(".local").join("share"))
        .join("peerbed")
}

fn dirs_or_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {}", .0.display(), .1)]
    ReadFailed(PathBuf, std::io::Error),
    #[error("failed to parse {}: {}", .0.display(), .1)]
    ParseFailed(PathBuf, toml::de::Error),
    #[error("failed to write {}: {}", .0.display(), .1)]
    WriteFailed(PathBuf, std::io::Error),
    #[error("failed to serialize: {0}")]
    SerializeFailed(toml::ser::Error),
}

// ── Loading ───────────────────────────────────────────────────────────────────

impl HarnessConfig {
    /// Load config: env vars → file → defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::file_path();
        let mut config = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadFailed(path.clone(), e))?;
            toml::from_str(&text).map_err(|e| ConfigError::ParseFailed(path.clone(), e))?
        } else {
            HarnessConfig::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Config file path.
    pub fn file_path() -> PathBuf {
        std::env::var("PEERBED_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| config_dir().join("config.toml"))
    }

    /// Write default config if none exists. Returns the path.
    pub fn write_default_if_missing() -> Result<PathBuf, ConfigError> {
        let path = Self::file_path();
        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
            }
            let text = toml::to_string_pretty(&HarnessConfig::default())
                .map_err(ConfigError::SerializeFailed)?;
            std::fs::write(&path, text).map_err(|e| ConfigError::WriteFailed(path.clone(), e))?;
        }
        Ok(path)
    }

    /// Apply PEERBED_* env var overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("PEERBED_ROOT") {
            self.root = PathBuf::from(v);
        }
        if let Ok(v) = std::env::var("PEERBED_DAEMON__BINARY") {
            self.daemon.binary = v;
        }
        if let Ok(v) = std::env::var("PEERBED_DAEMON__FLAVOR") {
            if let Ok(flavor) = v.parse() {
                self.daemon.flavor = flavor;
            }
        }
        if let Ok(v) = std::env::var("PEERBED_DAEMON__API_PORT_BASE") {
            if let Ok(port) = v.parse() {
                self.daemon.api_port_base = port;
            }
        }
    }
}
