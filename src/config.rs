use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

const DEFAULT_CHUNK_SIZE: usize = 1024;
const DEFAULT_POLL_TIMEOUT_MS: u64 = 100;

/// Client configuration.
///
/// Loaded from a YAML file when the `COURIER_CONFIG` env var points at one,
/// otherwise built from defaults. Every field has a default so a config file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// URLs to fetch at session start.
    #[serde(default)]
    pub targets: Vec<String>,

    /// Bytes read from a ready socket per read call.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// How long a blocking poll waits before giving the loop back control.
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_poll_timeout_ms() -> u64 {
    DEFAULT_POLL_TIMEOUT_MS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Loads configuration from the file named by `COURIER_CONFIG`, falling
    /// back to defaults when the variable is unset.
    pub fn load() -> anyhow::Result<Self> {
        match std::env::var("COURIER_CONFIG") {
            Ok(path) => Self::from_file(&path),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Reads and parses a YAML config file.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("invalid config file {}", path))
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }
}
