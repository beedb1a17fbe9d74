use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Remote trainer connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Use the remote trainer at all.
    pub enabled: bool,
    /// Base URL of the trainer's HTTP API.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl RemoteConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::DEFAULT_REMOTE_ENABLED,
            base_url: defaults::DEFAULT_REMOTE_BASE_URL.to_string(),
            timeout_ms: defaults::DEFAULT_REMOTE_TIMEOUT_MS,
        }
    }
}
