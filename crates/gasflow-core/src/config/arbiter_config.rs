use serde::{Deserialize, Serialize};

use super::defaults;

/// Strategy arbiter configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbiterConfig {
    /// Consecutive memory misses before the fallback model is consulted.
    pub miss_threshold: u32,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        Self {
            miss_threshold: defaults::DEFAULT_MISS_THRESHOLD,
        }
    }
}
