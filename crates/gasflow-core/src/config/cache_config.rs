use serde::{Deserialize, Serialize};

use super::defaults;

/// Observation cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of cached observations.
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: defaults::DEFAULT_CACHE_CAPACITY,
        }
    }
}
