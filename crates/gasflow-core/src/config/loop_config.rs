use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Control loop timing and run length.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Delay between cycles in milliseconds.
    pub cycle_delay_ms: u64,
    /// Cycles per run. 0 runs until the reading source is exhausted.
    pub max_cycles: u64,
    /// Name the training sink stores this run's data under.
    pub dataset_name: String,
}

impl LoopConfig {
    pub fn cycle_delay(&self) -> Duration {
        Duration::from_millis(self.cycle_delay_ms)
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            cycle_delay_ms: defaults::DEFAULT_CYCLE_DELAY_MS,
            max_cycles: defaults::DEFAULT_MAX_CYCLES,
            dataset_name: defaults::DEFAULT_DATASET_NAME.to_string(),
        }
    }
}
