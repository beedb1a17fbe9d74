use serde::{Deserialize, Serialize};

use crate::constants::INITIAL_GAS_APERTURE;

/// Mutable per-run controller state, owned by the control loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlState {
    /// Current gas aperture (0–100).
    pub gas_aperture: f64,
    /// Target output for this cycle.
    pub required_output: f64,
    /// Target output of the previous active cycle.
    pub previous_required_output: f64,
    /// Consecutive memory-branch misses.
    pub miss_count: u32,
}

impl ControlState {
    /// Whether the target moved since the previous cycle.
    pub fn target_changed(&self) -> bool {
        self.required_output != self.previous_required_output
    }

    /// Shift the current target into `previous_required_output` and take a new one.
    pub fn advance_target(&mut self, required_output: f64) {
        self.previous_required_output = self.required_output;
        self.required_output = required_output;
    }

    pub fn record_hit(&mut self) {
        self.miss_count = 0;
    }

    pub fn record_miss(&mut self) {
        self.miss_count = self.miss_count.saturating_add(1);
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            gas_aperture: INITIAL_GAS_APERTURE,
            required_output: 0.0,
            previous_required_output: 0.0,
            miss_count: 0,
        }
    }
}
