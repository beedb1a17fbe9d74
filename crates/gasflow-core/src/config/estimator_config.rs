use serde::{Deserialize, Serialize};

use super::defaults;

/// Position estimator tolerances, both relative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Relative output error counted as "on target".
    pub output_accuracy: f64,
    /// Relative pressure / air-aperture error for a cached entry to match the context.
    pub reading_accuracy: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            output_accuracy: defaults::DEFAULT_OUTPUT_ACCURACY,
            reading_accuracy: defaults::DEFAULT_READING_ACCURACY,
        }
    }
}
