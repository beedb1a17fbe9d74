//! Wire types and endpoint paths of the trainer API.

use serde::{Deserialize, Serialize};

use gasflow_core::models::{LinearCoefficients, Observation};

pub const INITIALISE: &str = "/initialise";
pub const CHECK_MODELS: &str = "/check_ML";
pub const TRAIN: &str = "/train";
pub const FALLBACK_PREDICT: &str = "/MR_predict";
pub const NEW_DATA: &str = "/newdata";

/// `/finishdata/<name>`
pub fn finish_data(dataset_name: &str) -> String {
    format!("/finishdata/{dataset_name}")
}

/// Body of a successful `/train` response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    #[serde(rename = "LR_m")]
    pub slope: f64,
    #[serde(rename = "LR_c")]
    pub intercept: f64,
}

impl LinearFit {
    /// The trainer reports a failed quality gate as a zero slope.
    pub fn into_coefficients(self) -> Option<LinearCoefficients> {
        (self.slope != 0.0).then(|| LinearCoefficients::new(self.slope, self.intercept))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub supply_pressure: f64,
    pub air_aperture: f64,
    pub output: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewDataRequest {
    pub supply_pressure: f64,
    pub air_aperture: f64,
    pub gas_aperture: f64,
    pub output: f64,
}

impl From<&Observation> for NewDataRequest {
    fn from(observation: &Observation) -> Self {
        Self {
            supply_pressure: observation.pressure,
            air_aperture: observation.air_aperture,
            gas_aperture: observation.position,
            output: observation.output,
        }
    }
}
