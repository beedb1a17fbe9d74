use serde::{Deserialize, Serialize};

use crate::constants::LINEAR_FEATURE_SCALE;

/// Fitted `output = slope · (P·A·G / 100 000) + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearCoefficients {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearCoefficients {
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Solve the line for the gas aperture giving `required_output`.
    ///
    /// `None` when the divisor `slope · P · A` is zero or the result is not finite.
    pub fn solve_aperture(
        &self,
        required_output: f64,
        supply_pressure: f64,
        air_aperture: f64,
    ) -> Option<f64> {
        let divisor = self.slope * supply_pressure * air_aperture;
        if divisor == 0.0 || !divisor.is_finite() {
            return None;
        }
        let aperture = (required_output - self.intercept) * LINEAR_FEATURE_SCALE / divisor;
        aperture.is_finite().then_some(aperture)
    }

    /// Predicted output at a given setting.
    pub fn predict_output(&self, gas_aperture: f64, supply_pressure: f64, air_aperture: f64) -> f64 {
        self.slope * (supply_pressure * air_aperture * gas_aperture / LINEAR_FEATURE_SCALE)
            + self.intercept
    }
}

/// Strategy chosen for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StrategyDecision {
    /// Target changed and a linear model is known: solve the line directly.
    UseRegressionFast(LinearCoefficients),
    /// Miss streak reached the threshold: ask the multivariable model.
    UseRegressionFallback,
    /// Consult the observation cache.
    UseMemory,
}

impl StrategyDecision {
    pub fn branch(&self) -> StrategyBranch {
        match self {
            Self::UseRegressionFast(_) => StrategyBranch::Linear,
            Self::UseRegressionFallback => StrategyBranch::Fallback,
            Self::UseMemory => StrategyBranch::Memory,
        }
    }
}

/// Payload-free tag of a [`StrategyDecision`], for reports and counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyBranch {
    Linear,
    Fallback,
    Memory,
}

/// Which regression models can be used this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelAvailability {
    pub linear: Option<LinearCoefficients>,
    pub fallback: bool,
}

impl ModelAvailability {
    pub fn none() -> Self {
        Self::default()
    }

    /// Copy with the given branch masked out.
    pub fn without(mut self, branch: StrategyBranch) -> Self {
        match branch {
            StrategyBranch::Linear => self.linear = None,
            StrategyBranch::Fallback => self.fallback = false,
            StrategyBranch::Memory => {}
        }
        self
    }
}
