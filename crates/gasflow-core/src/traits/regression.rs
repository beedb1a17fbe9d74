use crate::models::{LinearCoefficients, Observation};

use super::ITrainingSink;

/// Fast single-feature linear model on `P·A·G`.
pub trait ILinearModel {
    /// Whether any training data exists.
    fn is_available(&mut self) -> bool;

    /// Fit the model. `None` when the fit fails its quality gate.
    fn train(&mut self) -> Option<LinearCoefficients>;
}

/// Slower multivariable model predicting the gas aperture from
/// (pressure, air aperture, output).
pub trait IFallbackModel {
    /// Whether any training data exists.
    fn is_available(&mut self) -> bool;

    /// Predict a gas aperture. `None` stands for the trainer's zero sentinel:
    /// the fit failed its quality gate or the model could not be reached.
    fn predict(&mut self, supply_pressure: f64, air_aperture: f64, output: f64) -> Option<f64>;
}

/// Stand-in when no trainer is configured: nothing is ever available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoModel;

impl ILinearModel for NoModel {
    fn is_available(&mut self) -> bool {
        false
    }

    fn train(&mut self) -> Option<LinearCoefficients> {
        None
    }
}

impl IFallbackModel for NoModel {
    fn is_available(&mut self) -> bool {
        false
    }

    fn predict(&mut self, _supply_pressure: f64, _air_aperture: f64, _output: f64) -> Option<f64> {
        None
    }
}

impl ITrainingSink for NoModel {
    fn record(&mut self, _observation: &Observation) -> bool {
        false
    }

    fn finish(&mut self, _dataset_name: &str) -> bool {
        false
    }
}
