use serde::{Deserialize, Serialize};

use crate::errors::{ControlError, ControlResult};

use super::Observation;

/// One sensor sample, produced once per cycle by the reading source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// `false` means the burner is off; the cycle advances without prediction.
    pub on: bool,
    pub supply_pressure: f64,
    pub air_aperture: f64,
    pub current_output: f64,
    pub required_output: f64,
}

impl SensorReading {
    /// The observation this reading makes at the given gas aperture.
    pub fn observe(&self, gas_aperture: f64) -> Observation {
        Observation::new(
            gas_aperture,
            self.supply_pressure,
            self.air_aperture,
            self.current_output,
        )
    }

    /// Reject a reading that cannot be stored or estimated from: pressure,
    /// air aperture and target must be finite and positive, the output finite.
    pub fn validate(&self) -> ControlResult<()> {
        let positive = [
            ("supply_pressure", self.supply_pressure),
            ("air_aperture", self.air_aperture),
            ("required_output", self.required_output),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ControlError::malformed(field, value));
            }
        }
        if !self.current_output.is_finite() {
            return Err(ControlError::malformed(
                "current_output",
                self.current_output,
            ));
        }
        Ok(())
    }

    /// The estimator's view of this reading.
    pub fn context(&self, gas_aperture: f64) -> EstimatorContext {
        EstimatorContext {
            gas_aperture,
            supply_pressure: self.supply_pressure,
            air_aperture: self.air_aperture,
            current_output: self.current_output,
        }
    }
}

/// Current actuator position plus sensed conditions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatorContext {
    pub gas_aperture: f64,
    pub supply_pressure: f64,
    pub air_aperture: f64,
    pub current_output: f64,
}
