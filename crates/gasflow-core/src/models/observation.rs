use serde::{Deserialize, Serialize};

/// One historical sample: actuator setting, sensed conditions, resulting output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Gas aperture position (0–100) the actuator was at.
    pub position: f64,
    /// Fuel gas supply pressure.
    pub pressure: f64,
    /// Air aperture position (0–100).
    pub air_aperture: f64,
    /// Measured output at that setting.
    pub output: f64,
}

impl Observation {
    pub fn new(position: f64, pressure: f64, air_aperture: f64, output: f64) -> Self {
        Self {
            position,
            pressure,
            air_aperture,
            output,
        }
    }

    /// All four fields bit-equal.
    pub fn is_identical(&self, other: &Observation) -> bool {
        self.position.to_bits() == other.position.to_bits()
            && self.pressure.to_bits() == other.pressure.to_bits()
            && self.air_aperture.to_bits() == other.air_aperture.to_bits()
            && self.output.to_bits() == other.output.to_bits()
    }

    /// Overwrite position and context, keeping the output.
    pub fn correct_from(&mut self, other: &Observation) {
        self.position = other.position;
        self.pressure = other.pressure;
        self.air_aperture = other.air_aperture;
    }
}
