use std::time::Duration;

use crate::models::SensorReading;

/// Produces one sensor reading per control cycle.
pub trait IReadingSource {
    /// Read the sensors at `elapsed` since the run started, with the actuator
    /// at `gas_aperture`. `None` ends the run.
    fn read(&mut self, elapsed: Duration, gas_aperture: f64) -> Option<SensorReading>;
}
