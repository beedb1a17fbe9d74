//! Simulated burner plants: output as a function of supply pressure `P`, air
//! aperture `A` and gas aperture `G`.
//!
//! Every model floors its output at room temperature (20) and rounds to two
//! decimals, like the real sensor.

use serde::{Deserialize, Serialize};

use gasflow_core::aperture::round2;

/// Output never drops below room temperature.
pub const ROOM_TEMPERATURE: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlantModel {
    /// `0.000013·P·A·G + 0.232`. Exactly what the linear regression fits.
    #[default]
    Linear,
    /// `m·P·A·G + c` with `m`, `c` picked from pressure/air bands.
    PiecewiseLinear,
    /// `0.0037·√(P·G)·A + 2.3`.
    SqrtLinear,
    /// `0.005·P + 0.53·A + 0.47·G`.
    Additive,
}

impl PlantModel {
    pub fn output(&self, supply_pressure: f64, air_aperture: f64, gas_aperture: f64) -> f64 {
        let (p, a, g) = (supply_pressure, air_aperture, gas_aperture);
        let raw = match self {
            Self::Linear => 0.000013 * p * a * g + 0.232,
            Self::PiecewiseLinear => {
                let (m, c) = piecewise_band(p, a);
                m * p * a * g + c
            }
            Self::SqrtLinear => 0.0037 * (p * g).sqrt() * a + 2.3,
            Self::Additive => 0.005 * p + 0.53 * a + 0.47 * g,
        };
        round2(raw.max(ROOM_TEMPERATURE))
    }
}

fn piecewise_band(p: f64, a: f64) -> (f64, f64) {
    if p < 5000.0 {
        match a {
            a if a < 30.0 => (0.000005, 4.3),
            a if a < 75.0 => (0.0000059, 3.1),
            _ => (0.0000073, 0.0),
        }
    } else if p < 15000.0 {
        match a {
            a if a < 35.0 => (0.000004, 3.9),
            a if a < 77.0 => (0.0000045, 3.2),
            _ => (0.0000055, 0.0),
        }
    } else if p < 35000.0 {
        match a {
            a if a < 40.0 => (0.0000035, 3.5),
            a if a < 80.0 => (0.0000039, 3.0),
            _ => (0.0000044, 0.0),
        }
    } else {
        match a {
            a if a < 42.0 => (0.000003, 3.0),
            a if a < 85.0 => (0.0000033, 2.8),
            _ => (0.0000037, 0.0),
        }
    }
}
