use serde::{Deserialize, Serialize};

/// How the estimator arrived at its adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateSource {
    /// Current output already within tolerance of the target.
    WithinTolerance,
    /// Cached entry just above the target was close enough.
    UpperBound,
    /// Cached entry just below the target was close enough.
    LowerBound,
    /// Weighted between both bracketing entries.
    Interpolated,
    /// At most one bracketing entry; midpoint against the default bound.
    Midpoint,
}

/// Estimator result: the aperture adjustment and its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Signed change to apply to the gas aperture, rounded to 2 decimals.
    pub adjustment: f64,
    pub source: EstimateSource,
}

impl Estimate {
    pub fn no_change() -> Self {
        Self {
            adjustment: 0.0,
            source: EstimateSource::WithinTolerance,
        }
    }

    /// Zero adjustment counts as a hit for the miss streak.
    pub fn is_hit(&self) -> bool {
        self.adjustment == 0.0
    }
}
