//! Control-cycle errors. All of them are recovered inside the cycle.

use super::error_code::{self, ErrorCode};

/// Failures raised by the estimator and arbiter.
///
/// None of these is fatal: the arbiter logs them and either degrades to the
/// next strategy or leaves the actuator where it is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ControlError {
    #[error("position {position} is outside the aperture range [0, 100]")]
    OutOfRangeAdjustment { position: f64 },

    #[error("{model} model unavailable: {reason}")]
    ModelUnavailable { model: String, reason: String },

    #[error("observation history is empty")]
    EmptyHistory,

    #[error("malformed observation: {field} = {value}")]
    MalformedObservation { field: String, value: f64 },
}

impl ControlError {
    /// Shorthand for a `ModelUnavailable` error.
    pub fn unavailable(model: &str, reason: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            model: model.to_string(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a `MalformedObservation` error.
    pub fn malformed(field: &str, value: f64) -> Self {
        Self::MalformedObservation {
            field: field.to_string(),
            value,
        }
    }
}

impl ErrorCode for ControlError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfRangeAdjustment { .. } => error_code::OUT_OF_RANGE,
            Self::ModelUnavailable { .. } => error_code::MODEL_UNAVAILABLE,
            Self::EmptyHistory => error_code::EMPTY_HISTORY,
            Self::MalformedObservation { .. } => error_code::MALFORMED_OBSERVATION,
        }
    }
}

/// Result alias for a single control cycle.
pub type ControlResult<T> = Result<T, ControlError>;
