//! Remote trainer transport errors.

use super::error_code::{self, ErrorCode};
use super::ControlError;

/// Failures talking to the remote trainer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("unable to reach trainer at {url}: {reason}")]
    Connect { url: String, reason: String },

    #[error("trainer returned HTTP {status} for {url}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("could not decode trainer response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl ErrorCode for TransportError {
    fn error_code(&self) -> &'static str {
        error_code::TRANSPORT_ERROR
    }
}

impl TransportError {
    /// A transport failure means the remote model cannot be used this cycle.
    pub fn into_unavailable(self, model: &str) -> ControlError {
        ControlError::unavailable(model, self.to_string())
    }
}
