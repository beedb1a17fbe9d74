//! Top-level error aggregating the subsystem errors.

use super::error_code::ErrorCode;
use super::{ConfigError, ControlError, TransportError};

/// Any gasflow error. Subsystem errors convert via `From`.
#[derive(Debug, thiserror::Error)]
pub enum GasflowError {
    #[error("Control error: {0}")]
    Control(#[from] ControlError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

impl ErrorCode for GasflowError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Control(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Transport(e) => e.error_code(),
        }
    }
}

/// Result alias used across the workspace.
pub type GasflowResult<T> = Result<T, GasflowError>;
