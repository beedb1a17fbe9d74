//! Error handling for gasflow.
//! One error enum per subsystem, `thiserror` only.

pub mod config_error;
pub mod control_error;
pub mod error_code;
pub mod gasflow_error;
pub mod transport_error;

pub use config_error::ConfigError;
pub use control_error::{ControlError, ControlResult};
pub use error_code::ErrorCode;
pub use gasflow_error::{GasflowError, GasflowResult};
pub use transport_error::TransportError;
