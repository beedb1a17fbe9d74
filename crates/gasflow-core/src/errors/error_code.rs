//! Stable error codes for log lines and host adapters.

/// Every error enum implements this to provide a structured code string.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "OUT_OF_RANGE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const OUT_OF_RANGE: &str = "OUT_OF_RANGE";
pub const MODEL_UNAVAILABLE: &str = "MODEL_UNAVAILABLE";
pub const EMPTY_HISTORY: &str = "EMPTY_HISTORY";
pub const MALFORMED_OBSERVATION: &str = "MALFORMED_OBSERVATION";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
