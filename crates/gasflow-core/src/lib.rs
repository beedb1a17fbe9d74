//! # gasflow-core
//!
//! Foundation crate for the gasflow actuator controller.
//! Defines the shared models, collaborator traits, errors, config, tracing
//! setup and constants. Every other crate in the workspace depends on this.

pub mod aperture;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod tracing;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::GasflowConfig;
pub use errors::{ControlError, ControlResult, GasflowError, GasflowResult};
pub use models::{
    ControlState, Estimate, EstimateSource, EstimatorContext, LinearCoefficients, Observation,
    SensorReading, StrategyDecision,
};
