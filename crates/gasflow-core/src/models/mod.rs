//! Shared data types passed between the cache, estimator, arbiter and loop.

pub mod control_state;
pub mod decision;
pub mod estimate;
pub mod observation;
pub mod reading;

pub use control_state::ControlState;
pub use decision::{LinearCoefficients, ModelAvailability, StrategyBranch, StrategyDecision};
pub use estimate::{Estimate, EstimateSource};
pub use observation::Observation;
pub use reading::{EstimatorContext, SensorReading};
