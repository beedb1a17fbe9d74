//! # gasflow-control
//!
//! Decides, once per control cycle, which strategy moves the gas actuator and
//! runs the loop that feeds it sensor readings.
//!
//! - [`arbiter`]: the pure [`decide`] function and [`StrategyArbiter`], which
//!   carries out a decision and degrades to memory when a model fails.
//! - [`engine`]: [`ControlLoop`], owning the state, cache, history and models.

pub mod arbiter;
pub mod engine;

pub use arbiter::{decide, CycleOutcome, StrategyArbiter};
pub use engine::{ControlLoop, CycleReport, RunSummary};
