//! StrategyArbiter: picks and runs one strategy per control cycle.
//!
//! Priority, highest first:
//!
//! | Branch | Taken when | Effect |
//! |--------|-----------|--------|
//! | Linear | coefficients known and the target changed | position solved from the line |
//! | Fallback | fallback model available and `miss_count ≥ miss_threshold` | miss count reset, position from the model |
//! | Memory | otherwise | cache estimate; zero adjustment is a hit, anything else a miss |
//!
//! A branch whose model cannot produce a position this cycle is masked and the
//! decision is taken again, so the cycle degrades toward the memory branch.
//! Positions outside `[0, 100]` are discarded with a warning.

use serde::Serialize;

use gasflow_core::aperture::{in_range, round2};
use gasflow_core::config::GasflowConfig;
use gasflow_core::errors::{ControlError, ControlResult, ErrorCode};
use gasflow_core::models::{
    ControlState, Estimate, LinearCoefficients, ModelAvailability, SensorReading, StrategyBranch,
    StrategyDecision,
};
use gasflow_core::traits::IFallbackModel;
use gasflow_memory::{ObservationCache, PositionEstimator};

/// Choose this cycle's strategy. Pure: no I/O, no state change.
pub fn decide(
    state: &ControlState,
    availability: &ModelAvailability,
    miss_threshold: u32,
) -> StrategyDecision {
    if let Some(line) = availability.linear {
        if state.target_changed() {
            return StrategyDecision::UseRegressionFast(line);
        }
    }
    if availability.fallback && state.miss_count >= miss_threshold {
        return StrategyDecision::UseRegressionFallback;
    }
    StrategyDecision::UseMemory
}

/// What one arbiter cycle did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleOutcome {
    /// Branch that produced the final candidate (or failed, for memory).
    pub branch: StrategyBranch,
    /// Candidate position after rounding, if one was produced.
    pub proposed_position: Option<f64>,
    /// Whether the candidate was applied to the actuator.
    pub applied: bool,
    /// Gas aperture after the cycle.
    pub gas_aperture: f64,
    /// Miss streak after the cycle.
    pub miss_count: u32,
    /// Estimator result when the memory branch ran.
    pub estimate: Option<Estimate>,
    /// Recovered failures, in the order they happened.
    #[serde(skip)]
    pub errors: Vec<ControlError>,
}

impl CycleOutcome {
    /// A memory cycle that produced no candidate: position and miss streak
    /// stay as they are.
    pub fn skipped(state: &ControlState, errors: Vec<ControlError>) -> Self {
        Self {
            branch: StrategyBranch::Memory,
            proposed_position: None,
            applied: false,
            gas_aperture: state.gas_aperture,
            miss_count: state.miss_count,
            estimate: None,
            errors,
        }
    }
}

/// Runs [`decide`] and carries out the chosen branch.
#[derive(Debug, Clone)]
pub struct StrategyArbiter {
    estimator: PositionEstimator,
    miss_threshold: u32,
}

impl StrategyArbiter {
    pub fn new(estimator: PositionEstimator, miss_threshold: u32) -> Self {
        Self {
            estimator,
            miss_threshold,
        }
    }

    pub fn from_config(config: &GasflowConfig) -> Self {
        Self::new(
            PositionEstimator::from_config(&config.estimator),
            config.arbiter.miss_threshold,
        )
    }

    pub fn miss_threshold(&self) -> u32 {
        self.miss_threshold
    }

    pub fn estimator(&self) -> &PositionEstimator {
        &self.estimator
    }

    /// Run one cycle against `state`, whose `required_output` has already been
    /// updated for this cycle.
    pub fn run_cycle(
        &self,
        state: &mut ControlState,
        reading: &SensorReading,
        cache: &mut ObservationCache,
        availability: ModelAvailability,
        fallback: &mut dyn IFallbackModel,
    ) -> CycleOutcome {
        let mut availability = availability;
        let mut errors = Vec::new();

        loop {
            let decision = decide(state, &availability, self.miss_threshold);
            tracing::debug!(
                branch = ?decision.branch(),
                miss_count = state.miss_count,
                required_output = state.required_output,
                "strategy selected"
            );

            let attempt = match decision {
                StrategyDecision::UseRegressionFast(line) => {
                    linear_position(&line, state, reading)
                }
                StrategyDecision::UseRegressionFallback => {
                    state.record_hit();
                    fallback_position(fallback, state, reading)
                }
                StrategyDecision::UseMemory => {
                    return self.memory_cycle(state, reading, cache, errors);
                }
            };

            match attempt {
                Ok(position) => {
                    return apply(state, decision.branch(), position, None, errors);
                }
                Err(err) => {
                    tracing::warn!(
                        branch = ?decision.branch(),
                        error = %err.coded_string(),
                        "model unusable this cycle, degrading"
                    );
                    errors.push(err);
                    availability = availability.without(decision.branch());
                }
            }
        }
    }

    fn memory_cycle(
        &self,
        state: &mut ControlState,
        reading: &SensorReading,
        cache: &mut ObservationCache,
        mut errors: Vec<ControlError>,
    ) -> CycleOutcome {
        let context = reading.context(state.gas_aperture);
        match self
            .estimator
            .estimate(&context, state.required_output, cache)
        {
            Ok(estimate) => {
                if estimate.is_hit() {
                    state.record_hit();
                } else {
                    state.record_miss();
                }
                let candidate = state.gas_aperture + estimate.adjustment;
                apply(state, StrategyBranch::Memory, candidate, Some(estimate), errors)
            }
            Err(err) => {
                tracing::warn!(error = %err.coded_string(), "estimate skipped, position unchanged");
                errors.push(err);
                CycleOutcome::skipped(state, errors)
            }
        }
    }
}

fn linear_position(
    line: &LinearCoefficients,
    state: &ControlState,
    reading: &SensorReading,
) -> ControlResult<f64> {
    line.solve_aperture(
        state.required_output,
        reading.supply_pressure,
        reading.air_aperture,
    )
    .ok_or_else(|| ControlError::unavailable("linear", "slope × pressure × air aperture is zero"))
}

fn fallback_position(
    fallback: &mut dyn IFallbackModel,
    state: &ControlState,
    reading: &SensorReading,
) -> ControlResult<f64> {
    fallback
        .predict(
            reading.supply_pressure,
            reading.air_aperture,
            state.required_output,
        )
        .filter(|position| position.is_finite())
        .ok_or_else(|| ControlError::unavailable("fallback", "no usable prediction"))
}

/// Round, range-check and apply a candidate position.
fn apply(
    state: &mut ControlState,
    branch: StrategyBranch,
    candidate: f64,
    estimate: Option<Estimate>,
    mut errors: Vec<ControlError>,
) -> CycleOutcome {
    let position = round2(candidate);
    let applied = in_range(position);
    if applied {
        tracing::debug!(
            ?branch,
            from = state.gas_aperture,
            to = position,
            "gas aperture updated"
        );
        state.gas_aperture = position;
    } else {
        let err = ControlError::OutOfRangeAdjustment { position };
        tracing::warn!(?branch, error = %err.coded_string(), "adjustment aborted");
        errors.push(err);
    }

    CycleOutcome {
        branch,
        proposed_position: Some(position),
        applied,
        gas_aperture: state.gas_aperture,
        miss_count: state.miss_count,
        estimate,
        errors,
    }
}
