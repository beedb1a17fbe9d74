//! PositionEstimator: bracketing search over the cache.
//!
//! For a target output the estimator looks at cached entries recorded under
//! the same conditions (pressure and air aperture within `reading_accuracy`)
//! and picks the nearest entry above and below the target:
//!
//! 1. Current output already within `output_accuracy` → no adjustment.
//! 2. Upper bound within tolerance and closer than the lower → its position.
//! 3. Lower bound within tolerance → its position.
//! 4. Otherwise interpolate between the two bounds, weighting each by the
//!    other's error, or take the midpoint against the default 100 / 0 bound
//!    when one side is missing.
//!
//! Every bound that is used is moved to the front of the cache.

use gasflow_core::aperture::round2;
use gasflow_core::config::EstimatorConfig;
use gasflow_core::constants::{DEFAULT_LOWER_POSITION, DEFAULT_UPPER_POSITION};
use gasflow_core::errors::{ControlError, ControlResult};
use gasflow_core::models::{Estimate, EstimateSource, EstimatorContext, Observation};

use crate::cache::ObservationCache;

/// Memory-based gas aperture estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionEstimator {
    output_accuracy: f64,
    reading_accuracy: f64,
}

/// Cache index and copy of a bracketing entry.
#[derive(Debug, Clone, Copy)]
struct Bound {
    index: usize,
    observation: Observation,
    error: f64,
}

impl PositionEstimator {
    pub fn new(output_accuracy: f64, reading_accuracy: f64) -> Self {
        Self {
            output_accuracy,
            reading_accuracy,
        }
    }

    pub fn from_config(config: &EstimatorConfig) -> Self {
        Self::new(config.output_accuracy, config.reading_accuracy)
    }

    pub fn output_accuracy(&self) -> f64 {
        self.output_accuracy
    }

    pub fn reading_accuracy(&self) -> f64 {
        self.reading_accuracy
    }

    /// Estimate the gas aperture adjustment that reaches `target_output`.
    ///
    /// The cache is reordered for every bound the estimate relies on. Fails
    /// only with [`ControlError::MalformedObservation`] when a value the
    /// relative-error checks divide by is zero, negative or not finite.
    pub fn estimate(
        &self,
        context: &EstimatorContext,
        target_output: f64,
        cache: &mut ObservationCache,
    ) -> ControlResult<Estimate> {
        validate(context, target_output)?;

        if relative_error(context.current_output, target_output) < self.output_accuracy {
            return Ok(Estimate::no_change());
        }

        let (upper, lower) = self.bracket(context, target_output, cache.as_slice());
        let within = |bound: &Bound| bound.error / target_output < self.output_accuracy;

        if let Some(u) = upper {
            let closer_than_lower = lower.map_or(true, |l| u.error < l.error);
            if within(&u) && closer_than_lower {
                cache.move_to_front(u.index);
                return Ok(adjust(context, u.observation.position, EstimateSource::UpperBound));
            }
        }

        if let Some(l) = lower {
            if within(&l) {
                cache.move_to_front(l.index);
                return Ok(adjust(context, l.observation.position, EstimateSource::LowerBound));
            }
        }

        let mut max_position = DEFAULT_UPPER_POSITION;
        let mut min_position = DEFAULT_LOWER_POSITION;

        if let Some(u) = upper {
            max_position = u.observation.position;
            cache.move_to_front(u.index);
        }
        if let Some(l) = lower {
            min_position = l.observation.position;
            // The upper bound's rotation shifted everything in front of it.
            let index = match upper {
                Some(u) if l.index < u.index => l.index + 1,
                _ => l.index,
            };
            cache.move_to_front(index);
        }

        let estimate = match (upper, lower) {
            (Some(u), Some(l)) => {
                let position =
                    (l.error * max_position + u.error * min_position) / (u.error + l.error);
                adjust(context, position, EstimateSource::Interpolated)
            }
            _ => adjust(
                context,
                (max_position + min_position) / 2.0,
                EstimateSource::Midpoint,
            ),
        };
        tracing::trace!(
            source = ?estimate.source,
            adjustment = estimate.adjustment,
            upper = upper.is_some(),
            lower = lower.is_some(),
            "no cached entry within tolerance"
        );
        Ok(estimate)
    }

    /// Nearest entries strictly above and strictly below the target among
    /// those matching the context. Ties keep the earliest (most recent).
    fn bracket(
        &self,
        context: &EstimatorContext,
        target_output: f64,
        entries: &[Observation],
    ) -> (Option<Bound>, Option<Bound>) {
        let mut upper: Option<Bound> = None;
        let mut lower: Option<Bound> = None;

        for (index, observation) in entries.iter().enumerate() {
            if !self.matches_context(context, observation) {
                continue;
            }
            let output = observation.output;
            let bound = Bound {
                index,
                observation: *observation,
                error: (output - target_output).abs(),
            };
            if output > target_output {
                if upper.map_or(true, |u| output < u.observation.output) {
                    upper = Some(bound);
                }
            } else if output < target_output
                && lower.map_or(true, |l| output > l.observation.output)
            {
                lower = Some(bound);
            }
        }

        (upper, lower)
    }

    fn matches_context(&self, context: &EstimatorContext, observation: &Observation) -> bool {
        relative_error(observation.pressure, context.supply_pressure) < self.reading_accuracy
            && relative_error(observation.air_aperture, context.air_aperture)
                < self.reading_accuracy
    }
}

impl Default for PositionEstimator {
    fn default() -> Self {
        Self::from_config(&EstimatorConfig::default())
    }
}

/// `|value − reference| / reference`; callers guarantee `reference > 0`.
fn relative_error(value: f64, reference: f64) -> f64 {
    (value - reference).abs() / reference
}

fn adjust(context: &EstimatorContext, position: f64, source: EstimateSource) -> Estimate {
    Estimate {
        adjustment: round2(position - context.gas_aperture),
        source,
    }
}

fn validate(context: &EstimatorContext, target_output: f64) -> ControlResult<()> {
    let positive = [
        ("required_output", target_output),
        ("supply_pressure", context.supply_pressure),
        ("air_aperture", context.air_aperture),
    ];
    for (field, value) in positive {
        if !value.is_finite() || value <= 0.0 {
            return Err(ControlError::malformed(field, value));
        }
    }
    if !context.current_output.is_finite() {
        return Err(ControlError::malformed(
            "current_output",
            context.current_output,
        ));
    }
    if !context.gas_aperture.is_finite() || context.gas_aperture < 0.0 {
        return Err(ControlError::malformed("gas_aperture", context.gas_aperture));
    }
    Ok(())
}
