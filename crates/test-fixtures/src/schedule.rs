//! Reading sources for driving the control loop in tests.
//!
//! [`ScheduledSource`] plays a timed schedule of targets and conditions
//! against a [`PlantModel`]; [`ScriptedSource`] replays fixed readings.

use std::collections::VecDeque;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use gasflow_core::models::SensorReading;
use gasflow_core::traits::IReadingSource;

use crate::plant::{PlantModel, ROOM_TEMPERATURE};

/// Conditions held for `duration_secs`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSegment {
    pub required_output: f64,
    pub supply_pressure: f64,
    pub air_aperture: f64,
    pub duration_secs: f64,
}

impl ScheduleSegment {
    /// The burner is on only when asked for more than room temperature.
    pub fn is_on(&self) -> bool {
        self.required_output > ROOM_TEMPERATURE
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub model: PlantModel,
    pub segments: Vec<ScheduleSegment>,
}

impl Schedule {
    /// Segment active at `elapsed`, segments laid end to end from zero.
    /// `None` past the end of the schedule.
    pub fn segment_at(&self, elapsed: Duration) -> Option<&ScheduleSegment> {
        let t = elapsed.as_secs_f64();
        let mut end = 0.0;
        self.segments.iter().find(|segment| {
            end += segment.duration_secs;
            t < end
        })
    }

    pub fn total_secs(&self) -> f64 {
        self.segments.iter().map(|s| s.duration_secs).sum()
    }
}

/// Plays a [`Schedule`] against its plant model.
#[derive(Debug, Clone)]
pub struct ScheduledSource {
    schedule: Schedule,
    reads: usize,
}

impl ScheduledSource {
    pub fn new(schedule: Schedule) -> Self {
        Self { schedule, reads: 0 }
    }

    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl IReadingSource for ScheduledSource {
    fn read(&mut self, elapsed: Duration, gas_aperture: f64) -> Option<SensorReading> {
        let segment = *self.schedule.segment_at(elapsed)?;
        self.reads += 1;
        Some(SensorReading {
            on: segment.is_on(),
            supply_pressure: segment.supply_pressure,
            air_aperture: segment.air_aperture,
            current_output: self.schedule.model.output(
                segment.supply_pressure,
                segment.air_aperture,
                gas_aperture,
            ),
            required_output: segment.required_output,
        })
    }
}

/// Replays readings in order, ignoring time and actuator position.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    readings: VecDeque<SensorReading>,
    /// Gas aperture passed to each read, in order.
    pub seen_apertures: Vec<f64>,
}

impl ScriptedSource {
    pub fn new(readings: impl IntoIterator<Item = SensorReading>) -> Self {
        Self {
            readings: readings.into_iter().collect(),
            seen_apertures: Vec::new(),
        }
    }

    /// `count` copies of the same reading.
    pub fn repeat(reading: SensorReading, count: usize) -> Self {
        Self::new(std::iter::repeat(reading).take(count))
    }

    pub fn remaining(&self) -> usize {
        self.readings.len()
    }
}

impl IReadingSource for ScriptedSource {
    fn read(&mut self, _elapsed: Duration, gas_aperture: f64) -> Option<SensorReading> {
        let reading = self.readings.pop_front()?;
        self.seen_apertures.push(gas_aperture);
        Some(reading)
    }
}

/// Shorthand for an "on" reading.
pub fn reading(
    supply_pressure: f64,
    air_aperture: f64,
    current_output: f64,
    required_output: f64,
) -> SensorReading {
    SensorReading {
        on: true,
        supply_pressure,
        air_aperture,
        current_output,
        required_output,
    }
}
