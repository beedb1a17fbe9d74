//! In-memory stand-ins for the regression trainer and training store.
//!
//! Each stub is `Clone` and shares its call log, so a test can hand one copy
//! to the control loop and inspect the other afterwards.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use gasflow_core::models::{LinearCoefficients, Observation};
use gasflow_core::traits::{IFallbackModel, ILinearModel, ITrainingSink};

/// Linear model returning fixed coefficients.
#[derive(Debug, Clone)]
pub struct StubLinearModel {
    available: bool,
    coefficients: Option<LinearCoefficients>,
    train_calls: Arc<Mutex<u32>>,
}

impl StubLinearModel {
    /// Available, trains to `slope` / `intercept`.
    pub fn trained(slope: f64, intercept: f64) -> Self {
        Self {
            available: true,
            coefficients: Some(LinearCoefficients::new(slope, intercept)),
            train_calls: Arc::default(),
        }
    }

    /// Available but the fit fails its quality gate.
    pub fn rejected() -> Self {
        Self {
            available: true,
            coefficients: None,
            train_calls: Arc::default(),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            coefficients: None,
            train_calls: Arc::default(),
        }
    }

    pub fn train_calls(&self) -> u32 {
        *self.train_calls.lock().unwrap()
    }
}

impl ILinearModel for StubLinearModel {
    fn is_available(&mut self) -> bool {
        self.available
    }

    fn train(&mut self) -> Option<LinearCoefficients> {
        *self.train_calls.lock().unwrap() += 1;
        self.coefficients
    }
}

/// Fallback model replaying queued predictions, then repeating a default.
#[derive(Debug, Clone)]
pub struct StubFallbackModel {
    available: bool,
    queued: Arc<Mutex<VecDeque<Option<f64>>>>,
    default: Option<f64>,
    queries: Arc<Mutex<Vec<(f64, f64, f64)>>>,
}

impl StubFallbackModel {
    /// Available, always predicting `position`.
    pub fn always(position: f64) -> Self {
        Self::with_default(true, Some(position))
    }

    /// Available, but every prediction is the failure sentinel.
    pub fn failing() -> Self {
        Self::with_default(true, None)
    }

    pub fn unavailable() -> Self {
        Self::with_default(false, None)
    }

    fn with_default(available: bool, default: Option<f64>) -> Self {
        Self {
            available,
            queued: Arc::default(),
            default,
            queries: Arc::default(),
        }
    }

    /// Answer the next calls with `predictions`, in order, before the default.
    pub fn then(self, predictions: impl IntoIterator<Item = Option<f64>>) -> Self {
        self.queued.lock().unwrap().extend(predictions);
        self
    }

    /// Every `(supply_pressure, air_aperture, output)` queried so far.
    pub fn queries(&self) -> Vec<(f64, f64, f64)> {
        self.queries.lock().unwrap().clone()
    }
}

impl IFallbackModel for StubFallbackModel {
    fn is_available(&mut self) -> bool {
        self.available
    }

    fn predict(&mut self, supply_pressure: f64, air_aperture: f64, output: f64) -> Option<f64> {
        self.queries
            .lock()
            .unwrap()
            .push((supply_pressure, air_aperture, output));
        self.queued
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.default)
    }
}

/// What a [`RecordingSink`] received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SinkLog {
    pub observations: Vec<Observation>,
    pub finished: Vec<String>,
}

/// Training sink that keeps everything in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    log: Arc<Mutex<SinkLog>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> SinkLog {
        self.log.lock().unwrap().clone()
    }
}

impl ITrainingSink for RecordingSink {
    fn record(&mut self, observation: &Observation) -> bool {
        self.log.lock().unwrap().observations.push(*observation);
        true
    }

    fn finish(&mut self, dataset_name: &str) -> bool {
        self.log
            .lock()
            .unwrap()
            .finished
            .push(dataset_name.to_string());
        true
    }
}
