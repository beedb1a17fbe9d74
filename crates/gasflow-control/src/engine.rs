//! ControlLoop: owns the controller state and drives one arbiter cycle per
//! sensor reading.
//!
//! Per active cycle: read sensors, advance the target, fold the observation
//! into the cache and the training history, then let the arbiter move the
//! actuator. Cycles with the burner off only advance the clock. A malformed
//! reading is reported and dropped before it reaches the cache, the history
//! or the training sink.

use std::time::Duration;

use serde::Serialize;

use gasflow_core::config::GasflowConfig;
use gasflow_core::errors::ErrorCode;
use gasflow_core::models::{
    ControlState, ModelAvailability, Observation, SensorReading, StrategyBranch,
};
use gasflow_core::traits::{IFallbackModel, ILinearModel, IReadingSource, ITrainingSink, NoModel};
use gasflow_memory::{CacheInsert, ObservationCache, ObservationHistory};

use crate::arbiter::{CycleOutcome, StrategyArbiter};

/// Everything one call to [`ControlLoop::step`] observed and did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleReport {
    /// Zero-based cycle index, counting idle cycles.
    pub cycle: u64,
    /// Simulated time of the reading.
    pub elapsed: Duration,
    /// The reading, or `None` on an idle cycle.
    pub reading: Option<SensorReading>,
    /// The observation folded into the cache this cycle, `None` when the
    /// reading was idle or rejected.
    pub observation: Option<Observation>,
    /// Whether the observation was new to the training history.
    pub recorded: bool,
    /// Arbiter result, `None` on an idle cycle.
    pub outcome: Option<CycleOutcome>,
    #[serde(skip)]
    pub cache_insert: Option<CacheInsert>,
}

impl CycleReport {
    pub fn is_idle(&self) -> bool {
        self.outcome.is_none()
    }
}

/// Totals for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub cycles: u64,
    pub active_cycles: u64,
    pub linear_cycles: u64,
    pub fallback_cycles: u64,
    pub memory_cycles: u64,
    /// Candidates rejected as out of range.
    pub discarded: u64,
    /// Cycles that recovered from at least one error.
    pub degraded: u64,
    pub final_gas_aperture: f64,
    pub cache_len: usize,
    pub history_len: usize,
    /// Whether the training sink accepted the end-of-run marker.
    pub dataset_finished: bool,
}

impl RunSummary {
    fn absorb(&mut self, report: &CycleReport) {
        self.cycles += 1;
        let Some(outcome) = &report.outcome else {
            return;
        };
        self.active_cycles += 1;
        match outcome.branch {
            StrategyBranch::Linear => self.linear_cycles += 1,
            StrategyBranch::Fallback => self.fallback_cycles += 1,
            StrategyBranch::Memory => self.memory_cycles += 1,
        }
        if outcome.proposed_position.is_some() && !outcome.applied {
            self.discarded += 1;
        }
        if !outcome.errors.is_empty() {
            self.degraded += 1;
        }
    }
}

/// The controller: state, memory, models and the reading source.
pub struct ControlLoop<S: IReadingSource> {
    config: GasflowConfig,
    source: S,
    linear: Box<dyn ILinearModel>,
    fallback: Box<dyn IFallbackModel>,
    sink: Box<dyn ITrainingSink>,
    arbiter: StrategyArbiter,
    state: ControlState,
    cache: ObservationCache,
    history: ObservationHistory,
    availability: ModelAvailability,
    cycle: u64,
    started: bool,
}

impl<S: IReadingSource> ControlLoop<S> {
    /// Memory-only controller. Attach models with the `with_*` builders.
    pub fn new(config: GasflowConfig, source: S) -> Self {
        Self {
            arbiter: StrategyArbiter::from_config(&config),
            cache: ObservationCache::new(config.cache.capacity),
            config,
            source,
            linear: Box::new(NoModel),
            fallback: Box::new(NoModel),
            sink: Box::new(NoModel),
            state: ControlState::default(),
            history: ObservationHistory::new(),
            availability: ModelAvailability::none(),
            cycle: 0,
            started: false,
        }
    }

    pub fn with_linear(mut self, model: impl ILinearModel + 'static) -> Self {
        self.linear = Box::new(model);
        self
    }

    pub fn with_fallback(mut self, model: impl IFallbackModel + 'static) -> Self {
        self.fallback = Box::new(model);
        self
    }

    pub fn with_sink(mut self, sink: impl ITrainingSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Seed the cache from previously collected observations.
    pub fn with_history(mut self, observations: Vec<Observation>) -> Self {
        self.cache.warm(observations.iter().copied());
        self.history = ObservationHistory::from_observations(observations);
        self
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn cache(&self) -> &ObservationCache {
        &self.cache
    }

    pub fn history(&self) -> &ObservationHistory {
        &self.history
    }

    pub fn availability(&self) -> ModelAvailability {
        self.availability
    }

    pub fn config(&self) -> &GasflowConfig {
        &self.config
    }

    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Train the linear model and sample fallback availability. Runs once;
    /// later calls are no-ops.
    pub fn start(&mut self) -> ModelAvailability {
        if self.started {
            return self.availability;
        }
        self.started = true;

        if self.linear.is_available() {
            self.availability.linear = self.linear.train();
            if self.availability.linear.is_none() {
                tracing::warn!("linear model failed its quality gate, not used this run");
            }
        }
        self.availability.fallback = self.fallback.is_available();

        tracing::info!(
            linear = ?self.availability.linear,
            fallback = self.availability.fallback,
            cache_capacity = self.cache.capacity(),
            warm_entries = self.cache.len(),
            "control loop started"
        );
        self.availability
    }

    /// Run a single cycle. `None` once `max_cycles` is reached or the source
    /// is exhausted.
    pub fn step(&mut self) -> Option<CycleReport> {
        if !self.started {
            self.start();
        }
        let max_cycles = self.config.control_loop.max_cycles;
        if max_cycles > 0 && self.cycle >= max_cycles {
            return None;
        }

        let cycle = self.cycle;
        let elapsed = self.elapsed_at(cycle);
        let reading = self.source.read(elapsed, self.state.gas_aperture)?;
        self.cycle += 1;

        if !reading.on {
            tracing::trace!(cycle, "burner off, cycle idle");
            return Some(CycleReport {
                cycle,
                elapsed,
                reading: Some(reading),
                observation: None,
                recorded: false,
                outcome: None,
                cache_insert: None,
            });
        }

        if let Err(err) = reading.validate() {
            tracing::warn!(cycle, error = %err.coded_string(), "reading rejected, not stored");
            return Some(CycleReport {
                cycle,
                elapsed,
                reading: Some(reading),
                observation: None,
                recorded: false,
                outcome: Some(CycleOutcome::skipped(&self.state, vec![err])),
                cache_insert: None,
            });
        }

        self.state.advance_target(reading.required_output);

        let observation = reading.observe(self.state.gas_aperture);
        let cache_insert = self.cache.insert_or_touch(observation);
        let recorded = self.history.record(observation);
        if recorded && !self.sink.record(&observation) {
            tracing::debug!(cycle, "training sink rejected observation");
        }

        let outcome = self.arbiter.run_cycle(
            &mut self.state,
            &reading,
            &mut self.cache,
            self.availability,
            self.fallback.as_mut(),
        );

        tracing::debug!(
            cycle,
            branch = ?outcome.branch,
            gas_aperture = outcome.gas_aperture,
            miss_count = outcome.miss_count,
            current_output = reading.current_output,
            required_output = reading.required_output,
            "cycle complete"
        );

        Some(CycleReport {
            cycle,
            elapsed,
            reading: Some(reading),
            observation: Some(observation),
            recorded,
            outcome: Some(outcome),
            cache_insert: Some(cache_insert),
        })
    }

    /// Run until the source or `max_cycles` ends the run, sleeping the
    /// configured delay between cycles, then close the training dataset.
    pub fn run(&mut self) -> RunSummary {
        self.start();
        let delay = self.config.control_loop.cycle_delay();
        let mut summary = RunSummary::default();

        while let Some(report) = self.step() {
            summary.absorb(&report);
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
        }

        summary.dataset_finished = self.sink.finish(&self.config.control_loop.dataset_name);
        summary.final_gas_aperture = self.state.gas_aperture;
        summary.cache_len = self.cache.len();
        summary.history_len = self.history.len();

        tracing::info!(
            cycles = summary.cycles,
            active = summary.active_cycles,
            linear = summary.linear_cycles,
            fallback = summary.fallback_cycles,
            memory = summary.memory_cycles,
            discarded = summary.discarded,
            final_gas_aperture = summary.final_gas_aperture,
            "control loop finished"
        );
        summary
    }

    /// Forget cached observations and the miss streak. The actuator position
    /// and the training history are kept.
    pub fn reset_memory(&mut self) {
        self.cache.clear();
        self.state.miss_count = 0;
        tracing::info!("observation cache reset");
    }

    fn elapsed_at(&self, cycle: u64) -> Duration {
        let delay_ms = self.config.control_loop.cycle_delay_ms;
        Duration::from_millis(delay_ms.saturating_mul(cycle))
    }
}
