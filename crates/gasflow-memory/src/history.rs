//! Deduplicated record of every observation seen during a run.
//!
//! This is the training corpus handed to the regression trainer. It is
//! unbounded and kept in arrival order; duplicates are folded with the same
//! rule the cache uses.

use gasflow_core::errors::{ControlError, ControlResult};
use gasflow_core::models::Observation;

use crate::neighbor;

#[derive(Debug, Clone, Default)]
pub struct ObservationHistory {
    entries: Vec<Observation>,
}

impl ObservationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a previously accumulated corpus.
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        let mut history = Self::new();
        for observation in observations {
            history.record(observation);
        }
        history
    }

    /// Add `observation` unless it duplicates an existing entry.
    ///
    /// Returns `true` only when a new entry was appended. A 2-of-3 partial
    /// duplicate corrects the stored entry in place and returns `false`.
    pub fn record(&mut self, observation: Observation) -> bool {
        if neighbor::find(&mut self.entries, &observation).is_some() {
            return false;
        }
        self.entries.push(observation);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[Observation] {
        &self.entries
    }

    /// Most recent entry, or `EmptyHistory`.
    pub fn latest(&self) -> ControlResult<&Observation> {
        self.entries.last().ok_or(ControlError::EmptyHistory)
    }

    pub fn into_vec(self) -> Vec<Observation> {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_skips_perfect_duplicates() {
        let mut history = ObservationHistory::new();
        assert!(history.record(Observation::new(10.0, 1000.0, 50.0, 20.0)));
        assert!(!history.record(Observation::new(10.0, 1000.0, 50.0, 20.0)));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn record_corrects_partial_duplicates_in_place() {
        let mut history = ObservationHistory::new();
        history.record(Observation::new(10.0, 1000.0, 50.0, 20.0));
        history.record(Observation::new(30.0, 1000.0, 50.0, 40.0));
        assert!(!history.record(Observation::new(10.0, 1000.0, 52.0, 20.0)));
        assert_eq!(history.len(), 2);
        assert_eq!(history.as_slice()[0].air_aperture, 52.0);
    }

    #[test]
    fn keeps_arrival_order() {
        let history = ObservationHistory::from_observations(vec![
            Observation::new(1.0, 1000.0, 50.0, 20.0),
            Observation::new(2.0, 1000.0, 50.0, 21.0),
        ]);
        assert_eq!(history.latest().unwrap().position, 2.0);
        assert_eq!(history.into_vec()[0].position, 1.0);
    }

    #[test]
    fn latest_on_empty_history_is_an_error() {
        let history = ObservationHistory::new();
        assert_eq!(history.latest(), Err(ControlError::EmptyHistory));
    }
}
