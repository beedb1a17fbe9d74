use crate::models::Observation;

/// Receives newly seen observations for offline model training.
///
/// Failures are reported as `false` and never stop the control loop.
pub trait ITrainingSink {
    /// Forward one observation.
    fn record(&mut self, observation: &Observation) -> bool;

    /// Close the data stream under `dataset_name`.
    fn finish(&mut self, dataset_name: &str) -> bool;
}
