//! Wiring a control loop to the remote trainer according to its config.

use gasflow_control::ControlLoop;
use gasflow_core::errors::TransportError;
use gasflow_core::traits::IReadingSource;

use crate::trainer::RemoteTrainer;

/// Back the loop's linear model, fallback model and training sink with one
/// [`RemoteTrainer`] when `remote.enabled` is set. A disabled trainer leaves
/// the loop memory-only and makes no requests.
///
/// The trainer's data store is reset before it is attached. An unreachable
/// trainer is still attached; its calls degrade to "unavailable".
pub fn attach_trainer<S: IReadingSource>(
    control: ControlLoop<S>,
) -> Result<ControlLoop<S>, TransportError> {
    let remote = &control.config().remote;
    if !remote.enabled {
        tracing::info!("remote trainer disabled, running memory-only");
        return Ok(control);
    }

    let trainer = RemoteTrainer::new(remote)?;
    if !trainer.initialise() {
        tracing::warn!(base_url = %remote.base_url, "trainer did not acknowledge initialise");
    }
    Ok(control
        .with_linear(trainer.clone())
        .with_fallback(trainer.clone())
        .with_sink(trainer))
}
