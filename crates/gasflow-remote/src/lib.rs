//! # gasflow-remote
//!
//! Client for the regression trainer service. [`RemoteTrainer`] implements the
//! linear model, fallback model and training sink traits over the trainer's
//! HTTP API; every failure degrades to "unavailable" instead of an error.
//! [`attach_trainer`] plugs it into a control loop when `remote.enabled` is set.

pub mod attach;
pub mod trainer;
pub mod transport;

pub use attach::attach_trainer;
pub use trainer::RemoteTrainer;
pub use transport::{HttpClient, HttpClientConfig, LinearFit};
