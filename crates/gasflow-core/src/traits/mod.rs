//! Boundaries to the external collaborators: sensors, model trainers and the
//! training-data store.

pub mod reading_source;
pub mod regression;
pub mod training_sink;

pub use reading_source::IReadingSource;
pub use regression::{IFallbackModel, ILinearModel, NoModel};
pub use training_sink::ITrainingSink;
