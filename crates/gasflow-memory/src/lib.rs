//! # gasflow-memory
//!
//! Memory-based actuator position prediction.
//!
//! | Component | Role |
//! |-----------|------|
//! | [`ObservationCache`] | Fixed-capacity, most-recently-used-first list of observations |
//! | [`neighbor`] | Finds an existing entry a candidate duplicates, folding 2-of-3 repeats in place |
//! | [`PositionEstimator`] | Bracketing search + interpolation of the gas aperture for a target output |
//! | [`ObservationHistory`] | Unbounded, deduplicated record of every observation in a run |
//!
//! ## Recency
//!
//! Index 0 is always the most recently used entry. Inserts land at the front,
//! lookups that use an entry move it to the front, and when the cache is full
//! the entry in the last slot is overwritten in place.

pub mod cache;
pub mod estimator;
pub mod history;
pub mod neighbor;

pub use cache::{CacheInsert, CacheStats, ObservationCache};
pub use estimator::PositionEstimator;
pub use history::ObservationHistory;
pub use neighbor::NeighborMatch;
