//! Test fixtures for the gasflow workspace: simulated burner plants, a
//! schedule-driven sensor source, scripted readings and stub models.
//!
//! JSON fixture files live under `data/` in this crate.

pub mod plant;
pub mod schedule;
pub mod stubs;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

pub use plant::PlantModel;
pub use schedule::{reading, Schedule, ScheduleSegment, ScheduledSource, ScriptedSource};
pub use stubs::{RecordingSink, SinkLog, StubFallbackModel, StubLinearModel};

/// Root directory of the fixture data.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Load a schedule from `data/schedules/<name>.json`.
pub fn load_schedule(name: &str) -> Schedule {
    load_fixture(&format!("schedules/{name}.json"))
}
