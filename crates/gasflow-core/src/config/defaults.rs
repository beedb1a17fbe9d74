// Single source of truth for all default values.

// --- Cache ---
pub const DEFAULT_CACHE_CAPACITY: usize = 100;

// --- Estimator ---
pub const DEFAULT_OUTPUT_ACCURACY: f64 = 0.05;
pub const DEFAULT_READING_ACCURACY: f64 = 0.05;

// --- Arbiter ---
pub const DEFAULT_MISS_THRESHOLD: u32 = 8;

// --- Loop ---
pub const DEFAULT_CYCLE_DELAY_MS: u64 = 500;
pub const DEFAULT_MAX_CYCLES: u64 = 165;
pub const DEFAULT_DATASET_NAME: &str = "labelled_data";

// --- Remote trainer ---
pub const DEFAULT_REMOTE_ENABLED: bool = false;
pub const DEFAULT_REMOTE_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REMOTE_TIMEOUT_MS: u64 = 2_000;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
