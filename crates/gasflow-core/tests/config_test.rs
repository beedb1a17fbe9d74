//! Tests for the gasflow configuration system.

use std::sync::Mutex;

use gasflow_core::config::GasflowConfig;
use gasflow_core::errors::ConfigError;

/// Serializes tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn clear_gasflow_env_vars() {
    for key in [
        "GASFLOW_CACHE_CAPACITY",
        "GASFLOW_ESTIMATOR_OUTPUT_ACCURACY",
        "GASFLOW_ESTIMATOR_READING_ACCURACY",
        "GASFLOW_ARBITER_MISS_THRESHOLD",
        "GASFLOW_LOOP_CYCLE_DELAY_MS",
        "GASFLOW_LOOP_MAX_CYCLES",
        "GASFLOW_REMOTE_ENABLED",
        "GASFLOW_REMOTE_BASE_URL",
        "GASFLOW_REMOTE_TIMEOUT_MS",
        "GASFLOW_LOG_LEVEL",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn config_loads_from_empty_toml_with_all_defaults() {
    let config = GasflowConfig::from_toml("").unwrap();

    assert_eq!(config.cache.capacity, 100);
    assert_eq!(config.estimator.output_accuracy, 0.05);
    assert_eq!(config.estimator.reading_accuracy, 0.05);
    assert_eq!(config.arbiter.miss_threshold, 8);
    assert_eq!(config.control_loop.cycle_delay_ms, 500);
    assert_eq!(config.control_loop.max_cycles, 165);
    assert_eq!(config.control_loop.dataset_name, "labelled_data");
    assert!(!config.remote.enabled);
    assert_eq!(config.remote.base_url, "http://127.0.0.1:8000");
    assert_eq!(config.remote.timeout_ms, 2_000);
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn config_loads_partial_toml_with_overrides() {
    let toml = r#"
[cache]
capacity = 1000

[loop]
cycle_delay_ms = 0
"#;
    let config = GasflowConfig::from_toml(toml).unwrap();
    assert_eq!(config.cache.capacity, 1000);
    assert_eq!(config.control_loop.cycle_delay_ms, 0);
    // Non-overridden fields keep defaults
    assert_eq!(config.control_loop.max_cycles, 165);
    assert_eq!(config.arbiter.miss_threshold, 8);
}

#[test]
fn config_serde_roundtrip() {
    let config = GasflowConfig::default();
    let toml_str = config.to_toml().unwrap();
    assert!(toml_str.contains("[loop]"));
    let roundtripped = GasflowConfig::from_toml(&toml_str).unwrap();
    assert_eq!(roundtripped.cache.capacity, config.cache.capacity);
    assert_eq!(roundtripped.remote.base_url, config.remote.base_url);
}

#[test]
fn invalid_toml_returns_parse_error() {
    let result = GasflowConfig::from_toml("[cache\ncapacity = ");
    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

#[test]
fn validate_rejects_zero_capacity() {
    let mut config = GasflowConfig::default();
    config.cache.capacity = 0;
    let err = GasflowConfig::validate(&config).unwrap_err();
    match err {
        ConfigError::ValidationFailed { field, .. } => assert_eq!(field, "cache.capacity"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn validate_rejects_out_of_range_accuracy() {
    let mut config = GasflowConfig::default();
    config.estimator.output_accuracy = 1.5;
    assert!(GasflowConfig::validate(&config).is_err());

    let mut config = GasflowConfig::default();
    config.estimator.reading_accuracy = 0.0;
    assert!(GasflowConfig::validate(&config).is_err());
}

#[test]
fn validate_rejects_zero_miss_threshold_and_timeout() {
    let mut config = GasflowConfig::default();
    config.arbiter.miss_threshold = 0;
    assert!(GasflowConfig::validate(&config).is_err());

    let mut config = GasflowConfig::default();
    config.remote.timeout_ms = 0;
    assert!(GasflowConfig::validate(&config).is_err());
}

#[test]
fn load_without_project_file_falls_back_to_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_gasflow_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    let config = GasflowConfig::load(dir.path()).unwrap();
    assert_eq!(config.cache.capacity, 100);
    assert_eq!(config.arbiter.miss_threshold, 8);
}

#[test]
fn env_overrides_project_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_gasflow_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("gasflow.toml"),
        r#"
[cache]
capacity = 250

[arbiter]
miss_threshold = 4
"#,
    )
    .unwrap();
    std::env::set_var("GASFLOW_ARBITER_MISS_THRESHOLD", "12");

    let config = GasflowConfig::load(dir.path()).unwrap();
    // Project file wins over defaults
    assert_eq!(config.cache.capacity, 250);
    // Env wins over project file
    assert_eq!(config.arbiter.miss_threshold, 12);

    clear_gasflow_env_vars();
}

#[test]
fn unparseable_env_value_is_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_gasflow_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    std::env::set_var("GASFLOW_CACHE_CAPACITY", "lots");
    let config = GasflowConfig::load(dir.path()).unwrap();
    assert_eq!(config.cache.capacity, 100);

    clear_gasflow_env_vars();
}

#[test]
fn load_rejects_invalid_project_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_gasflow_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("gasflow.toml"), "[cache]\ncapacity = 0\n").unwrap();
    let result = GasflowConfig::load(dir.path());
    assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
}
