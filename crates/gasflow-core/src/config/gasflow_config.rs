//! Top-level gasflow configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    ArbiterConfig, CacheConfig, EstimatorConfig, LoopConfig, ObservabilityConfig, RemoteConfig,
};
use crate::errors::ConfigError;

/// Name of the project config file looked up by [`GasflowConfig::load`].
pub const PROJECT_CONFIG_FILE: &str = "gasflow.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`GASFLOW_*`)
/// 2. Project config (`gasflow.toml` in the given root)
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GasflowConfig {
    pub cache: CacheConfig,
    pub estimator: EstimatorConfig,
    pub arbiter: ArbiterConfig,
    #[serde(rename = "loop")]
    pub control_loop: LoopConfig,
    pub remote: RemoteConfig,
    pub observability: ObservabilityConfig,
}

impl GasflowConfig {
    /// Load configuration with layered resolution and validate the result.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        let mut config = if project_config_path.exists() {
            Self::from_file(&project_config_path)?
        } else {
            Self::default()
        };

        Self::apply_env_overrides(&mut config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file. Missing sections keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &GasflowConfig) -> Result<(), ConfigError> {
        if config.cache.capacity == 0 {
            return Err(invalid("cache.capacity", "must be greater than 0"));
        }
        if !is_relative_tolerance(config.estimator.output_accuracy) {
            return Err(invalid(
                "estimator.output_accuracy",
                "must be between 0.0 and 1.0 (exclusive)",
            ));
        }
        if !is_relative_tolerance(config.estimator.reading_accuracy) {
            return Err(invalid(
                "estimator.reading_accuracy",
                "must be between 0.0 and 1.0 (exclusive)",
            ));
        }
        if config.arbiter.miss_threshold == 0 {
            return Err(invalid("arbiter.miss_threshold", "must be at least 1"));
        }
        if config.remote.timeout_ms == 0 {
            return Err(invalid("remote.timeout_ms", "must be greater than 0"));
        }
        if config.remote.enabled && config.remote.base_url.trim().is_empty() {
            return Err(invalid(
                "remote.base_url",
                "must be set when the remote trainer is enabled",
            ));
        }
        Ok(())
    }

    /// Apply environment variable overrides.
    /// Pattern: `GASFLOW_CACHE_CAPACITY`, `GASFLOW_ARBITER_MISS_THRESHOLD`, etc.
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut GasflowConfig) {
        if let Some(v) = env_parse::<usize>("GASFLOW_CACHE_CAPACITY") {
            config.cache.capacity = v;
        }
        if let Some(v) = env_parse::<f64>("GASFLOW_ESTIMATOR_OUTPUT_ACCURACY") {
            config.estimator.output_accuracy = v;
        }
        if let Some(v) = env_parse::<f64>("GASFLOW_ESTIMATOR_READING_ACCURACY") {
            config.estimator.reading_accuracy = v;
        }
        if let Some(v) = env_parse::<u32>("GASFLOW_ARBITER_MISS_THRESHOLD") {
            config.arbiter.miss_threshold = v;
        }
        if let Some(v) = env_parse::<u64>("GASFLOW_LOOP_CYCLE_DELAY_MS") {
            config.control_loop.cycle_delay_ms = v;
        }
        if let Some(v) = env_parse::<u64>("GASFLOW_LOOP_MAX_CYCLES") {
            config.control_loop.max_cycles = v;
        }
        if let Some(v) = env_parse::<bool>("GASFLOW_REMOTE_ENABLED") {
            config.remote.enabled = v;
        }
        if let Ok(v) = std::env::var("GASFLOW_REMOTE_BASE_URL") {
            config.remote.base_url = v;
        }
        if let Some(v) = env_parse::<u64>("GASFLOW_REMOTE_TIMEOUT_MS") {
            config.remote.timeout_ms = v;
        }
        if let Ok(v) = std::env::var("GASFLOW_LOG_LEVEL") {
            config.observability.log_level = v;
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparseable config override");
            None
        }
    }
}

fn is_relative_tolerance(value: f64) -> bool {
    value > 0.0 && value < 1.0
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
