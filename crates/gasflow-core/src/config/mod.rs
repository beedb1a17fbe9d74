//! Configuration system for gasflow.
//! TOML-based, 3-layer resolution: env > project > defaults.

pub mod arbiter_config;
pub mod cache_config;
pub mod defaults;
pub mod estimator_config;
pub mod gasflow_config;
pub mod loop_config;
pub mod observability_config;
pub mod remote_config;

pub use arbiter_config::ArbiterConfig;
pub use cache_config::CacheConfig;
pub use estimator_config::EstimatorConfig;
pub use gasflow_config::GasflowConfig;
pub use loop_config::LoopConfig;
pub use observability_config::ObservabilityConfig;
pub use remote_config::RemoteConfig;
