//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::ObservabilityConfig;

static INIT: Once = Once::new();

/// Environment variable holding per-module log directives.
pub const LOG_ENV_VAR: &str = "GASFLOW_LOG";

/// Directive used when `GASFLOW_LOG` is unset or invalid.
pub const DEFAULT_DIRECTIVE: &str = "gasflow=info";

/// Initialize the gasflow tracing/logging system.
///
/// Reads `GASFLOW_LOG` for per-module log levels.
/// Format: `GASFLOW_LOG=gasflow_control=debug,gasflow_remote=warn`
///
/// Falls back to `gasflow=info` if `GASFLOW_LOG` is not set or is invalid.
/// Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
        install(filter);
    });
}

/// Initialize tracing with an explicit filter string, e.g. the configured
/// `observability.log_level`. Also a no-op after the first call.
pub fn init_tracing_with_filter(directive: &str) {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
        install(filter);
    });
}

/// Initialize tracing from the loaded config. `GASFLOW_LOG` still wins when
/// set; otherwise `observability.log_level` applies to the gasflow crates.
pub fn init_tracing_from_config(config: &ObservabilityConfig) {
    INIT.call_once(|| install(config_filter(config)));
}

fn config_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(config.filter_directive()))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

fn install(filter: EnvFilter) {
    // A host may already own the global subscriber; keep theirs.
    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init();
}
