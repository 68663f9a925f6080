//! # Structured Logging
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` takes precedence over
//! the configured level, so audit records can be isolated with
//! `RUST_LOG=secrets_api::audit=info`.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, SecretsConfig};
use crate::secrets::{Result, SecretsError};

/// Build the event filter: `RUST_LOG` if set, otherwise the configured level.
pub fn build_filter(config: &SecretsConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| {
            SecretsError::config_error(format!("Invalid log level '{}': {}", config.log_level, e))
        }),
    }
}

/// Install the global subscriber.
///
/// Returns `Ok(false)` if a subscriber was already set elsewhere (for example
/// by a test harness); that is not treated as an error.
pub fn init_logging(config: &SecretsConfig) -> Result<bool> {
    let filter = build_filter(config)?;

    let installed = match config.log_format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).try_init().is_ok(),
        LogFormat::Json => {
            tracing_subscriber::fmt().json().with_env_filter(filter).try_init().is_ok()
        }
    };

    if installed {
        log_config_info(config);
    }
    Ok(installed)
}

/// Log configuration at startup
pub fn log_config_info(config: &SecretsConfig) {
    tracing::info!(
        operation_timeout_seconds = config.operation_timeout_seconds,
        log_level = %config.log_level,
        log_format = %config.log_format,
        backend_latency_ms = config.backend_latency_ms,
        recovery_window_seconds = config.recovery_window_seconds,
        "Secrets service configuration"
    );
}
