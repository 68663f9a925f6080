//! # Configuration Settings
//!
//! Runtime settings for secrets service callers, loaded from `SECRETS_*`
//! environment variables.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use validator::Validate;

use crate::secrets::{
    Context, InMemorySecretsService, Result, SecretsError, DEFAULT_RECOVERY_WINDOW,
};

/// Environment variable holding the per-operation timeout in seconds.
pub const ENV_OPERATION_TIMEOUT: &str = "SECRETS_OPERATION_TIMEOUT_SECONDS";
/// Environment variable holding the default log level.
pub const ENV_LOG_LEVEL: &str = "SECRETS_LOG_LEVEL";
/// Environment variable selecting `text` or `json` log output.
pub const ENV_LOG_FORMAT: &str = "SECRETS_LOG_FORMAT";
/// Environment variable holding the in-memory backend latency in milliseconds.
pub const ENV_BACKEND_LATENCY: &str = "SECRETS_BACKEND_LATENCY_MS";
/// Environment variable holding the soft-delete recovery window in seconds.
pub const ENV_RECOVERY_WINDOW: &str = "SECRETS_RECOVERY_WINDOW_SECONDS";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = SecretsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(SecretsError::config_error(format!(
                "Invalid log format '{}': expected 'text' or 'json'",
                other
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Secrets service configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SecretsConfig {
    /// Deadline applied to each service call, in seconds
    #[validate(range(
        min = 1,
        max = 300,
        message = "Operation timeout must be between 1 and 300 seconds"
    ))]
    pub operation_timeout_seconds: u64,

    /// Default log level (overridden by RUST_LOG)
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Log output format
    pub log_format: LogFormat,

    /// Artificial latency for the in-memory backend, in milliseconds
    pub backend_latency_ms: u64,

    /// How long soft-deleted secrets stay restorable, in seconds
    #[validate(range(min = 1, message = "Recovery window must be at least 1 second"))]
    pub recovery_window_seconds: u64,
}

impl Default for SecretsConfig {
    fn default() -> Self {
        Self {
            operation_timeout_seconds: 30,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            backend_latency_ms: 0,
            recovery_window_seconds: DEFAULT_RECOVERY_WINDOW.as_secs(),
        }
    }
}

impl SecretsConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let operation_timeout_seconds = parse_env(ENV_OPERATION_TIMEOUT)?
            .unwrap_or(defaults.operation_timeout_seconds);

        let log_level = std::env::var(ENV_LOG_LEVEL).unwrap_or(defaults.log_level);

        let log_format = match std::env::var(ENV_LOG_FORMAT) {
            Ok(value) => value.parse()?,
            Err(_) => defaults.log_format,
        };

        let backend_latency_ms =
            parse_env(ENV_BACKEND_LATENCY)?.unwrap_or(defaults.backend_latency_ms);

        let recovery_window_seconds =
            parse_env(ENV_RECOVERY_WINDOW)?.unwrap_or(defaults.recovery_window_seconds);

        let config = Self {
            operation_timeout_seconds,
            log_level,
            log_format,
            backend_latency_ms,
            recovery_window_seconds,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(SecretsError::from)
    }

    /// Get the operation timeout as Duration
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_secs(self.operation_timeout_seconds)
    }

    /// Get the backend latency as Duration
    pub fn backend_latency(&self) -> Duration {
        Duration::from_millis(self.backend_latency_ms)
    }

    /// Get the recovery window as Duration
    pub fn recovery_window(&self) -> Duration {
        Duration::from_secs(self.recovery_window_seconds)
    }

    /// A fresh context bounded by the configured operation timeout.
    pub fn context(&self) -> Context {
        Context::background().with_timeout(self.operation_timeout())
    }

    /// Build the in-memory backend with the configured latency and recovery window.
    pub fn build_in_memory_service(&self) -> InMemorySecretsService {
        InMemorySecretsService::new()
            .with_latency(self.backend_latency())
            .with_recovery_window(self.recovery_window())
    }
}

fn parse_env(name: &str) -> Result<Option<u64>> {
    match std::env::var(name) {
        Ok(value) => value.trim().parse::<u64>().map(Some).map_err(|e| {
            SecretsError::config_error(format!("Invalid {} '{}': {}", name, value, e))
        }),
        Err(_) => Ok(None),
    }
}
