//! # Configuration Management
//!
//! Environment-driven configuration for callers of the secrets service.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `SECRETS_OPERATION_TIMEOUT_SECONDS` | `30` | deadline per service call (1..=300) |
//! | `SECRETS_LOG_LEVEL` | `info` | default log level, `RUST_LOG` wins |
//! | `SECRETS_LOG_FORMAT` | `text` | `text` or `json` |
//! | `SECRETS_BACKEND_LATENCY_MS` | `0` | artificial latency of the in-memory backend |
//! | `SECRETS_RECOVERY_WINDOW_SECONDS` | `2592000` | how long soft-deleted secrets stay restorable |

pub mod settings;

pub use settings::{
    LogFormat, SecretsConfig, ENV_BACKEND_LATENCY, ENV_LOG_FORMAT, ENV_LOG_LEVEL,
    ENV_OPERATION_TIMEOUT, ENV_RECOVERY_WINDOW,
};
