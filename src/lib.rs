//! # secrets-api
//!
//! Contract between secret-consuming code and a secrets-management backend.
//!
//! ## Architecture
//!
//! ```text
//! caller ──Context──▶ SecretsService ──▶ backend (in-memory, remote store, ...)
//!                         │
//!                  AuditedSecretsService ──▶ tracing (secrets_api::audit)
//! ```
//!
//! ## Core Components
//!
//! - **[`Secret`]**: named credential record; metadata serializes as JSON,
//!   the username/password payload only through [`Secret::cred_string`]
//! - **[`SecretsService`]**: create / inspect / list / delete capability set
//! - **[`Context`]**: per-call cancellation and deadline
//! - **[`SecretsConfig`]**: environment-driven settings
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use secrets_api::{init_logging, Result, Secret, SecretsConfig, SecretsService};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = SecretsConfig::from_env()?;
//!     init_logging(&config)?;
//!
//!     let service = config.build_in_memory_service();
//!     let id = service
//!         .create_secret(&config.context(), Secret::new("db-pass", "admin", "s3cr3t", ""))
//!         .await?;
//!     println!("created {}", id);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod observability;
pub mod secrets;

// Re-export commonly used types and traits
pub use config::{LogFormat, SecretsConfig};
pub use observability::init_logging;
pub use secrets::{
    AuditedSecretsService, Context, Credentials, DeletedSecret, InMemorySecretsService, Result,
    Secret, SecretString, SecretsError, SecretsService, Service,
};

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
