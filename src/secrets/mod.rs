//! Secrets management abstraction.
//!
//! This module defines the contract between code that manages credentials
//! and whatever system actually stores them.
//!
//! # Architecture
//!
//! - [`Secret`]: a named credential record. Its metadata serializes freely;
//!   the username/password payload only comes out through
//!   [`Secret::cred_string`].
//! - [`SecretsService`]: the capability set a backend implements
//!   (create / inspect / list / delete).
//! - [`Context`]: per-call cancellation and deadline, passed to every
//!   service method.
//!
//! Two implementations ship with the crate:
//!
//! - [`InMemorySecretsService`]: in-process backend for tests and development
//! - [`AuditedSecretsService`]: decorator that records every call on the
//!   `secrets_api::audit` tracing target
//!
//! # Example
//!
//! ```rust
//! use secrets_api::secrets::{AuditedSecretsService, Context, InMemorySecretsService, Secret, SecretsService};
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> secrets_api::Result<()> {
//! let service = AuditedSecretsService::new(InMemorySecretsService::new());
//! let ctx = Context::background().with_timeout(Duration::from_secs(5));
//!
//! let secret = Secret::new("db-pass", "admin", "s3cr3t", "db credential").with_label("env", "prod");
//! let id = service.create_secret(&ctx, secret).await?;
//!
//! let stored = service.inspect_secret(&ctx, &id).await?;
//! println!("{}", stored.to_json()?);
//! # Ok(())
//! # }
//! ```
//!
//! # Security Considerations
//!
//! - `Debug`, `Display` and serde output of credentials is always `[REDACTED]`
//! - credential strings are zeroed on drop
//! - audit records carry names and ids, never values

pub mod audited;
pub mod context;
pub mod credentials;
pub mod error;
pub mod memory;
pub mod secret;
pub mod service;

pub use audited::{AuditedSecretsService, AUDIT_TARGET};
pub use context::Context;
pub use credentials::{Credentials, SecretString};
pub use error::{Result, SecretsError};
pub use memory::{DeletedSecret, InMemorySecretsService, DEFAULT_RECOVERY_WINDOW};
pub use secret::Secret;
pub use service::SecretsService;

/// Alias for [`SecretsService`].
pub use service::SecretsService as Service;
