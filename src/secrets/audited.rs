//! Audited wrapper for [`SecretsService`] implementations.
//!
//! Every call is recorded as a structured `tracing` event on the
//! [`AUDIT_TARGET`] target, so audit records can be routed separately from
//! ordinary logs with a filter such as `RUST_LOG=secrets_api::audit=info`.
//!
//! Each record carries the action (`secrets.create`, `secrets.inspect`,
//! `secrets.list`, `secrets.delete`), the secret name or id and the outcome.
//! Credential values are never recorded. Over the in-memory backend,
//! [`AuditedSecretsService::restore_secret`] is recorded as `secrets.restore`;
//! calls made through [`AuditedSecretsService::inner`] are not audited.
//!
//! # Example
//!
//! ```rust
//! use secrets_api::{AuditedSecretsService, InMemorySecretsService};
//!
//! let service = AuditedSecretsService::new(InMemorySecretsService::new());
//! ```

use async_trait::async_trait;

use super::context::Context;
use super::error::{Result, SecretsError};
use super::memory::InMemorySecretsService;
use super::secret::Secret;
use super::service::SecretsService;

/// Tracing target used for audit records.
pub const AUDIT_TARGET: &str = "secrets_api::audit";

/// Wraps a backend and records every operation for audit.
pub struct AuditedSecretsService<T: SecretsService> {
    inner: T,
}

impl<T: SecretsService> AuditedSecretsService<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    /// The wrapped backend.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    fn record_success(action: &str, subject: &str) {
        tracing::info!(
            target: AUDIT_TARGET,
            action = %action,
            subject = %subject,
            success = true,
            "Secrets operation succeeded"
        );
    }

    fn record_failure(action: &str, subject: &str, error: &SecretsError) {
        tracing::warn!(
            target: AUDIT_TARGET,
            action = %action,
            subject = %subject,
            success = false,
            cancelled = error.is_cancellation(),
            error = %error,
            "Secrets operation failed"
        );
    }

    fn record<R>(action: &str, subject: &str, result: &Result<R>) {
        match result {
            Ok(_) => Self::record_success(action, subject),
            Err(e) => Self::record_failure(action, subject, e),
        }
    }
}

impl AuditedSecretsService<InMemorySecretsService> {
    /// Restores a soft-deleted secret and records it for audit.
    pub async fn restore_secret(&self, ctx: &Context, id: &str) -> Result<()> {
        let result = self.inner.restore_secret(ctx, id).await;
        Self::record("secrets.restore", id, &result);
        result
    }
}

#[async_trait]
impl<T: SecretsService> SecretsService for AuditedSecretsService<T> {
    async fn create_secret(&self, ctx: &Context, secret: Secret) -> Result<String> {
        let name = secret.name().to_string();
        let result = self.inner.create_secret(ctx, secret).await;
        match &result {
            Ok(id) => {
                tracing::info!(
                    target: AUDIT_TARGET,
                    action = "secrets.create",
                    subject = %name,
                    id = %id,
                    success = true,
                    "Secrets operation succeeded"
                );
            }
            Err(e) => Self::record_failure("secrets.create", &name, e),
        }
        result
    }

    async fn inspect_secret(&self, ctx: &Context, id: &str) -> Result<Secret> {
        let result = self.inner.inspect_secret(ctx, id).await;
        Self::record("secrets.inspect", id, &result);
        result
    }

    async fn list_secrets(&self, ctx: &Context) -> Result<Vec<Secret>> {
        let result = self.inner.list_secrets(ctx).await;
        match &result {
            Ok(secrets) => {
                tracing::info!(
                    target: AUDIT_TARGET,
                    action = "secrets.list",
                    subject = "*",
                    count = secrets.len(),
                    success = true,
                    "Secrets operation succeeded"
                );
            }
            Err(e) => Self::record_failure("secrets.list", "*", e),
        }
        result
    }

    async fn delete_secret(&self, ctx: &Context, id: &str, recover: bool) -> Result<()> {
        let result = self.inner.delete_secret(ctx, id, recover).await;
        let action = if recover { "secrets.delete.recoverable" } else { "secrets.delete" };
        Self::record(action, id, &result);
        result
    }
}
