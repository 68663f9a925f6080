//! The secrets backend capability contract.

use async_trait::async_trait;

use super::context::Context;
use super::error::Result;
use super::secret::Secret;

/// Operations every secrets backend must provide.
///
/// Implementations must be safe to call from many tasks at once and must
/// honour the [`Context`] passed to each call: once it is cancelled or its
/// deadline passes, the call returns [`SecretsError::Cancelled`] or
/// [`SecretsError::DeadlineExceeded`] instead of completing.
///
/// Failures are always reported as errors. Callers must not assume any
/// partial effect of a failed call.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use async_trait::async_trait;
/// use secrets_api::{Context, Result, Secret, SecretsError, SecretsService};
///
/// struct RemoteSecrets { /* client handle */ }
///
/// #[async_trait]
/// impl SecretsService for RemoteSecrets {
///     async fn create_secret(&self, ctx: &Context, secret: Secret) -> Result<String> {
///         ctx.run(async { self.post(secret.to_json()?, secret.cred_string()?).await }).await
///     }
///     // ...
/// }
/// ```
///
/// [`SecretsError::Cancelled`]: super::SecretsError::Cancelled
/// [`SecretsError::DeadlineExceeded`]: super::SecretsError::DeadlineExceeded
#[async_trait]
pub trait SecretsService: Send + Sync {
    /// Submits a new secret and returns the identifier the backend assigned.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::AlreadyExists`](super::SecretsError::AlreadyExists) on a name collision
    /// - [`SecretsError::PermissionDenied`](super::SecretsError::PermissionDenied)
    /// - [`SecretsError::ConnectionFailed`](super::SecretsError::ConnectionFailed)
    async fn create_secret(&self, ctx: &Context, secret: Secret) -> Result<String>;

    /// Fetches a secret by identifier.
    ///
    /// Whether the credential payload is populated is backend-defined.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::NotFound`](super::SecretsError::NotFound) if no such secret exists
    async fn inspect_secret(&self, ctx: &Context, id: &str) -> Result<Secret>;

    /// Lists every secret visible to the caller. Ordering is backend-defined.
    async fn list_secrets(&self, ctx: &Context) -> Result<Vec<Secret>>;

    /// Removes a secret.
    ///
    /// `recover` asks the backend for a reversible delete where it supports
    /// one; what that means exactly is backend-defined.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::NotFound`](super::SecretsError::NotFound) if no such secret exists
    /// - [`SecretsError::PermissionDenied`](super::SecretsError::PermissionDenied) if deletion is disallowed
    async fn delete_secret(&self, ctx: &Context, id: &str, recover: bool) -> Result<()>;
}
