//! In-process secrets backend.
//!
//! Keeps secrets in memory for the lifetime of the value. Useful for tests,
//! local development and as a reference for how a backend is expected to
//! behave:
//!
//! - IDs are random UUIDs assigned on create
//! - names are unique across active secrets and secrets pending deletion
//! - `delete_secret(.., recover = true)` moves the secret to a recoverable bin;
//!   `recover = false` removes it for good
//! - binned secrets expire after the recovery window (30 days unless set with
//!   [`InMemorySecretsService::with_recovery_window`]), which frees their names
//! - every call observes its [`Context`]
//!
//! # Example
//!
//! ```rust
//! use secrets_api::{Context, InMemorySecretsService, Secret, SecretsService};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> secrets_api::Result<()> {
//! let service = InMemorySecretsService::new();
//! let ctx = Context::background();
//!
//! let id = service.create_secret(&ctx, Secret::new("db-pass", "admin", "s3cr3t", "")).await?;
//! service.delete_secret(&ctx, &id, true).await?;
//! service.restore_secret(&ctx, &id).await?;
//!
//! assert_eq!(service.inspect_secret(&ctx, &id).await?.name(), "db-pass");
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use super::context::Context;
use super::error::{Result, SecretsError};
use super::secret::Secret;
use super::service::SecretsService;

/// Default time a soft-deleted secret stays restorable.
pub const DEFAULT_RECOVERY_WINDOW: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// A soft-deleted secret that can still be restored.
#[derive(Debug, Clone)]
pub struct DeletedSecret {
    secret: Secret,
    deleted_at: DateTime<Utc>,
    expires_at: Option<DateTime<Utc>>,
}

impl DeletedSecret {
    pub fn secret(&self) -> &Secret {
        &self.secret
    }

    pub fn deleted_at(&self) -> DateTime<Utc> {
        self.deleted_at
    }

    /// When the secret is purged from the bin. `None` if the window is too
    /// large to represent.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

#[derive(Debug, Default)]
struct Store {
    active: HashMap<String, Secret>,
    deleted: HashMap<String, DeletedSecret>,
}

impl Store {
    fn purge_expired(&mut self) {
        let now = Utc::now();
        let before = self.deleted.len();
        self.deleted.retain(|_, d| !d.is_expired(now));
        let purged = before - self.deleted.len();
        if purged > 0 {
            debug!(purged, "Purged expired secrets from recovery bin");
        }
    }

    fn name_in_use(&self, name: &str) -> bool {
        self.active.values().any(|s| s.name() == name)
            || self.deleted.values().any(|d| d.secret.name() == name)
    }
}

/// Secrets backend backed by a shared in-memory map.
///
/// Cloning shares the underlying store.
#[derive(Debug, Clone)]
pub struct InMemorySecretsService {
    store: Arc<RwLock<Store>>,
    latency: Duration,
    recovery_window: Duration,
}

impl Default for InMemorySecretsService {
    fn default() -> Self {
        Self {
            store: Arc::default(),
            latency: Duration::ZERO,
            recovery_window: DEFAULT_RECOVERY_WINDOW,
        }
    }
}

impl InMemorySecretsService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how long a soft-deleted secret stays restorable.
    ///
    /// Applies to secrets deleted after the call.
    pub fn with_recovery_window(mut self, window: Duration) -> Self {
        self.recovery_window = window;
        self
    }

    pub fn recovery_window(&self) -> Duration {
        self.recovery_window
    }

    /// Delays every operation by `latency` before touching the store.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Brings a soft-deleted secret back to the active set.
    #[tracing::instrument(skip(self, ctx))]
    pub async fn restore_secret(&self, ctx: &Context, id: &str) -> Result<()> {
        ctx.run(async {
            self.simulate_latency().await;
            let mut store = self.store.write().await;
            store.purge_expired();
            let deleted = store.deleted.remove(id).ok_or_else(|| SecretsError::not_found(id))?;
            store.active.insert(id.to_string(), deleted.secret);
            info!(id = %id, "Restored secret");
            Ok(())
        })
        .await
    }

    /// Lists soft-deleted secrets still inside their recovery window, oldest
    /// deletion first.
    pub async fn deleted_secrets(&self, ctx: &Context) -> Result<Vec<DeletedSecret>> {
        ctx.run(async {
            self.simulate_latency().await;
            let mut store = self.store.write().await;
            store.purge_expired();
            let mut deleted: Vec<DeletedSecret> = store.deleted.values().cloned().collect();
            deleted.sort_by_key(|d| d.deleted_at);
            Ok(deleted)
        })
        .await
    }
}

#[async_trait]
impl SecretsService for InMemorySecretsService {
    #[tracing::instrument(skip(self, ctx, secret), fields(name = %secret.name()))]
    async fn create_secret(&self, ctx: &Context, secret: Secret) -> Result<String> {
        ctx.run(async {
            self.simulate_latency().await;
            let mut store = self.store.write().await;
            store.purge_expired();
            if store.name_in_use(secret.name()) {
                return Err(SecretsError::already_exists(secret.name()));
            }

            let id = Uuid::new_v4().to_string();
            store.active.insert(id.clone(), secret.with_id(id.clone()));
            info!(id = %id, "Created secret");
            Ok(id)
        })
        .await
    }

    #[tracing::instrument(skip(self, ctx))]
    async fn inspect_secret(&self, ctx: &Context, id: &str) -> Result<Secret> {
        ctx.run(async {
            self.simulate_latency().await;
            let store = self.store.read().await;
            store.active.get(id).cloned().ok_or_else(|| SecretsError::not_found(id))
        })
        .await
    }

    #[tracing::instrument(skip(self, ctx))]
    async fn list_secrets(&self, ctx: &Context) -> Result<Vec<Secret>> {
        ctx.run(async {
            self.simulate_latency().await;
            let store = self.store.read().await;
            let mut secrets: Vec<Secret> = store.active.values().cloned().collect();
            secrets.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(b.id())));
            debug!(count = secrets.len(), "Listed secrets");
            Ok(secrets)
        })
        .await
    }

    #[tracing::instrument(skip(self, ctx))]
    async fn delete_secret(&self, ctx: &Context, id: &str, recover: bool) -> Result<()> {
        ctx.run(async {
            self.simulate_latency().await;
            let mut store = self.store.write().await;
            store.purge_expired();

            if recover {
                let secret = store.active.remove(id).ok_or_else(|| SecretsError::not_found(id))?;
                let deleted_at = Utc::now();
                let expires_at = chrono::Duration::from_std(self.recovery_window)
                    .ok()
                    .and_then(|window| deleted_at.checked_add_signed(window));
                store
                    .deleted
                    .insert(id.to_string(), DeletedSecret { secret, deleted_at, expires_at });
                info!(id = %id, "Secret moved to recovery bin");
                return Ok(());
            }

            let removed = store.active.remove(id).is_some() || store.deleted.remove(id).is_some();
            if !removed {
                return Err(SecretsError::not_found(id));
            }
            info!(id = %id, "Secret permanently deleted");
            Ok(())
        })
        .await
    }
}
