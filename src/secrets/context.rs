//! Per-call cancellation and deadline propagation.
//!
//! Every [`SecretsService`](super::SecretsService) method takes a
//! [`Context`]. Callers cancel it or give it a deadline; backends wrap their
//! blocking work in [`Context::run`] (or poll [`Context::check`] between
//! steps) so an abandoned call stops promptly with
//! [`SecretsError::Cancelled`] or [`SecretsError::DeadlineExceeded`].

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::error::{Result, SecretsError};

/// Cancellation token plus optional deadline.
///
/// Cloning a context shares its token: cancelling any clone cancels them all.
/// Derived contexts ([`Context::child`], [`Context::with_timeout`],
/// [`Context::with_deadline`]) are cancelled with their parent, never the
/// other way round.
#[derive(Debug, Clone)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Default for Context {
    fn default() -> Self {
        Self::background()
    }
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self { token: CancellationToken::new(), deadline: None }
    }

    /// Derives a context cancelled together with `self`.
    pub fn child(&self) -> Self {
        Self { token: self.token.child_token(), deadline: self.deadline }
    }

    /// Derives a context that expires after `timeout`, or at the parent deadline if sooner.
    ///
    /// A timeout too large to represent as an instant adds no deadline.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self.child(),
        }
    }

    /// Derives a context that expires at `deadline`, or at the parent deadline if sooner.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(parent) => parent.min(deadline),
            None => deadline,
        };
        Self { token: self.token.child_token(), deadline: Some(deadline) }
    }

    /// Cancels this context and everything derived from it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline. `None` when there is no deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(Instant::now()))
    }

    /// Returns the reason this context is done, if it is.
    pub fn check(&self) -> Result<()> {
        if self.token.is_cancelled() {
            return Err(SecretsError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(SecretsError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Completes when the context is cancelled or its deadline passes.
    pub async fn done(&self) -> SecretsError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                _ = self.token.cancelled() => SecretsError::Cancelled,
                _ = tokio::time::sleep_until(deadline) => SecretsError::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                SecretsError::Cancelled
            }
        }
    }

    /// Drives `operation` to completion unless the context finishes first.
    ///
    /// A context that is already done fails without polling `operation`.
    pub async fn run<F, T>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check()?;
        tokio::select! {
            biased;
            reason = self.done() => Err(reason),
            result = operation => result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_background_is_never_done() {
        let ctx = Context::background();
        assert!(!ctx.is_cancelled());
        assert!(ctx.deadline().is_none());
        assert!(ctx.remaining().is_none());
        assert!(ctx.check().is_ok());
    }

    #[test]
    fn test_cancel_propagates_to_children_only() {
        let parent = Context::background();
        let child = parent.child();
        let grandchild = child.with_timeout(Duration::from_secs(60));

        child.cancel();
        assert!(child.is_cancelled());
        assert!(grandchild.is_cancelled());
        assert!(!parent.is_cancelled());

        parent.cancel();
        assert!(matches!(parent.check(), Err(SecretsError::Cancelled)));
    }

    #[test]
    fn test_clones_share_cancellation() {
        let ctx = Context::background();
        let clone = ctx.clone();
        clone.cancel();
        assert!(ctx.is_cancelled());
    }

    #[tokio::test]
    async fn test_child_deadline_never_outlives_parent() {
        let parent = Context::background().with_timeout(Duration::from_millis(50));
        let child = parent.with_timeout(Duration::from_secs(60));

        assert_eq!(child.deadline(), parent.deadline());

        let tighter = parent.with_timeout(Duration::from_millis(10));
        assert!(tighter.deadline().unwrap() < parent.deadline().unwrap());
    }

    #[tokio::test]
    async fn test_unrepresentable_timeout_keeps_parent_deadline() {
        let unbounded = Context::background().with_timeout(Duration::MAX);
        assert!(unbounded.deadline().is_none());
        assert!(unbounded.check().is_ok());

        let parent = Context::background().with_timeout(Duration::from_secs(5));
        let child = parent.with_timeout(Duration::MAX);
        assert_eq!(child.deadline(), parent.deadline());

        parent.cancel();
        assert!(child.is_cancelled());
    }

    #[tokio::test]
    async fn test_check_reports_deadline() {
        let ctx = Context::background().with_timeout(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(30)).await;

        assert!(matches!(ctx.check(), Err(SecretsError::DeadlineExceeded)));
        assert_eq!(ctx.remaining(), Some(Duration::ZERO));
    }

    #[tokio::test]
    async fn test_run_completes_when_not_done() {
        let ctx = Context::background().with_timeout(Duration::from_secs(5));
        let value = ctx.run(async { Ok::<_, SecretsError>(42) }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_run_propagates_operation_error() {
        let ctx = Context::background();
        let result: Result<()> = ctx.run(async { Err(SecretsError::not_found("x")) }).await;
        assert!(result.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_run_skips_operation_when_already_cancelled() {
        let ctx = Context::background();
        ctx.cancel();

        let polled = Arc::new(AtomicBool::new(false));
        let flag = polled.clone();
        let result = ctx
            .run(async move {
                flag.store(true, Ordering::SeqCst);
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(SecretsError::Cancelled)));
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_run_aborts_on_cancel() {
        let ctx = Context::background();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let result = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(SecretsError::Cancelled)));
    }

    #[tokio::test]
    async fn test_run_aborts_on_deadline() {
        let ctx = Context::background().with_timeout(Duration::from_millis(20));

        let result = ctx
            .run(async {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            })
            .await;

        assert!(matches!(result, Err(SecretsError::DeadlineExceeded)));
    }
}
