//! Cooperative cancellation for digest workers.
//!
//! A `CancelToken` is shared between the driver and a worker. The worker checks
//! it before absorbing each unit and can also await it while pacing, so a
//! cancel request is observed after at most one more unit.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Cloneable cancel flag. All clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        if !self.inner.cancelled.swap(true, Ordering::AcqRel) {
            self.inner.notify.notify_waiters();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Resolves once `cancel` has been called (immediately if it already was).
    pub async fn cancelled(&self) {
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            // Register before checking the flag so a concurrent cancel() cannot be missed.
            notified.as_mut().enable();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }

    /// Cancel once `deadline` has elapsed. Must be called inside a tokio runtime;
    /// abort the returned handle to disarm the timer.
    pub fn cancel_after(&self, deadline: Duration) -> JoinHandle<()> {
        let token = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(deadline).await;
            tracing::debug!(?deadline, "cancel deadline exceeded");
            token.cancel();
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_shared_between_clones() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        token.cancel();
        assert!(other.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_resolves_when_already_cancelled() {
        let token = CancelToken::new();
        token.cancel();
        token.cancelled().await;
    }

    #[tokio::test]
    async fn cancelled_wakes_waiter() {
        let token = CancelToken::new();
        let waiter = {
            let token = token.clone();
            tokio::spawn(async move { token.cancelled().await })
        };
        tokio::task::yield_now().await;
        token.cancel();
        waiter.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_after_fires_at_deadline() {
        let token = CancelToken::new();
        let start = tokio::time::Instant::now();
        let _timer = token.cancel_after(Duration::from_millis(300));
        token.cancelled().await;
        assert!(start.elapsed() >= Duration::from_millis(300));
        assert!(token.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn aborted_timer_never_cancels() {
        let token = CancelToken::new();
        let timer = token.cancel_after(Duration::from_millis(50));
        timer.abort();
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!token.is_cancelled());
    }
}
