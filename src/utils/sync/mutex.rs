//! Async mutex with timed acquisition

use super::error::{SyncError, SyncResult};
use std::time::Duration;
use tokio::sync::MutexGuard;

/// Mutual exclusion around a value, safe to hold across `.await`
///
/// Waiters are queued fairly; the lock is released when the guard drops.
#[derive(Debug, Default)]
pub struct Mutex<T> {
    inner: tokio::sync::Mutex<T>,
}

impl<T> Mutex<T> {
    /// Wrap `value`
    pub fn new(value: T) -> Self {
        Self {
            inner: tokio::sync::Mutex::new(value),
        }
    }

    /// Wait for the lock
    pub async fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.lock().await
    }

    /// Take the lock only if it is free
    pub fn try_lock(&self) -> Option<MutexGuard<'_, T>> {
        self.inner.try_lock().ok()
    }

    /// Wait up to `timeout` for the lock
    pub async fn lock_timeout(&self, timeout: Duration) -> SyncResult<MutexGuard<'_, T>> {
        tokio::time::timeout(timeout, self.inner.lock())
            .await
            .map_err(|_| SyncError::TimedOut(timeout))
    }

    /// Consume the mutex, returning the value
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}
