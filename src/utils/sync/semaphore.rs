//! Counting semaphore with timeouts and drain

use super::error::{SyncError, SyncResult};
use std::time::Duration;
use tokio::sync::{AcquireError, SemaphorePermit, TryAcquireError};

/// Counting semaphore
///
/// Permits are returned when the guard drops. `drain` closes the semaphore:
/// every waiter, current or future, is released with `SyncError::Closed`.
#[derive(Debug)]
pub struct Semaphore {
    inner: tokio::sync::Semaphore,
}

impl Semaphore {
    /// Create a semaphore with `permits` available
    pub fn new(permits: usize) -> Self {
        Self {
            inner: tokio::sync::Semaphore::new(permits),
        }
    }

    /// Wait for a permit
    pub async fn acquire(&self) -> SyncResult<SemaphorePermit<'_>> {
        self.inner
            .acquire()
            .await
            .map_err(|_: AcquireError| SyncError::Closed)
    }

    /// Wait up to `timeout` for a permit
    pub async fn acquire_timeout(&self, timeout: Duration) -> SyncResult<SemaphorePermit<'_>> {
        match tokio::time::timeout(timeout, self.inner.acquire()).await {
            Ok(Ok(permit)) => Ok(permit),
            Ok(Err(_)) => Err(SyncError::Closed),
            Err(_) => Err(SyncError::TimedOut(timeout)),
        }
    }

    /// Take a permit only if one is free
    pub fn try_acquire(&self) -> Option<SemaphorePermit<'_>> {
        match self.inner.try_acquire() {
            Ok(permit) => Some(permit),
            Err(TryAcquireError::NoPermits) | Err(TryAcquireError::Closed) => None,
        }
    }

    /// Add `count` permits
    pub fn release_multiple(&self, count: usize) {
        self.inner.add_permits(count);
    }

    /// Release every waiter and refuse further acquisitions
    pub fn drain(&self) {
        self.inner.close();
    }

    /// Whether `drain` has been called
    pub fn is_drained(&self) -> bool {
        self.inner.is_closed()
    }

    /// Permits free right now
    pub fn available_permits(&self) -> usize {
        self.inner.available_permits()
    }
}
