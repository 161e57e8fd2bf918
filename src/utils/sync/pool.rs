//! Fixed-capacity resource pool

use super::error::{SyncError, SyncResult};
use parking_lot::Mutex;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore, TryAcquireError};

type Factory<T> = Box<dyn Fn() -> T + Send + Sync>;

struct PoolInner<T> {
    idle: Mutex<Vec<T>>,
    permits: Arc<Semaphore>,
    factory: Factory<T>,
    max_size: usize,
}

/// Pool handing out at most `max_size` resources at a time
///
/// Resources are built lazily by the factory and recycled on release.
/// Waiters queue on a fair semaphore, so blocked acquirers are served in
/// arrival order.
pub struct ResourcePool<T> {
    inner: Arc<PoolInner<T>>,
}

impl<T: Send + 'static> ResourcePool<T> {
    /// Create a pool of `max_size` resources built by `factory`
    pub fn new(max_size: usize, factory: impl Fn() -> T + Send + Sync + 'static) -> Self {
        Self {
            inner: Arc::new(PoolInner {
                idle: Mutex::new(Vec::with_capacity(max_size)),
                permits: Arc::new(Semaphore::new(max_size)),
                factory: Box::new(factory),
                max_size,
            }),
        }
    }

    /// Take a resource if one is free right now
    pub fn acquire(&self) -> Option<Pooled<T>> {
        match Arc::clone(&self.inner.permits).try_acquire_owned() {
            Ok(permit) => Some(self.checkout(permit)),
            Err(TryAcquireError::NoPermits) | Err(TryAcquireError::Closed) => None,
        }
    }

    /// Take a resource, waiting up to `timeout` for one to be released
    pub async fn acquire_blocking(&self, timeout: Duration) -> SyncResult<Pooled<T>> {
        let permits = Arc::clone(&self.inner.permits);
        match tokio::time::timeout(timeout, permits.acquire_owned()).await {
            Ok(Ok(permit)) => Ok(self.checkout(permit)),
            Ok(Err(_)) => Err(SyncError::Closed),
            Err(_) => Err(SyncError::TimedOut(timeout)),
        }
    }

    /// Return a resource to the pool (dropping the handle does the same)
    pub fn release(&self, resource: Pooled<T>) {
        drop(resource);
    }

    fn checkout(&self, permit: OwnedSemaphorePermit) -> Pooled<T> {
        let resource = self
            .inner
            .idle
            .lock()
            .pop()
            .unwrap_or_else(|| (self.inner.factory)());

        Pooled {
            resource: Some(resource),
            pool: Arc::clone(&self.inner),
            _permit: permit,
        }
    }

    /// Resources currently checked out
    pub fn in_use(&self) -> usize {
        self.inner.max_size - self.inner.permits.available_permits()
    }

    /// Resources that can be acquired without waiting
    pub fn available(&self) -> usize {
        self.inner.permits.available_permits()
    }

    /// Built resources waiting for reuse
    pub fn idle(&self) -> usize {
        self.inner.idle.lock().len()
    }

    /// Configured capacity
    pub fn max_size(&self) -> usize {
        self.inner.max_size
    }
}

impl<T> fmt::Debug for ResourcePool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourcePool")
            .field("max_size", &self.inner.max_size)
            .field("available", &self.inner.permits.available_permits())
            .finish()
    }
}

/// A checked-out resource; returns to its pool when dropped
pub struct Pooled<T> {
    resource: Option<T>,
    pool: Arc<PoolInner<T>>,
    // Dropped after the resource is back in the idle list.
    _permit: OwnedSemaphorePermit,
}

impl<T> Deref for Pooled<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.resource
            .as_ref()
            .unwrap_or_else(|| unreachable!("pooled resource taken before drop"))
    }
}

impl<T> DerefMut for Pooled<T> {
    fn deref_mut(&mut self) -> &mut T {
        self.resource
            .as_mut()
            .unwrap_or_else(|| unreachable!("pooled resource taken before drop"))
    }
}

impl<T> Drop for Pooled<T> {
    fn drop(&mut self) {
        if let Some(resource) = self.resource.take() {
            self.pool.idle.lock().push(resource);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Pooled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pooled").field(&self.resource).finish()
    }
}
