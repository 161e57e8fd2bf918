//! Bounded FIFO queue with timed blocking dequeue

use super::error::{SyncError, SyncResult};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;

/// Bounded multi-producer multi-consumer FIFO queue
///
/// `enqueue` never waits: it reports `false` once the queue is full.
/// `dequeue_blocking` is the only waiting operation and always carries a
/// timeout.
#[derive(Debug)]
pub struct BoundedQueue<T> {
    items: Mutex<VecDeque<T>>,
    capacity: usize,
    not_empty: Notify,
}

impl<T> BoundedQueue<T> {
    /// Create a queue holding at most `capacity` items
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            not_empty: Notify::new(),
        }
    }

    /// Append an item; `false` when the queue is full
    pub fn enqueue(&self, item: T) -> bool {
        {
            let mut items = self.items.lock();
            if items.len() >= self.capacity {
                return false;
            }
            items.push_back(item);
        }
        self.not_empty.notify_one();
        true
    }

    /// Pop the oldest item without waiting
    pub fn dequeue(&self) -> Option<T> {
        self.items.lock().pop_front()
    }

    /// Pop the oldest item, waiting up to `timeout` for one to arrive
    pub async fn dequeue_blocking(&self, timeout: Duration) -> SyncResult<T> {
        let deadline = Instant::now() + timeout;

        loop {
            let notified = self.not_empty.notified();
            tokio::pin!(notified);
            // Register before checking so an enqueue between the check and
            // the await still wakes us.
            notified.as_mut().enable();

            if let Some(item) = self.dequeue() {
                return Ok(item);
            }

            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                // A wakeup may have landed right at the deadline.
                return self.dequeue().ok_or(SyncError::TimedOut(timeout));
            }
        }
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// Whether no items are queued
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Maximum number of items
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
