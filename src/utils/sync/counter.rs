//! Atomic counter

use std::sync::atomic::{AtomicI64, Ordering};

/// Signed counter with a total order over all updates
///
/// Uses `SeqCst` so every observer agrees on the order of increments,
/// decrements and compare-and-set operations.
#[derive(Debug, Default)]
pub struct AtomicCounter {
    value: AtomicI64,
}

impl AtomicCounter {
    /// Create a counter starting at `initial`
    pub const fn new(initial: i64) -> Self {
        Self {
            value: AtomicI64::new(initial),
        }
    }

    /// Add one and return the new value
    pub fn increment(&self) -> i64 {
        self.value.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Subtract one and return the new value
    pub fn decrement(&self) -> i64 {
        self.value.fetch_sub(1, Ordering::SeqCst) - 1
    }

    /// Add `delta` and return the new value
    pub fn add(&self, delta: i64) -> i64 {
        self.value.fetch_add(delta, Ordering::SeqCst) + delta
    }

    /// Current value
    pub fn get(&self) -> i64 {
        self.value.load(Ordering::SeqCst)
    }

    /// Store `new` only if the current value is `expected`
    pub fn compare_and_set(&self, expected: i64, new: i64) -> bool {
        self.value
            .compare_exchange(expected, new, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Reset to zero, returning the previous value
    pub fn reset(&self) -> i64 {
        self.value.swap(0, Ordering::SeqCst)
    }
}
