//! Concurrency primitives shared by the orchestrator and health monitor
//!
//! Every primitive is built on native thread-safe building blocks
//! (`std` atomics, `dashmap`, `parking_lot`, `tokio::sync`). Blocking
//! operations always take a timeout and report [`SyncError::TimedOut`]
//! instead of waiting forever.
//!
//! - `counter` - atomic counter with compare-and-set
//! - `map` - concurrent map with per-key locking
//! - `queue` - bounded FIFO queue with timed blocking dequeue
//! - `ttl_cache` - cache whose entries expire individually
//! - `pool` - fixed-capacity resource pool
//! - `mutex` / `semaphore` - timed async locking

pub mod counter;
pub mod error;
pub mod map;
pub mod mutex;
pub mod pool;
pub mod queue;
pub mod semaphore;
pub mod ttl_cache;


pub use counter::AtomicCounter;
pub use error::{SyncError, SyncResult};
pub use map::ConcurrentMap;
pub use mutex::Mutex;
pub use pool::{Pooled, ResourcePool};
pub use queue::BoundedQueue;
pub use semaphore::Semaphore;
pub use ttl_cache::{CacheEntry, TtlCache, TtlCacheStats};
