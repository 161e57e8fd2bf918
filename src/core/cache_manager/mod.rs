//! Routing decision cache
//!
//! Memoizes the outcome of provider scoring, keyed by a fingerprint of the
//! request. Entries are advisory: the orchestrator re-checks the health of
//! an old decision's provider before trusting it.

pub mod manager;
pub mod types;


pub use manager::RoutingCache;
pub use types::{CacheConfig, CacheStats, RequestFingerprint, RoutingDecision};
