//! Router counters

use crate::utils::sync::AtomicCounter;
use serde::Serialize;

/// Counters shared by every `route()` call
#[derive(Debug, Default)]
pub struct RouterMetrics {
    pub total_requests: AtomicCounter,
    pub successful_requests: AtomicCounter,
    pub failed_requests: AtomicCounter,
    /// Transport calls made, one per attempted candidate
    pub dispatch_attempts: AtomicCounter,
    /// Successful routes served by a non-first candidate
    pub fallbacks: AtomicCounter,
    pub cache_hits: AtomicCounter,
    pub scoring_runs: AtomicCounter,
}

/// Point-in-time copy of [`RouterMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouterMetricsSnapshot {
    pub total_requests: i64,
    pub successful_requests: i64,
    pub failed_requests: i64,
    pub dispatch_attempts: i64,
    pub fallbacks: i64,
    pub cache_hits: i64,
    pub scoring_runs: i64,
}

impl RouterMetrics {
    pub fn snapshot(&self) -> RouterMetricsSnapshot {
        RouterMetricsSnapshot {
            total_requests: self.total_requests.get(),
            successful_requests: self.successful_requests.get(),
            failed_requests: self.failed_requests.get(),
            dispatch_attempts: self.dispatch_attempts.get(),
            fallbacks: self.fallbacks.get(),
            cache_hits: self.cache_hits.get(),
            scoring_runs: self.scoring_runs.get(),
        }
    }

    /// Success ratio over finished routes
    pub fn success_rate(&self) -> f64 {
        let successful = self.successful_requests.get();
        let finished = successful + self.failed_requests.get();
        if finished == 0 {
            0.0
        } else {
            successful as f64 / finished as f64
        }
    }
}
