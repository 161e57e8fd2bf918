//! Routing cache implementation

use super::types::{AtomicCacheStats, CacheConfig, CacheStats, RequestFingerprint, RoutingDecision};
use crate::utils::sync::TtlCache;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// TTL cache of routing decisions
pub struct RoutingCache {
    entries: Arc<TtlCache<RequestFingerprint, RoutingDecision>>,
    config: CacheConfig,
    stats: AtomicCacheStats,
    /// Last sweep run from `store` because the cache was full
    last_full_sweep: parking_lot::Mutex<Option<Instant>>,
    cleanup_task: parking_lot::Mutex<Option<JoinHandle<()>>>,
}

impl std::fmt::Debug for RoutingCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutingCache")
            .field("config", &self.config)
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl RoutingCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: Arc::new(TtlCache::new()),
            config,
            stats: AtomicCacheStats::default(),
            last_full_sweep: parking_lot::Mutex::new(None),
            cleanup_task: parking_lot::Mutex::new(None),
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Get a live decision
    pub fn lookup(&self, fingerprint: &RequestFingerprint) -> Option<RoutingDecision> {
        let decision = self.entries.get(fingerprint);
        if decision.is_some() {
            debug!("Routing cache hit for {}", fingerprint);
        }
        decision
    }

    /// Store a decision for `ttl`, replacing any previous one
    ///
    /// A full cache only accepts new fingerprints once a sweep frees room.
    pub fn store(&self, fingerprint: RequestFingerprint, decision: RoutingDecision, ttl: Duration) {
        // Replacing an existing key never grows the cache
        if self.entries.len() >= self.config.max_entries
            && !self.entries.contains_key(&fingerprint)
            && !self.sweep_when_full()
        {
            self.stats.rejected.fetch_add(1, Ordering::Relaxed);
            debug!("Routing cache full, not storing {}", fingerprint);
            return;
        }

        self.entries.set(fingerprint, decision, ttl);
        self.stats.stores.fetch_add(1, Ordering::Relaxed);
    }

    /// Sweep from the store path, at most once per `cleanup_interval`
    ///
    /// Returns whether anything was evicted.
    fn sweep_when_full(&self) -> bool {
        {
            let mut last = self.last_full_sweep.lock();
            if last.is_some_and(|at| at.elapsed() < self.config.cleanup_interval) {
                return false;
            }
            *last = Some(Instant::now());
        }
        self.entries.cleanup() > 0
    }

    /// Store with the configured TTL
    pub fn store_default(&self, fingerprint: RequestFingerprint, decision: RoutingDecision) {
        self.store(fingerprint, decision, self.config.default_ttl);
    }

    /// Drop a decision
    pub fn invalidate(&self, fingerprint: &RequestFingerprint) -> bool {
        let removed = self.entries.delete(fingerprint);
        if removed {
            self.stats.invalidations.fetch_add(1, Ordering::Relaxed);
        }
        removed
    }

    /// Sweep expired decisions
    pub fn cleanup(&self) -> usize {
        self.entries.cleanup()
    }

    /// Whether a decision is old enough to be checked against live health
    pub fn needs_revalidation(&self, decision: &RoutingDecision) -> bool {
        decision.age() > self.config.revalidate_after
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let base = self.entries.stats();
        let (stores, invalidations, rejected) = self.stats.load();
        CacheStats {
            entries: self.entries.len(),
            hits: base.hits,
            misses: base.misses,
            stores,
            invalidations,
            evictions: base.evictions,
            rejected,
            hit_rate: CacheStats::compute_hit_rate(base.hits, base.misses),
        }
    }

    /// Start the periodic sweep
    pub fn start_cleanup_task(&self) {
        let mut task = self.cleanup_task.lock();
        if task.is_some() {
            return;
        }

        let entries = Arc::clone(&self.entries);
        let cleanup_interval = self.config.cleanup_interval;
        info!("Starting routing cache cleanup every {:?}", cleanup_interval);

        *task = Some(tokio::spawn(async move {
            let start = tokio::time::Instant::now() + cleanup_interval;
            let mut interval = tokio::time::interval_at(start, cleanup_interval);
            loop {
                interval.tick().await;
                let removed = entries.cleanup();
                if removed > 0 {
                    debug!("Routing cache cleanup removed {} entries", removed);
                }
            }
        }));
    }

    /// Stop the periodic sweep
    pub fn shutdown(&self) {
        if let Some(task) = self.cleanup_task.lock().take() {
            task.abort();
        }
    }
}

impl Drop for RoutingCache {
    fn drop(&mut self) {
        if let Some(task) = self.cleanup_task.get_mut().take() {
            task.abort();
        }
    }
}
