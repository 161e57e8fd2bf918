//! Routing cache type definitions

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Cache configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Lifetime of a stored decision
    pub default_ttl: Duration,
    /// Age after which a decision is re-checked against live health
    pub revalidate_after: Duration,
    /// Interval of the background sweep
    pub cleanup_interval: Duration,
    /// Soft cap on stored decisions
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: Duration::from_secs(300),
            revalidate_after: Duration::from_secs(60),
            cleanup_interval: Duration::from_secs(60),
            max_entries: 10_000,
        }
    }
}

/// Deterministic request hash used as the cache key
///
/// SHA-256 over the user, the model, the SHA-256 of the prompt and the
/// expected token count, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestFingerprint(String);

impl RequestFingerprint {
    pub fn new(user_id: &str, model: &str, prompt: &str, expected_tokens: u32) -> Self {
        let prompt_digest = Sha256::digest(prompt.as_bytes());

        let mut hasher = Sha256::new();
        // Length prefixes keep ("ab", "c") and ("a", "bc") apart
        for field in [user_id.as_bytes(), model.as_bytes()] {
            hasher.update((field.len() as u64).to_be_bytes());
            hasher.update(field);
        }
        hasher.update(prompt_digest);
        hasher.update(expected_tokens.to_be_bytes());

        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cached scoring outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingDecision {
    pub selected_provider_id: String,
    pub estimated_cost: f64,
    pub estimated_latency_ms: f64,
    /// Fallback candidates, best first
    pub alternatives: Vec<String>,
    pub computed_at: chrono::DateTime<chrono::Utc>,
}

impl RoutingDecision {
    /// Decision computed now
    pub fn new(
        selected_provider_id: impl Into<String>,
        estimated_cost: f64,
        estimated_latency_ms: f64,
        alternatives: Vec<String>,
    ) -> Self {
        Self {
            selected_provider_id: selected_provider_id.into(),
            estimated_cost,
            estimated_latency_ms,
            alternatives,
            computed_at: chrono::Utc::now(),
        }
    }

    /// Selected provider followed by the alternatives
    pub fn chain(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.selected_provider_id.as_str())
            .chain(self.alternatives.iter().map(String::as_str))
    }

    /// Time since the decision was computed
    pub fn age(&self) -> Duration {
        (chrono::Utc::now() - self.computed_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

/// Counters kept by the routing cache itself
#[derive(Debug, Default)]
pub(crate) struct AtomicCacheStats {
    pub stores: AtomicU64,
    pub invalidations: AtomicU64,
    pub rejected: AtomicU64,
}

/// Cache statistics snapshot
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
    pub invalidations: u64,
    pub evictions: u64,
    /// Stores refused because the cache was full
    pub rejected: u64,
    pub hit_rate: f64,
}

impl CacheStats {
    /// Calculate hit rate
    pub fn compute_hit_rate(hits: u64, misses: u64) -> f64 {
        let total = hits + misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

impl AtomicCacheStats {
    pub fn load(&self) -> (u64, u64, u64) {
        (
            self.stores.load(Ordering::Relaxed),
            self.invalidations.load(Ordering::Relaxed),
            self.rejected.load(Ordering::Relaxed),
        )
    }
}
