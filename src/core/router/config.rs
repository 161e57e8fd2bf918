//! Router configuration types

use std::time::Duration;

/// Relative weight of each scoring dimension
///
/// Weights need not sum to one; only their ratios matter for ranking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub cost: f64,
    pub latency: f64,
    pub quality: f64,
    pub priority: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            cost: 0.30,
            latency: 0.40,
            quality: 0.20,
            priority: 0.10,
        }
    }
}

/// Router configuration
///
/// ## Defaults
///
/// - `weights`: cost 0.30, latency 0.40, quality 0.20, priority 0.10
/// - `default_expected_tokens`: 1000
/// - `max_concurrent_routes`: 256
/// - `admission_timeout`: 5s
/// - `pool_acquire_timeout`: 1s
#[derive(Debug, Clone, PartialEq)]
pub struct RouterConfig {
    /// Scoring weights for the default scorer
    pub weights: ScoringWeights,

    /// Token estimate used when the request gives none (default: 1000)
    pub default_expected_tokens: u32,

    /// Routes allowed in flight at once (default: 256)
    pub max_concurrent_routes: usize,

    /// How long a route waits for admission (default: 5s)
    pub admission_timeout: Duration,

    /// How long a dispatch waits for a pooled connection (default: 1s)
    pub pool_acquire_timeout: Duration,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            default_expected_tokens: 1000,
            max_concurrent_routes: 256,
            admission_timeout: Duration::from_secs(5),
            pool_acquire_timeout: Duration::from_secs(1),
        }
    }
}
