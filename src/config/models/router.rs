//! Router configuration

use crate::core::router::{RouterConfig as RuntimeRouterConfig, ScoringWeights};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Router configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouterConfig {
    /// Scoring weights
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default = "default_expected_tokens")]
    pub default_expected_tokens: u32,
    #[serde(default = "default_max_concurrent_routes")]
    pub max_concurrent_routes: usize,
    #[serde(default = "default_admission_timeout_ms")]
    pub admission_timeout_ms: u64,
    /// Dispatch timeout for providers without their own
    #[serde(default = "default_dispatch_timeout_ms")]
    pub dispatch_timeout_ms: u64,
    #[serde(default = "default_pool_acquire_timeout_ms")]
    pub pool_acquire_timeout_ms: u64,
}

fn default_expected_tokens() -> u32 {
    1000
}

fn default_max_concurrent_routes() -> usize {
    256
}

fn default_admission_timeout_ms() -> u64 {
    5_000
}

fn default_dispatch_timeout_ms() -> u64 {
    30_000
}

fn default_pool_acquire_timeout_ms() -> u64 {
    1_000
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            default_expected_tokens: default_expected_tokens(),
            max_concurrent_routes: default_max_concurrent_routes(),
            admission_timeout_ms: default_admission_timeout_ms(),
            dispatch_timeout_ms: default_dispatch_timeout_ms(),
            pool_acquire_timeout_ms: default_pool_acquire_timeout_ms(),
        }
    }
}

impl RouterConfig {
    pub fn dispatch_timeout(&self) -> Duration {
        Duration::from_millis(self.dispatch_timeout_ms)
    }

    /// Settings used by the orchestrator
    pub fn to_runtime(&self) -> RuntimeRouterConfig {
        RuntimeRouterConfig {
            weights: self.weights.to_weights(),
            default_expected_tokens: self.default_expected_tokens,
            max_concurrent_routes: self.max_concurrent_routes,
            admission_timeout: Duration::from_millis(self.admission_timeout_ms),
            pool_acquire_timeout: Duration::from_millis(self.pool_acquire_timeout_ms),
        }
    }
}

/// Scoring weights
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WeightsConfig {
    #[serde(default = "default_cost_weight")]
    pub cost: f64,
    #[serde(default = "default_latency_weight")]
    pub latency: f64,
    #[serde(default = "default_quality_weight")]
    pub quality: f64,
    #[serde(default = "default_priority_weight")]
    pub priority: f64,
}

fn default_cost_weight() -> f64 {
    0.30
}

fn default_latency_weight() -> f64 {
    0.40
}

fn default_quality_weight() -> f64 {
    0.20
}

fn default_priority_weight() -> f64 {
    0.10
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            cost: default_cost_weight(),
            latency: default_latency_weight(),
            quality: default_quality_weight(),
            priority: default_priority_weight(),
        }
    }
}

impl WeightsConfig {
    pub fn to_weights(&self) -> ScoringWeights {
        ScoringWeights {
            cost: self.cost,
            latency: self.latency,
            quality: self.quality,
            priority: self.priority,
        }
    }
}
