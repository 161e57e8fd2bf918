//! Provider configuration

use super::*;
use crate::core::providers::{Provider, SimulationProfile};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One entry of the provider catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderConfig {
    /// Unique provider id
    pub id: String,
    /// Display name, defaults to the id
    #[serde(default)]
    pub name: Option<String>,
    /// Models this provider serves
    #[serde(default)]
    pub models: Vec<String>,
    #[serde(default)]
    pub cost_per_token: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Lower is preferred
    #[serde(default = "default_priority")]
    pub priority: u32,
    #[serde(default)]
    pub fallback_order: u32,
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Dispatch timeout, the router default when absent
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Size of the dispatch connection pool
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    #[serde(default)]
    pub api_base: Option<String>,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Behaviour under the simulated transport
    #[serde(default)]
    pub simulation: Option<SimulationConfig>,
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_priority() -> u32 {
    1
}

fn default_max_concurrent() -> usize {
    16
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: None,
            models: Vec::new(),
            cost_per_token: 0.0,
            max_tokens: default_max_tokens(),
            priority: default_priority(),
            fallback_order: 0,
            enabled: true,
            timeout_ms: None,
            max_concurrent: default_max_concurrent(),
            api_base: None,
            api_key: None,
            simulation: None,
        }
    }
}

impl ProviderConfig {
    /// Build the registry record
    pub fn to_provider(&self, default_timeout: Duration) -> Provider {
        let timeout = self
            .timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(default_timeout);

        let mut provider = Provider::new(&self.id, self.name.clone().unwrap_or_else(|| self.id.clone()))
            .with_models(self.models.iter().cloned())
            .with_cost_per_token(self.cost_per_token)
            .with_max_tokens(self.max_tokens)
            .with_priority(self.priority)
            .with_fallback_order(self.fallback_order)
            .with_timeout(timeout)
            .with_max_concurrent(self.max_concurrent);
        provider.is_active = self.enabled;
        provider.api_base = self.api_base.clone();
        provider.api_key = self.api_key.clone();
        provider
    }

    /// Environment variable holding this provider's API key
    pub fn api_key_env_var(&self) -> String {
        let normalized: String = self
            .id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_uppercase() } else { '_' })
            .collect();
        format!("PROVIDER_{}_API_KEY", normalized)
    }
}

/// Latency and failure behaviour of a simulated provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    #[serde(default = "default_min_latency_ms")]
    pub min_latency_ms: u64,
    #[serde(default = "default_max_latency_ms")]
    pub max_latency_ms: u64,
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,
}

fn default_min_latency_ms() -> u64 {
    50
}

fn default_max_latency_ms() -> u64 {
    150
}

fn default_failure_rate() -> f64 {
    0.05
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            min_latency_ms: default_min_latency_ms(),
            max_latency_ms: default_max_latency_ms(),
            failure_rate: default_failure_rate(),
        }
    }
}

impl SimulationConfig {
    pub fn to_profile(&self) -> SimulationProfile {
        SimulationProfile::new(
            Duration::from_millis(self.min_latency_ms),
            Duration::from_millis(self.max_latency_ms),
            self.failure_rate,
        )
    }
}
