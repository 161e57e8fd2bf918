//! Provider records and completion payloads

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Static description of one upstream provider
///
/// Owned by the registry and never mutated; live health is tracked in a
/// separate side-table keyed by `id`.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,
    pub name: String,
    pub supported_models: BTreeSet<String>,
    pub cost_per_token: f64,
    pub max_tokens: u32,
    /// Lower is preferred
    pub priority: u32,
    pub fallback_order: u32,
    pub is_active: bool,
    /// Per-dispatch timeout in milliseconds
    pub timeout_ms: u64,
    /// Size of the dispatch connection pool
    pub max_concurrent: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

impl Provider {
    /// Create an active provider with no models and neutral limits
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            supported_models: BTreeSet::new(),
            cost_per_token: 0.0,
            max_tokens: 4096,
            priority: 1,
            fallback_order: 0,
            is_active: true,
            timeout_ms: 30_000,
            max_concurrent: 16,
            api_base: None,
            api_key: None,
        }
    }

    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_models = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cost_per_token(mut self, cost: f64) -> Self {
        self.cost_per_token = cost;
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_fallback_order(mut self, order: u32) -> Self {
        self.fallback_order = order;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Check if the provider serves a model
    pub fn supports_model(&self, model: &str) -> bool {
        self.supported_models.contains(model)
    }

    /// Dispatch timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Estimated cost of `tokens` tokens
    pub fn estimate_cost(&self, tokens: u32) -> f64 {
        f64::from(tokens) * self.cost_per_token
    }
}

// Hand-written so the API key never reaches a log line
impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("supported_models", &self.supported_models)
            .field("cost_per_token", &self.cost_per_token)
            .field("max_tokens", &self.max_tokens)
            .field("priority", &self.priority)
            .field("fallback_order", &self.fallback_order)
            .field("is_active", &self.is_active)
            .field("timeout_ms", &self.timeout_ms)
            .field("max_concurrent", &self.max_concurrent)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Request handed to the transport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Smallest request that exercises a provider end to end
    pub fn probe(provider: &Provider) -> Self {
        let model = provider
            .supported_models
            .iter()
            .next()
            .cloned()
            .unwrap_or_default();
        Self {
            model,
            prompt: "ping".to_string(),
            max_tokens: 1,
            temperature: None,
        }
    }
}

/// Token accounting reported by the transport
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl TokenUsage {
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens.saturating_add(completion_tokens),
        }
    }
}

/// Transport reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResponse {
    pub content: String,
    pub token_usage: TokenUsage,
}

/// Lease on one upstream connection slot
///
/// Connections live in the provider's resource pool and are reused across
/// dispatches; `id` lets logs tie a dispatch to the slot it ran on.
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: Uuid,
    pub provider_id: String,
}

impl Connection {
    pub fn new(provider_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider_id: provider_id.into(),
        }
    }
}
