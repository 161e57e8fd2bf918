//! Router tests module


use crate::core::cache_manager::{CacheConfig, RoutingCache};
use crate::core::health::{HealthCheckResult, HealthMonitor, HealthMonitorConfig};
use crate::core::providers::{
    CompletionResponse, MockTransport, Provider, ProviderRegistry, TokenUsage, Transport,
};
use crate::core::router::{Orchestrator, RouterConfig};
use std::sync::Arc;
use std::time::Duration;

/// Provider serving gpt-4
pub(crate) fn provider(id: &str, cost_per_token: f64, priority: u32) -> Provider {
    Provider::new(id, id.to_uppercase())
        .with_models(["gpt-4"])
        .with_cost_per_token(cost_per_token)
        .with_priority(priority)
}

/// Scenario pair: A is pricier but preferred, B is cheaper
pub(crate) fn provider_pair() -> Vec<Provider> {
    vec![provider("a", 0.00003, 1), provider("b", 0.00002, 2)]
}

pub(crate) fn completion(content: &str, tokens: u32) -> CompletionResponse {
    CompletionResponse {
        content: content.to_string(),
        token_usage: TokenUsage::new(tokens / 2, tokens - tokens / 2),
    }
}

/// Transport mock that answers every call
pub(crate) fn answering_transport() -> MockTransport {
    let mut transport = MockTransport::new();
    transport
        .expect_invoke()
        .returning(|provider, _| Ok(completion(&format!("from {}", provider.id), 100)));
    transport
}

pub(crate) fn build_orchestrator(
    providers: Vec<Provider>,
    transport: Arc<dyn Transport>,
    config: RouterConfig,
) -> Arc<Orchestrator> {
    Arc::new(new_orchestrator(providers, transport, config))
}

pub(crate) fn new_orchestrator(
    providers: Vec<Provider>,
    transport: Arc<dyn Transport>,
    config: RouterConfig,
) -> Orchestrator {
    let registry = Arc::new(ProviderRegistry::new(providers).unwrap());
    let health = Arc::new(HealthMonitor::new(
        HealthMonitorConfig::default(),
        Arc::clone(&registry),
        Arc::clone(&transport),
    ));
    let cache = Arc::new(RoutingCache::new(CacheConfig::default()));
    Orchestrator::new(config, registry, health, cache, transport)
}

/// Drive a provider to `down` (two failures from unknown)
pub(crate) fn mark_down(orchestrator: &Orchestrator, provider_id: &str) {
    for _ in 0..2 {
        orchestrator.health().record_outcome(
            provider_id,
            HealthCheckResult::failure("unreachable", Duration::from_millis(5)),
        );
    }
    assert!(orchestrator.health().is_down(provider_id));
}
