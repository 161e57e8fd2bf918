//! Test fixtures and factories

use super::transport::ScriptedTransport;
use provider_orchestrator::core::cache_manager::{CacheConfig, RoutingCache};
use provider_orchestrator::core::health::{HealthCheckResult, HealthMonitor, HealthMonitorConfig};
use provider_orchestrator::core::providers::{Provider, ProviderRegistry, Transport};
use provider_orchestrator::core::router::{Orchestrator, RouteRequest, RouterConfig};
use std::sync::Arc;
use std::time::Duration;

/// Provider serving gpt-4
pub fn provider(id: &str, cost_per_token: f64, priority: u32) -> Provider {
    Provider::new(id, id.to_uppercase())
        .with_models(["gpt-4"])
        .with_cost_per_token(cost_per_token)
        .with_priority(priority)
}

/// A is pricier but preferred by priority, B is cheaper; B wins on default weights
pub fn provider_pair() -> Vec<Provider> {
    vec![provider("a", 0.00003, 1), provider("b", 0.00002, 2)]
}

pub fn request(user_id: &str) -> RouteRequest {
    RouteRequest::new(user_id, "gpt-4", "Summarize the quarterly report")
}

/// Orchestrator wired to a scripted transport
pub struct Harness {
    pub orchestrator: Arc<Orchestrator>,
    pub transport: Arc<ScriptedTransport>,
}

impl Harness {
    pub fn new(providers: Vec<Provider>, transport: ScriptedTransport) -> Self {
        Self::with_config(
            providers,
            transport,
            RouterConfig::default(),
            HealthMonitorConfig::default(),
        )
    }

    pub fn with_config(
        providers: Vec<Provider>,
        transport: ScriptedTransport,
        router: RouterConfig,
        health: HealthMonitorConfig,
    ) -> Self {
        let transport = Arc::new(transport);
        let dyn_transport: Arc<dyn Transport> = transport.clone();
        let registry = Arc::new(ProviderRegistry::new(providers).expect("valid catalog"));
        let health = Arc::new(HealthMonitor::new(
            health,
            Arc::clone(&registry),
            Arc::clone(&dyn_transport),
        ));
        let cache = Arc::new(RoutingCache::new(CacheConfig::default()));
        let orchestrator = Arc::new(Orchestrator::new(
            router,
            registry,
            health,
            cache,
            dyn_transport,
        ));

        Self {
            orchestrator,
            transport,
        }
    }

    pub fn health(&self) -> &HealthMonitor {
        self.orchestrator.health()
    }

    /// Drive a provider to `down` without touching the transport
    pub fn mark_down(&self, provider_id: &str) {
        for _ in 0..2 {
            self.health().record_outcome(
                provider_id,
                HealthCheckResult::failure("unreachable", Duration::from_millis(5)),
            );
        }
        assert!(self.health().is_down(provider_id));
    }
}
