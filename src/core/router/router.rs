//! Orchestrator struct and lifecycle

use super::config::RouterConfig;
use super::metrics::RouterMetrics;
use super::selection::{ProviderScorer, WeightedScorer};
use crate::core::cache_manager::RoutingCache;
use crate::core::health::HealthMonitor;
use crate::core::providers::{Connection, ProviderRegistry, Transport};
use crate::utils::sync::{ResourcePool, Semaphore};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Connection pool usage of one provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolUsage {
    pub in_use: usize,
    pub idle: usize,
    pub max_size: usize,
}

/// Routes requests across providers
///
/// Holds no global lock: health lives in the monitor's concurrent map,
/// decisions in the TTL cache, counters in atomics and connections in one
/// pool per provider.
pub struct Orchestrator {
    pub(crate) config: RouterConfig,
    pub(crate) registry: Arc<ProviderRegistry>,
    pub(crate) health: Arc<HealthMonitor>,
    pub(crate) cache: Arc<RoutingCache>,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) scorer: Arc<dyn ProviderScorer>,
    pub(crate) pools: HashMap<String, ResourcePool<Connection>>,
    pub(crate) admission: Semaphore,
    pub(crate) metrics: RouterMetrics,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .field("providers", &self.registry.len())
            .field("available_permits", &self.admission.available_permits())
            .finish()
    }
}

impl Orchestrator {
    /// Create an orchestrator using the weighted scorer from `config`
    pub fn new(
        config: RouterConfig,
        registry: Arc<ProviderRegistry>,
        health: Arc<HealthMonitor>,
        cache: Arc<RoutingCache>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let pools = registry
            .all()
            .iter()
            .map(|provider| {
                let provider_id = provider.id.clone();
                let pool = ResourcePool::new(provider.max_concurrent.max(1), move || {
                    Connection::new(provider_id.as_str())
                });
                (provider.id.clone(), pool)
            })
            .collect();

        info!(
            "Orchestrator ready: {} providers, {} concurrent routes",
            registry.len(),
            config.max_concurrent_routes
        );

        Self {
            scorer: Arc::new(WeightedScorer::new(config.weights)),
            admission: Semaphore::new(config.max_concurrent_routes.max(1)),
            config,
            registry,
            health,
            cache,
            transport,
            pools,
            metrics: RouterMetrics::default(),
        }
    }

    /// Replace the scorer
    pub fn with_scorer(mut self, scorer: Arc<dyn ProviderScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<ProviderRegistry> {
        &self.registry
    }

    pub fn health(&self) -> &Arc<HealthMonitor> {
        &self.health
    }

    pub fn cache(&self) -> &Arc<RoutingCache> {
        &self.cache
    }

    pub fn metrics(&self) -> &RouterMetrics {
        &self.metrics
    }

    /// Connection pool usage per provider
    pub fn pool_usage(&self) -> HashMap<String, PoolUsage> {
        self.pools
            .iter()
            .map(|(id, pool)| {
                (
                    id.clone(),
                    PoolUsage {
                        in_use: pool.in_use(),
                        idle: pool.idle(),
                        max_size: pool.max_size(),
                    },
                )
            })
            .collect()
    }

    /// Whether `shutdown` has run
    pub fn is_shutting_down(&self) -> bool {
        self.admission.is_drained()
    }

    /// Refuse new routes and stop background work
    ///
    /// Routes already admitted run to completion.
    pub fn shutdown(&self) {
        info!("Shutting down orchestrator");
        self.admission.drain();
        self.health.shutdown();
        self.cache.shutdown();
    }
}
