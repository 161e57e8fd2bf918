//! Core functionality for the orchestrator
//!
//! - `providers`: provider catalog and the transport seam
//! - `health`: health monitor and background probing
//! - `cache_manager`: routing decision cache
//! - `router`: scoring, dispatch and fallback

pub mod cache_manager;
pub mod health;
pub mod providers;
pub mod router;


use crate::config::{Config, Validate};
use crate::core::cache_manager::RoutingCache;
use crate::core::health::{HealthMonitor, HealthStatus};
use crate::core::providers::{ProviderRegistry, SimulatedTransport, SimulationProfile, Transport};
use crate::core::router::Orchestrator;
use crate::utils::error::{GatewayError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Main Gateway struct that wires the orchestrator components together
#[derive(Clone)]
pub struct Gateway {
    config: Arc<Config>,
    registry: Arc<ProviderRegistry>,
    health: Arc<HealthMonitor>,
    cache: Arc<RoutingCache>,
    orchestrator: Arc<Orchestrator>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("providers", &self.registry.len())
            .field("orchestrator", &self.orchestrator)
            .finish()
    }
}

impl Gateway {
    /// Create a gateway whose providers are served by the simulated transport
    pub fn new(config: Config) -> Result<Self> {
        let transport = config.providers().iter().fold(
            SimulatedTransport::new(SimulationProfile::default()),
            |transport, provider| match &provider.simulation {
                Some(simulation) => transport.with_profile(&provider.id, simulation.to_profile()),
                None => transport,
            },
        );
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a gateway on top of an arbitrary transport
    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Result<Self> {
        info!("Initializing Gateway");
        config.gateway.validate().map_err(GatewayError::Config)?;

        let dispatch_timeout = config.router().dispatch_timeout();
        let providers = config
            .providers()
            .iter()
            .map(|provider| provider.to_provider(dispatch_timeout))
            .collect();
        let registry = Arc::new(ProviderRegistry::new(providers)?);
        debug!("Registered {} providers", registry.len());

        let health = Arc::new(HealthMonitor::new(
            config.health().to_monitor_config(),
            Arc::clone(&registry),
            Arc::clone(&transport),
        ));
        let cache = Arc::new(RoutingCache::new(config.cache().to_cache_config()));
        let orchestrator = Arc::new(Orchestrator::new(
            config.router().to_runtime(),
            Arc::clone(&registry),
            Arc::clone(&health),
            Arc::clone(&cache),
            transport,
        ));

        info!("Gateway initialized successfully");

        Ok(Self {
            config: Arc::new(config),
            registry,
            health,
            cache,
            orchestrator,
        })
    }

    /// Start background services, then serve HTTP until stopped
    pub async fn run(self) -> Result<()> {
        info!("Starting Gateway server");
        self.start_background_services().await;

        let result = crate::server::server::HttpServer::new(self.clone()).start().await;
        self.shutdown();
        result
    }

    /// Seed health entries, run one probe cycle and start the background loops
    pub async fn start_background_services(&self) {
        debug!("Starting background services");

        for provider in self.registry.all() {
            self.health.register(&provider.id);
        }

        let probed = self.health.probe_all().await;
        info!("Initial health check probed {} providers", probed);

        self.health.start();
        self.cache.start_cleanup_task();

        debug!("Background services started");
    }

    pub fn config(&self) -> &Config {
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

    pub fn orchestrator(&self) -> &Arc<Orchestrator> {
        &self.orchestrator
    }

    /// Graceful shutdown
    pub fn shutdown(&self) {
        info!("Shutting down Gateway");
        self.orchestrator.shutdown();
        info!("Gateway shutdown completed");
    }

    /// Aggregate health of the gateway and every active provider
    pub fn health_check(&self) -> GatewayHealth {
        let components: HashMap<String, ComponentHealth> = self
            .registry
            .list_active()
            .into_iter()
            .map(|provider| {
                let health = self.health.health_of(&provider.id);
                (
                    provider.id.clone(),
                    ComponentHealth {
                        status: health.status,
                        message: Some(health.message),
                    },
                )
            })
            .collect();

        let available = components
            .values()
            .filter(|component| component.status.allows_requests())
            .count();

        let status = if self.orchestrator.is_shutting_down() || available == 0 {
            "unhealthy"
        } else if available < components.len() {
            "degraded"
        } else {
            "healthy"
        };

        GatewayHealth {
            status: status.to_string(),
            timestamp: chrono::Utc::now(),
            components,
        }
    }
}

/// Gateway health response
#[derive(Debug, Clone, serde::Serialize)]
pub struct GatewayHealth {
    /// `healthy`, `degraded` or `unhealthy`
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    /// Health of each active provider, keyed by id
    pub components: HashMap<String, ComponentHealth>,
}

/// Component health status
#[derive(Debug, Clone, serde::Serialize)]
pub struct ComponentHealth {
    pub status: HealthStatus,
    pub message: Option<String>,
}
