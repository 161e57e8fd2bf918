//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::Gateway;
use crate::core::health::HealthMonitor;
use crate::core::providers::ProviderRegistry;
use crate::core::router::Orchestrator;
use std::sync::Arc;
use std::time::Instant;

/// HTTP server state shared across handlers
///
/// Holds the same health monitor instance the orchestrator reports to, so
/// the status endpoints always reflect what routing sees.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Gateway,
    /// When the state was built, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway,
            started_at: Instant::now(),
        }
    }

    pub fn config(&self) -> &Config {
        self.gateway.config()
    }

    pub fn registry(&self) -> &ProviderRegistry {
        self.gateway.registry()
    }

    pub fn health(&self) -> &HealthMonitor {
        self.gateway.health()
    }

    pub fn orchestrator(&self) -> &Arc<Orchestrator> {
        self.gateway.orchestrator()
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
