//! Health checking methods
//!
//! Probe execution plus the read side of the monitor.

use super::monitor::HealthMonitor;
use super::provider::ProviderHealth;
use super::types::{HealthCheckResult, HealthStatus};
use crate::core::providers::{Provider, Transport};
use futures::future::join_all;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

impl HealthMonitor {
    /// Get health status for a provider
    pub fn get_status(&self, provider_id: &str) -> Option<ProviderHealth> {
        self.provider_health.get(&provider_id.to_string())
    }

    /// Health of a provider, neutral if nothing is known yet
    pub fn health_of(&self, provider_id: &str) -> ProviderHealth {
        self.get_status(provider_id)
            .unwrap_or_else(|| ProviderHealth::new(provider_id))
    }

    /// Get health status for all tracked providers
    pub fn snapshot(&self) -> HashMap<String, ProviderHealth> {
        self.provider_health.snapshot().into_iter().collect()
    }

    /// Whether the provider is known to be down
    pub fn is_down(&self, provider_id: &str) -> bool {
        self.get_status(provider_id)
            .is_some_and(|health| health.status == HealthStatus::Down)
    }

    /// Whether dispatch should pass over the provider
    ///
    /// A down provider is let through again once its record is older than
    /// `check_interval`, so the next dispatch doubles as a probe.
    pub fn blocks_dispatch(&self, provider_id: &str) -> bool {
        self.get_status(provider_id).is_some_and(|health| {
            health.status == HealthStatus::Down && !health.is_stale(self.config.check_interval)
        })
    }

    /// Probe every active provider now
    ///
    /// Returns how many providers were probed. Skipped (returns 0) when
    /// another cycle holds the cycle lock past the probe timeout.
    pub async fn probe_all(&self) -> usize {
        let _cycle = match self.cycle_lock.lock_timeout(self.config.probe_timeout).await {
            Ok(guard) => guard,
            Err(error) => {
                warn!("Skipping probe cycle: {}", error);
                return 0;
            }
        };

        let providers = self.registry.list_active();
        let timeout = self.config.probe_timeout;
        let transport = self.transport.as_ref();

        let results = join_all(providers.iter().map(|provider| async move {
            let result = run_probe(transport, provider, timeout).await;
            (provider.id.as_str(), result)
        }))
        .await;

        let probed = results.len();
        for (provider_id, result) in results {
            self.record_outcome(provider_id, result);
        }

        info!("Probe cycle complete: {} providers", probed);
        probed
    }
}

/// Probe one provider, bounded by `timeout`
pub(crate) async fn run_probe(
    transport: &dyn Transport,
    provider: &Provider,
    timeout: Duration,
) -> HealthCheckResult {
    let start_time = Instant::now();

    match tokio::time::timeout(timeout, transport.probe(provider)).await {
        Ok(Ok(())) => {
            let elapsed = start_time.elapsed();
            debug!("Probe of {} succeeded in {:?}", provider.id, elapsed);
            HealthCheckResult::success(elapsed)
        }
        Ok(Err(error)) => HealthCheckResult::failure(error.to_string(), start_time.elapsed()),
        Err(_) => HealthCheckResult::failure("Health check timeout", start_time.elapsed()),
    }
}
