//! Health monitor implementation
//!
//! One scheduler task fills a bounded probe queue every `check_interval`;
//! a fixed set of workers drains it. A scheduled cycle holds the cycle lock
//! until its probes are recorded, so it never overlaps `probe_all`.
//! Dispatch outcomes are folded in synchronously through
//! [`HealthMonitor::record_outcome`].

use super::checker::run_probe;
use super::provider::ProviderHealth;
use super::types::{HealthCheckResult, HealthStatus};
use crate::core::providers::{ProviderRegistry, Transport};
use crate::utils::sync::{BoundedQueue, ConcurrentMap, Mutex, SyncError};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// How long an idle worker waits on the queue before checking again
const WORKER_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Health monitor configuration
#[derive(Debug, Clone, PartialEq)]
pub struct HealthMonitorConfig {
    /// Interval between scheduled probe cycles
    pub check_interval: Duration,
    /// Timeout for an individual probe
    pub probe_timeout: Duration,
    /// Response time at or above which a provider counts as degraded
    pub degraded_threshold: Duration,
    /// Added to the success rate on every success
    pub success_reward: f64,
    /// Taken from the success rate on every failure
    pub failure_penalty: f64,
    /// Weight of the newest sample in the latency average
    pub latency_smoothing: f64,
    /// Number of probe workers
    pub probe_workers: usize,
    /// Capacity of the probe queue
    pub queue_capacity: usize,
    /// Whether `start` launches the background scheduler
    pub auto_check_enabled: bool,
}

impl Default for HealthMonitorConfig {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_secs(30),
            probe_timeout: Duration::from_secs(5),
            degraded_threshold: Duration::from_millis(2000),
            success_reward: 0.01,
            failure_penalty: 0.05,
            latency_smoothing: 0.2,
            probe_workers: 2,
            queue_capacity: 64,
            auto_check_enabled: true,
        }
    }
}

/// Health monitor for tracking provider health
pub struct HealthMonitor {
    pub(crate) config: HealthMonitorConfig,
    pub(crate) registry: Arc<ProviderRegistry>,
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) provider_health: Arc<ConcurrentMap<String, ProviderHealth>>,
    pub(crate) probe_queue: Arc<BoundedQueue<ProbeJob>>,
    /// Held for the duration of a probe cycle
    pub(crate) cycle_lock: Arc<Mutex<()>>,
    check_tasks: parking_lot::Mutex<Vec<JoinHandle<()>>>,
}

impl std::fmt::Debug for HealthMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthMonitor")
            .field("config", &self.config)
            .field("tracked_providers", &self.provider_health.len())
            .field("queued_probes", &self.probe_queue.len())
            .finish()
    }
}

impl HealthMonitor {
    /// Create a new health monitor
    pub fn new(
        config: HealthMonitorConfig,
        registry: Arc<ProviderRegistry>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let probe_queue = Arc::new(BoundedQueue::new(config.queue_capacity.max(1)));
        Self {
            config,
            registry,
            transport,
            provider_health: Arc::new(ConcurrentMap::new()),
            probe_queue,
            cycle_lock: Arc::new(Mutex::new(())),
            check_tasks: parking_lot::Mutex::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &HealthMonitorConfig {
        &self.config
    }

    /// Make sure a provider has a health record
    pub fn register(&self, provider_id: &str) {
        self.provider_health.update(
            provider_id.to_string(),
            || ProviderHealth::new(provider_id),
            |_| (),
        );
    }

    /// Fold one dispatch or probe outcome into a provider's health
    ///
    /// Returns the status after the update.
    pub fn record_outcome(&self, provider_id: &str, result: HealthCheckResult) -> HealthStatus {
        apply_outcome(&self.provider_health, &self.config, provider_id, &result)
    }

    /// Launch the scheduler and probe workers
    pub fn start(&self) {
        if !self.config.auto_check_enabled {
            info!("Automatic health checks disabled");
            return;
        }

        let mut tasks = self.check_tasks.lock();
        if !tasks.is_empty() {
            debug!("Health monitor already running");
            return;
        }

        info!(
            "Starting health monitor: interval {:?}, {} probe workers",
            self.config.check_interval, self.config.probe_workers
        );

        tasks.push(self.spawn_scheduler());
        for worker in 0..self.config.probe_workers.max(1) {
            tasks.push(self.spawn_worker(worker));
        }
    }

    /// Whether background tasks are running
    pub fn is_running(&self) -> bool {
        !self.check_tasks.lock().is_empty()
    }

    /// Stop the scheduler and probe workers
    pub fn shutdown(&self) {
        info!("Shutting down health monitoring");

        let tasks: Vec<_> = self.check_tasks.lock().drain(..).collect();
        for task in tasks {
            task.abort();
        }

        info!("Health monitoring shutdown complete");
    }

    fn spawn_scheduler(&self) -> JoinHandle<()> {
        let registry = Arc::clone(&self.registry);
        let queue = Arc::clone(&self.probe_queue);
        let cycle_lock = Arc::clone(&self.cycle_lock);
        let check_interval = self.config.check_interval;
        let probe_timeout = self.config.probe_timeout;
        let workers = self.config.probe_workers.max(1);

        tokio::spawn(async move {
            // Startup probing is done by the caller through `probe_all`
            let start = tokio::time::Instant::now() + check_interval;
            let mut interval = tokio::time::interval_at(start, check_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;

                let _cycle = match cycle_lock.lock_timeout(probe_timeout).await {
                    Ok(guard) => guard,
                    Err(_) => {
                        debug!("Probe cycle still running, skipping scheduled cycle");
                        continue;
                    }
                };

                let mut pending = Vec::new();
                let mut dropped = 0usize;
                for provider in registry.list_active() {
                    let (done, finished) = oneshot::channel();
                    let job = ProbeJob {
                        provider_id: provider.id.clone(),
                        done,
                    };
                    if queue.enqueue(job) {
                        pending.push(finished);
                    } else {
                        dropped += 1;
                    }
                }
                if dropped > 0 {
                    warn!("Probe queue full, dropped {} probe jobs", dropped);
                }

                // The cycle lock stays held until every queued probe is recorded
                let rounds = u32::try_from(pending.len().div_ceil(workers))
                    .unwrap_or(u32::MAX)
                    .saturating_add(1);
                let budget = probe_timeout.saturating_mul(rounds);
                if tokio::time::timeout(budget, join_all(pending)).await.is_err() {
                    warn!("Scheduled probe cycle did not finish within {:?}", budget);
                }
            }
        })
    }

    fn spawn_worker(&self, worker: usize) -> JoinHandle<()> {
        let registry = Arc::clone(&self.registry);
        let transport = Arc::clone(&self.transport);
        let queue = Arc::clone(&self.probe_queue);
        let provider_health = Arc::clone(&self.provider_health);
        let config = self.config.clone();

        tokio::spawn(async move {
            loop {
                let job = match queue.dequeue_blocking(WORKER_POLL_INTERVAL).await {
                    Ok(job) => job,
                    Err(SyncError::TimedOut(_)) => continue,
                    Err(SyncError::Closed) => break,
                };

                let Some(provider) = registry.get(&job.provider_id) else {
                    continue;
                };

                debug!("Worker {} probing provider {}", worker, job.provider_id);
                let result = run_probe(transport.as_ref(), provider, config.probe_timeout).await;
                apply_outcome(&provider_health, &config, &job.provider_id, &result);
                // The scheduler may have given up on this cycle already
                let _ = job.done.send(());
            }
        })
    }
}

/// Queued probe of one provider
pub(crate) struct ProbeJob {
    provider_id: String,
    /// Fired once the outcome is recorded
    done: oneshot::Sender<()>,
}

/// Fold `result` into the provider's record and log status changes
fn apply_outcome(
    provider_health: &ConcurrentMap<String, ProviderHealth>,
    config: &HealthMonitorConfig,
    provider_id: &str,
    result: &HealthCheckResult,
) -> HealthStatus {
    let (previous, current) = provider_health.update(
        provider_id.to_string(),
        || ProviderHealth::new(provider_id),
        |health| {
            let previous = health.record(result, config);
            (previous, health.status)
        },
    );

    if previous != current {
        if current == HealthStatus::Down {
            warn!("Provider {} is now {} (was {})", provider_id, current, previous);
        } else {
            info!("Provider {} is now {} (was {})", provider_id, current, previous);
        }
    }

    current
}

impl Drop for HealthMonitor {
    fn drop(&mut self) {
        for task in self.check_tasks.get_mut().drain(..) {
            task.abort();
        }
    }
}
