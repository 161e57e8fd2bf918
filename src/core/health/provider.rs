//! Provider health tracking

use super::monitor::HealthMonitorConfig;
use super::types::{HealthCheckResult, HealthStatus};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Provider health information
///
/// `success_rate` and `error_rate` are tracked separately and both stay in
/// `[0, 1]`; they are not required to sum to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderHealth {
    pub provider_id: String,
    pub status: HealthStatus,
    /// Exponential moving average of successful response times
    pub response_time_ms: f64,
    pub success_rate: f64,
    pub error_rate: f64,
    pub last_checked: Option<chrono::DateTime<chrono::Utc>>,
    pub consecutive_failures: u32,
    pub total_checks: u64,
    /// Reason for the current status
    pub message: String,
    #[serde(skip)]
    latency_samples: u64,
}

impl ProviderHealth {
    /// Neutral record for a provider nobody has heard from yet
    pub fn new(provider_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            status: HealthStatus::Unknown,
            response_time_ms: 0.0,
            success_rate: 1.0,
            error_rate: 0.0,
            last_checked: None,
            consecutive_failures: 0,
            total_checks: 0,
            message: "No health data yet".to_string(),
            latency_samples: 0,
        }
    }

    /// Fold one outcome into the record, returning the previous status
    pub fn record(&mut self, result: &HealthCheckResult, config: &HealthMonitorConfig) -> HealthStatus {
        let previous = self.status;
        let reward = config.success_reward;
        let penalty = config.failure_penalty;

        if result.success {
            self.success_rate = (self.success_rate + reward).min(1.0);
            self.error_rate = (self.error_rate - reward).max(0.0);
            self.consecutive_failures = 0;

            // Failed calls end at arbitrary points, so only successes feed latency
            self.response_time_ms = if self.latency_samples > 0 {
                config.latency_smoothing * result.response_time_ms
                    + (1.0 - config.latency_smoothing) * self.response_time_ms
            } else {
                result.response_time_ms
            };
            self.latency_samples += 1;
        } else {
            self.success_rate = (self.success_rate - penalty).max(0.0);
            self.error_rate = (self.error_rate + penalty).min(1.0);
            self.consecutive_failures = self.consecutive_failures.saturating_add(1);
        }

        let target = result.target_status(config.degraded_threshold);
        self.status = previous.step_toward(target);
        self.total_checks += 1;
        self.last_checked = Some(result.timestamp);
        self.message = match (&result.error, target) {
            (Some(error), _) => error.clone(),
            (None, HealthStatus::Degraded) => {
                format!("High latency: {:.0}ms", result.response_time_ms)
            }
            (None, _) => format!("Responded in {:.0}ms", result.response_time_ms),
        };

        previous
    }

    /// Check if provider should be considered available for routing
    pub fn is_available(&self) -> bool {
        self.status.allows_requests()
    }

    /// Whether nothing has been heard from the provider for `quiet_for`
    pub fn is_stale(&self, quiet_for: Duration) -> bool {
        self.last_checked.is_some_and(|checked| {
            (chrono::Utc::now() - checked)
                .to_std()
                .is_ok_and(|age| age >= quiet_for)
        })
    }
}
