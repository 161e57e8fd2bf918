//! Health monitoring configuration

use super::*;
use crate::core::health::HealthMonitorConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Health monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthConfig {
    /// Run scheduled probes
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    #[serde(default = "default_degraded_threshold_ms")]
    pub degraded_threshold_ms: u64,
    /// Success rate gained per success
    #[serde(default = "default_success_reward")]
    pub success_reward: f64,
    /// Success rate lost per failure
    #[serde(default = "default_failure_penalty")]
    pub failure_penalty: f64,
    #[serde(default = "default_latency_smoothing")]
    pub latency_smoothing: f64,
    #[serde(default = "default_probe_workers")]
    pub probe_workers: usize,
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_check_interval_secs() -> u64 {
    30
}

fn default_probe_timeout_ms() -> u64 {
    5_000
}

fn default_degraded_threshold_ms() -> u64 {
    2_000
}

fn default_success_reward() -> f64 {
    0.01
}

fn default_failure_penalty() -> f64 {
    0.05
}

fn default_latency_smoothing() -> f64 {
    0.2
}

fn default_probe_workers() -> usize {
    2
}

fn default_queue_capacity() -> usize {
    64
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_interval_secs: default_check_interval_secs(),
            probe_timeout_ms: default_probe_timeout_ms(),
            degraded_threshold_ms: default_degraded_threshold_ms(),
            success_reward: default_success_reward(),
            failure_penalty: default_failure_penalty(),
            latency_smoothing: default_latency_smoothing(),
            probe_workers: default_probe_workers(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl HealthConfig {
    pub fn to_monitor_config(&self) -> HealthMonitorConfig {
        HealthMonitorConfig {
            check_interval: Duration::from_secs(self.check_interval_secs),
            probe_timeout: Duration::from_millis(self.probe_timeout_ms),
            degraded_threshold: Duration::from_millis(self.degraded_threshold_ms),
            success_reward: self.success_reward,
            failure_penalty: self.failure_penalty,
            latency_smoothing: self.latency_smoothing,
            probe_workers: self.probe_workers,
            queue_capacity: self.queue_capacity,
            auto_check_enabled: self.enabled,
        }
    }
}
