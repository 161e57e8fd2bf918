//! Router, health and cache validators

use super::trait_def::Validate;
use crate::config::models::*;

impl Validate for RouterConfig {
    fn validate(&self) -> Result<(), String> {
        self.weights.validate()?;

        if self.default_expected_tokens == 0 {
            return Err("Default expected tokens must be greater than 0".to_string());
        }

        if self.max_concurrent_routes == 0 {
            return Err("Max concurrent routes must be greater than 0".to_string());
        }

        if self.admission_timeout_ms == 0 {
            return Err("Admission timeout must be greater than 0".to_string());
        }

        if self.dispatch_timeout_ms == 0 {
            return Err("Dispatch timeout must be greater than 0".to_string());
        }

        if self.pool_acquire_timeout_ms == 0 {
            return Err("Pool acquire timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for WeightsConfig {
    fn validate(&self) -> Result<(), String> {
        let weights = [self.cost, self.latency, self.quality, self.priority];

        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err("Scoring weights must be non-negative numbers".to_string());
        }

        if weights.iter().sum::<f64>() <= 0.0 {
            return Err("At least one scoring weight must be positive".to_string());
        }

        Ok(())
    }
}

impl Validate for HealthConfig {
    fn validate(&self) -> Result<(), String> {
        if self.check_interval_secs == 0 {
            return Err("Health check interval must be greater than 0".to_string());
        }

        if self.probe_timeout_ms == 0 {
            return Err("Probe timeout must be greater than 0".to_string());
        }

        if self.degraded_threshold_ms == 0 {
            return Err("Degraded threshold must be greater than 0".to_string());
        }

        if !(self.success_reward > 0.0 && self.success_reward <= 1.0) {
            return Err("Success reward must be in (0, 1]".to_string());
        }

        if !(self.failure_penalty > 0.0 && self.failure_penalty <= 1.0) {
            return Err("Failure penalty must be in (0, 1]".to_string());
        }

        if self.failure_penalty <= self.success_reward {
            return Err("Failure penalty must be greater than success reward".to_string());
        }

        if !(self.latency_smoothing > 0.0 && self.latency_smoothing <= 1.0) {
            return Err("Latency smoothing must be in (0, 1]".to_string());
        }

        if self.probe_workers == 0 {
            return Err("Probe workers must be greater than 0".to_string());
        }

        if self.queue_capacity == 0 {
            return Err("Probe queue capacity must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for CacheConfig {
    fn validate(&self) -> Result<(), String> {
        if self.ttl_secs == 0 {
            return Err("Cache TTL must be greater than 0".to_string());
        }

        if self.cleanup_interval_secs == 0 {
            return Err("Cache cleanup interval must be greater than 0".to_string());
        }

        if self.max_entries == 0 {
            return Err("Cache max entries must be greater than 0".to_string());
        }

        Ok(())
    }
}
