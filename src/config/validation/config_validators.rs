//! Core configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use std::collections::HashSet;
use tracing::debug;

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating gateway configuration");

        self.server.validate()?;

        if self.providers.is_empty() {
            return Err("At least one provider must be configured".to_string());
        }

        let mut provider_ids = HashSet::new();
        for provider in &self.providers {
            if !provider_ids.insert(&provider.id) {
                return Err(format!("Duplicate provider id: {}", provider.id));
            }
            provider.validate()?;
        }

        self.router.validate()?;
        self.health.validate()?;
        self.cache.validate()?;

        debug!("Gateway configuration validation completed");
        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err("Worker count must be greater than 0".to_string());
            }
            if workers > 1000 {
                return Err("Worker count seems too high (>1000)".to_string());
            }
        }

        if self.timeout == 0 {
            return Err("Server timeout must be greater than 0".to_string());
        }

        if self.request_deadline_ms == 0 {
            return Err("Request deadline must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for ProviderConfig {
    fn validate(&self) -> Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("Provider id cannot be empty".to_string());
        }

        if self.models.is_empty() {
            return Err(format!("Provider {} must serve at least one model", self.id));
        }

        if !self.cost_per_token.is_finite() || self.cost_per_token < 0.0 {
            return Err(format!(
                "Provider {} cost per token must be a non-negative number",
                self.id
            ));
        }

        if self.max_tokens == 0 {
            return Err(format!("Provider {} max tokens must be greater than 0", self.id));
        }

        if self.max_concurrent == 0 {
            return Err(format!(
                "Provider {} max concurrent must be greater than 0",
                self.id
            ));
        }

        if self.timeout_ms == Some(0) {
            return Err(format!("Provider {} timeout must be greater than 0", self.id));
        }

        if let Some(simulation) = &self.simulation {
            simulation
                .validate()
                .map_err(|e| format!("Provider {}: {}", self.id, e))?;
        }

        Ok(())
    }
}

impl Validate for SimulationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_latency_ms < self.min_latency_ms {
            return Err("Simulated max latency must not be below min latency".to_string());
        }

        if !(0.0..=1.0).contains(&self.failure_rate) {
            return Err("Simulated failure rate must be between 0.0 and 1.0".to_string());
        }

        Ok(())
    }
}
