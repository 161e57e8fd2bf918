//! Environment overrides for a loaded configuration

use super::models::*;
use crate::utils::error::{GatewayError, Result};
use std::str::FromStr;
use tracing::debug;

impl GatewayConfig {
    /// Apply `ORCHESTRATOR_*` and `PROVIDER_<ID>_API_KEY` variables from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides read through `lookup`
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("ORCHESTRATOR_HOST") {
            self.server.host = host;
        }
        override_parsed(&lookup, "ORCHESTRATOR_PORT", &mut self.server.port)?;
        if let Some(workers) = lookup("ORCHESTRATOR_WORKERS") {
            self.server.workers = Some(parse_var("ORCHESTRATOR_WORKERS", &workers)?);
        }
        override_parsed(
            &lookup,
            "ORCHESTRATOR_REQUEST_DEADLINE_MS",
            &mut self.server.request_deadline_ms,
        )?;

        override_parsed(
            &lookup,
            "ORCHESTRATOR_HEALTH_INTERVAL_SECS",
            &mut self.health.check_interval_secs,
        )?;
        override_parsed(
            &lookup,
            "ORCHESTRATOR_PROBE_TIMEOUT_MS",
            &mut self.health.probe_timeout_ms,
        )?;
        override_parsed(&lookup, "ORCHESTRATOR_CACHE_TTL_SECS", &mut self.cache.ttl_secs)?;

        let weights = &mut self.router.weights;
        override_parsed(&lookup, "ORCHESTRATOR_WEIGHT_COST", &mut weights.cost)?;
        override_parsed(&lookup, "ORCHESTRATOR_WEIGHT_LATENCY", &mut weights.latency)?;
        override_parsed(&lookup, "ORCHESTRATOR_WEIGHT_QUALITY", &mut weights.quality)?;
        override_parsed(&lookup, "ORCHESTRATOR_WEIGHT_PRIORITY", &mut weights.priority)?;

        for provider in &mut self.providers {
            let var = provider.api_key_env_var();
            if let Some(key) = lookup(&var) {
                debug!("Using API key for provider {} from {}", provider.id, var);
                provider.api_key = Some(key);
            }
        }

        Ok(())
    }
}

fn override_parsed<F, T>(lookup: &F, name: &str, target: &mut T) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if let Some(raw) = lookup(name) {
        *target = parse_var(name, &raw)?;
    }
    Ok(())
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| GatewayError::Config(format!("Invalid {}: {}", name, e)))
}
