//! Configuration management for the orchestrator
//!
//! Configuration comes from a YAML file, with `ORCHESTRATOR_*` environment
//! variables layered on top. Provider API keys are only read from the
//! environment or the file, and are never written back out.

mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the orchestrator
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from a YAML file, apply environment overrides and validate
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_yaml_str(&content)?;
        config.gateway.apply_env_overrides()?;
        config.validate()?;

        debug!(
            providers = config.gateway.providers.len(),
            "Configuration loaded successfully"
        );
        Ok(config)
    }

    /// Parse configuration without touching the environment or validating
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let gateway: GatewayConfig = serde_yaml::from_str(content)
            .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(Self { gateway })
    }

    /// Load the file named by `ORCHESTRATOR_CONFIG`, after reading a `.env` file if present
    pub async fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {:?}", path);
        }

        let path = std::env::var("ORCHESTRATOR_CONFIG")
            .unwrap_or_else(|_| "config/gateway.yaml".to_string());
        Self::from_file(path).await
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get the provider catalog
    pub fn providers(&self) -> &[ProviderConfig] {
        &self.gateway.providers
    }

    /// Get router settings
    pub fn router(&self) -> &RouterConfig {
        &self.gateway.router
    }

    pub fn health(&self) -> &HealthConfig {
        &self.gateway.health
    }

    pub fn cache(&self) -> &CacheConfig {
        &self.gateway.cache
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");
        self.gateway.validate().map_err(GatewayError::Config)
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.gateway)
            .map_err(|e| GatewayError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
