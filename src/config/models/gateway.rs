//! Main gateway configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct GatewayConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Provider catalog
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
    /// Routing configuration
    #[serde(default)]
    pub router: RouterConfig,
    /// Health monitoring configuration
    #[serde(default)]
    pub health: HealthConfig,
    /// Routing cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
}
