//! Routing cache configuration

use crate::core::cache_manager::CacheConfig as RoutingCacheConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Routing cache configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_revalidate_after_secs")]
    pub revalidate_after_secs: u64,
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_ttl_secs() -> u64 {
    300
}

fn default_revalidate_after_secs() -> u64 {
    60
}

fn default_cleanup_interval_secs() -> u64 {
    60
}

fn default_max_entries() -> usize {
    10_000
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
            revalidate_after_secs: default_revalidate_after_secs(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
            max_entries: default_max_entries(),
        }
    }
}

impl CacheConfig {
    pub fn to_cache_config(&self) -> RoutingCacheConfig {
        RoutingCacheConfig {
            default_ttl: Duration::from_secs(self.ttl_secs),
            revalidate_after: Duration::from_secs(self.revalidate_after_secs),
            cleanup_interval: Duration::from_secs(self.cleanup_interval_secs),
            max_entries: self.max_entries,
        }
    }
}
