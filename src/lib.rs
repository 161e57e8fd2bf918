//! # provider-orchestrator
//!
//! Routes AI completion requests across a catalog of interchangeable
//! providers. Every request is scored on cost, latency, quality and
//! priority, sent to the best provider that is not down, and retried on the
//! next candidate when that provider fails. A background health monitor
//! keeps per-provider health current, and a TTL cache remembers routing
//! decisions for repeated requests.
//!
//! ## Features
//!
//! - **Weighted scoring**: configurable cost, latency, quality and priority weights
//! - **Automatic fallback**: ordered candidate chains with per-attempt timeouts
//! - **Health monitoring**: smoothed success rates and a stepwise status ladder
//! - **Decision cache**: fingerprinted requests skip re-scoring within the TTL
//! - **Bounded concurrency**: admission control and per-provider connection pools
//!
//! ## Library usage
//!
//! ```rust,no_run
//! use provider_orchestrator::{Config, Gateway, RouteRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config)?;
//!     gateway.start_background_services().await;
//!
//!     let result = gateway
//!         .orchestrator()
//!         .route(RouteRequest::new("user-1", "gpt-4", "Hello"))
//!         .await?;
//!     println!("{} answered for ${:.6}", result.provider_id, result.cost);
//!
//!     gateway.shutdown();
//!     Ok(())
//! }
//! ```
//!
//! ## Gateway mode
//!
//! ```rust,no_run
//! use provider_orchestrator::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     Gateway::new(config)?.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::{ComponentHealth, Gateway, GatewayHealth};
pub use utils::error::{GatewayError, Result};

pub use core::cache_manager::{CacheStats, RequestFingerprint, RoutingCache, RoutingDecision};
pub use core::health::{HealthMonitor, HealthStatus, ProviderHealth};
pub use core::providers::{
    CompletionRequest, CompletionResponse, Provider, ProviderError, ProviderRegistry,
    SimulatedTransport, SimulationProfile, TokenUsage, Transport,
};
pub use core::router::{
    Orchestrator, QualityTier, RouteRequest, RouteResult, RouterError, Urgency,
};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone, serde::Serialize)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Seconds since the epoch when the crate was built
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
