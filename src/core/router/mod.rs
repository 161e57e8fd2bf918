//! Provider orchestration
//!
//! Picks the best provider for a request, dispatches it and walks the
//! fallback chain when a provider fails.
//!
//! ## Module Structure
//!
//! - `config` - Router configuration and scoring weights
//! - `error` - Routing errors
//! - `request` - Inbound request and its constraints
//! - `selection` - Provider scoring and ranking
//! - `fallback` - Route results
//! - `metrics` - Shared router counters
//! - `router` - Orchestrator struct and lifecycle
//! - `execute_impl` - Route execution, dispatch and fallback

pub mod config;
pub mod error;
pub mod execute_impl;
pub mod fallback;
pub mod metrics;
pub mod request;
pub mod router;
pub mod selection;

#[cfg(test)]
mod tests;

pub use config::{RouterConfig, ScoringWeights};
pub use error::RouterError;
pub use fallback::RouteResult;
pub use metrics::{RouterMetrics, RouterMetricsSnapshot};
pub use request::{QualityTier, RouteRequest, Urgency};
pub use router::{Orchestrator, PoolUsage};
pub use selection::{
    ProviderScorer, ScoredProvider, ScoringContext, WeightedScorer, rank_candidates,
};
