//! Route results

use serde::Serialize;

/// Outcome of a successful route
///
/// `attempts` counts dispatches actually made; skipped candidates are not
/// included.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    pub provider_id: String,
    pub provider_name: String,
    pub content: String,
    /// Total tokens reported by the transport
    pub tokens: u32,
    /// `tokens × cost_per_token`
    pub cost: f64,
    pub response_time_ms: f64,
    /// True when the winner was not the first candidate
    pub fallback_used: bool,
    pub attempts: u32,
    /// True when the candidate chain came from the routing cache
    pub cache_hit: bool,
}
