//! Router error types

use std::time::Duration;

/// Errors surfaced by `route()`
///
/// Per-provider failures are absorbed by the fallback walk; only the
/// outcome of the whole routing attempt shows up here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RouterError {
    /// No active provider serves the model
    #[error("No provider available for model: {0}")]
    NoProviderAvailable(String),

    /// Every candidate was down, saturated or failed
    #[error("All providers unavailable for model {model} after {attempts} attempts")]
    AllProvidersUnavailable { model: String, attempts: u32 },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No admission permit within the wait bound
    #[error("Router overloaded, no capacity within {0:?}")]
    Overloaded(Duration),

    #[error("Router is shutting down")]
    ShuttingDown,

    /// The caller stopped waiting; the route itself keeps running
    #[error("Request did not complete within {0:?}")]
    CallerTimeout(Duration),

    /// The routing task died before reporting back
    #[error("Routing task failed: {0}")]
    TaskFailed(String),
}
