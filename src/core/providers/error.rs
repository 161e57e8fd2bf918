//! Per-attempt provider errors
//!
//! These never escape a `route()` call on their own: the orchestrator
//! recovers from them by moving to the next candidate.

use std::time::Duration;

/// Failure of a single dispatch or probe
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProviderError {
    #[error("Provider {provider} is unavailable: {message}")]
    Unavailable { provider: String, message: String },

    #[error("Timeout for {provider} after {timeout:?}")]
    Timeout { provider: String, timeout: Duration },

    #[error("Transport error for {provider}: {message}")]
    Transport { provider: String, message: String },

    #[error("Connection pool for {provider} is saturated")]
    Saturated { provider: String },
}

impl ProviderError {
    /// Create unavailable error
    pub fn unavailable(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Unavailable {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create timeout error
    pub fn timeout(provider: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            provider: provider.into(),
            timeout,
        }
    }

    /// Create transport error
    pub fn transport(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Transport {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create saturated error
    pub fn saturated(provider: impl Into<String>) -> Self {
        Self::Saturated {
            provider: provider.into(),
        }
    }

    /// Provider the error belongs to
    pub fn provider(&self) -> &str {
        match self {
            Self::Unavailable { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::Transport { provider, .. }
            | Self::Saturated { provider } => provider,
        }
    }

    /// Whether the outcome counts against the provider's health
    ///
    /// Skips decided locally (known down, pool saturated) say nothing new
    /// about the upstream.
    pub fn is_health_failure(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Transport { .. })
    }
}
