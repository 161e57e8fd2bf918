//! Collaborator that actually reaches a provider

use super::error::ProviderError;
use super::types::{CompletionRequest, CompletionResponse, Provider};
use async_trait::async_trait;

/// Upstream transport
///
/// Implementations own every network concern; the orchestrator only sees
/// a response or a [`ProviderError`]. Timeouts are enforced by the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a completion request to `provider`
    async fn invoke(
        &self,
        provider: &Provider,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError>;

    /// Lightweight reachability check, a one-token completion by default
    async fn probe(&self, provider: &Provider) -> Result<(), ProviderError> {
        let request = CompletionRequest::probe(provider);
        self.invoke(provider, &request).await.map(|_| ())
    }
}
