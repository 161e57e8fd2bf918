//! Scripted transport
//!
//! Each provider gets a queue of steps played back one per call. Once the
//! queue is empty the provider answers normally, unless it was marked as
//! always failing.

use async_trait::async_trait;
use parking_lot::Mutex;
use provider_orchestrator::core::providers::{
    CompletionRequest, CompletionResponse, Provider, ProviderError, TokenUsage, Transport,
};
use std::collections::{HashMap, HashSet, VecDeque};
use std::time::Duration;

/// Outcome of one call
#[derive(Debug, Clone)]
pub enum Step {
    /// Answer immediately
    Answer,
    /// Fail with a transport error
    Fail(String),
    /// Answer after a delay
    Delay(Duration),
    /// Never answer; relies on the caller's timeout
    Hang,
}

#[derive(Debug, Default)]
pub struct ScriptedTransport {
    scripts: Mutex<HashMap<String, VecDeque<Step>>>,
    failing: Mutex<HashSet<String>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `steps` for `provider_id`
    pub fn script(self, provider_id: &str, steps: impl IntoIterator<Item = Step>) -> Self {
        self.scripts
            .lock()
            .entry(provider_id.to_string())
            .or_default()
            .extend(steps);
        self
    }

    /// Make every unscripted call to `provider_id` fail
    pub fn always_failing(self, provider_id: &str) -> Self {
        self.failing.lock().insert(provider_id.to_string());
        self
    }

    /// Provider ids in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    pub fn calls_to(&self, provider_id: &str) -> usize {
        self.calls.lock().iter().filter(|id| *id == provider_id).count()
    }

    fn next_step(&self, provider_id: &str) -> Step {
        let scripted = self
            .scripts
            .lock()
            .get_mut(provider_id)
            .and_then(VecDeque::pop_front);

        match scripted {
            Some(step) => step,
            None if self.failing.lock().contains(provider_id) => {
                Step::Fail("scripted outage".to_string())
            }
            None => Step::Answer,
        }
    }
}

fn answer(provider: &Provider, request: &CompletionRequest) -> CompletionResponse {
    CompletionResponse {
        content: format!("{} answered", provider.id),
        token_usage: TokenUsage::new(20, request.max_tokens.min(80)),
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn invoke(
        &self,
        provider: &Provider,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        self.calls.lock().push(provider.id.clone());

        match self.next_step(&provider.id) {
            Step::Answer => Ok(answer(provider, request)),
            Step::Fail(message) => Err(ProviderError::transport(&provider.id, message)),
            Step::Delay(delay) => {
                tokio::time::sleep(delay).await;
                Ok(answer(provider, request))
            }
            Step::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(answer(provider, request))
            }
        }
    }
}
