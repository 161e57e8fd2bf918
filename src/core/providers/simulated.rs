//! In-process transport with random latency and failures
//!
//! Used by the gateway binary and the benchmarks. Never touches the network.

use super::error::ProviderError;
use super::transport::Transport;
use super::types::{CompletionRequest, CompletionResponse, Provider, TokenUsage};
use async_trait::async_trait;
use rand::Rng;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Behaviour of one simulated provider
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationProfile {
    pub min_latency: Duration,
    pub max_latency: Duration,
    /// Probability in `[0, 1]` that a call fails
    pub failure_rate: f64,
}

impl Default for SimulationProfile {
    fn default() -> Self {
        Self {
            min_latency: Duration::from_millis(50),
            max_latency: Duration::from_millis(150),
            failure_rate: 0.05,
        }
    }
}

impl SimulationProfile {
    pub fn new(min_latency: Duration, max_latency: Duration, failure_rate: f64) -> Self {
        Self {
            min_latency,
            max_latency: max_latency.max(min_latency),
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }

    /// Instant, always-successful provider
    pub fn reliable() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO, 0.0)
    }
}

/// Transport that fakes upstream calls
#[derive(Debug, Clone, Default)]
pub struct SimulatedTransport {
    default_profile: SimulationProfile,
    profiles: HashMap<String, SimulationProfile>,
}

impl SimulatedTransport {
    pub fn new(default_profile: SimulationProfile) -> Self {
        Self {
            default_profile,
            profiles: HashMap::new(),
        }
    }

    /// Override the profile of one provider
    pub fn with_profile(mut self, provider_id: impl Into<String>, profile: SimulationProfile) -> Self {
        self.profiles.insert(provider_id.into(), profile);
        self
    }

    fn profile_for(&self, provider_id: &str) -> &SimulationProfile {
        self.profiles
            .get(provider_id)
            .unwrap_or(&self.default_profile)
    }
}

/// Rough token estimate, four characters per token
fn estimate_tokens(text: &str) -> u32 {
    u32::try_from(text.chars().count().div_ceil(4)).unwrap_or(u32::MAX)
}

#[async_trait]
impl Transport for SimulatedTransport {
    async fn invoke(
        &self,
        provider: &Provider,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, ProviderError> {
        let profile = self.profile_for(&provider.id);

        // ThreadRng is not Send; draw everything before suspending
        let (delay, fails) = {
            let mut rng = rand::thread_rng();
            let min = profile.min_latency.as_millis() as u64;
            let max = profile.max_latency.as_millis() as u64;
            let delay = if max > min {
                Duration::from_millis(rng.gen_range(min..=max))
            } else {
                profile.min_latency
            };
            (delay, rng.gen_bool(profile.failure_rate.clamp(0.0, 1.0)))
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        if fails {
            debug!("Simulated failure for provider {}", provider.id);
            return Err(ProviderError::transport(
                &provider.id,
                "Simulated upstream failure",
            ));
        }

        let prompt_tokens = estimate_tokens(&request.prompt);
        let completion_tokens = request.max_tokens.min(256);
        Ok(CompletionResponse {
            content: format!(
                "[{}] simulated {} completion ({} prompt tokens)",
                provider.name, request.model, prompt_tokens
            ),
            token_usage: TokenUsage::new(prompt_tokens, completion_tokens),
        })
    }
}
