//! Route execution
//!
//! Admission, cache consultation, scoring and the dispatch walk.

use super::error::RouterError;
use super::fallback::RouteResult;
use super::request::RouteRequest;
use super::router::Orchestrator;
use super::selection::{ScoringContext, rank_candidates};
use crate::core::cache_manager::{RequestFingerprint, RoutingDecision};
use crate::core::health::HealthCheckResult;
use crate::core::providers::{CompletionRequest, Connection, Provider, ProviderError};
use crate::utils::sync::{Pooled, SyncError};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::SemaphorePermit;
use tracing::{debug, error, warn};

/// Candidates for one route, best first
struct CandidateChain<'a> {
    providers: Vec<&'a Provider>,
    cache_hit: bool,
}

impl Orchestrator {
    /// Route a request to the best available provider
    pub async fn route(&self, request: RouteRequest) -> Result<RouteResult, RouterError> {
        self.metrics.total_requests.increment();

        let result = self.route_admitted(&request).await;
        match &result {
            Ok(route) => {
                self.metrics.successful_requests.increment();
                debug!(
                    "Routed {} to {} in {:.1}ms (attempts: {}, fallback: {})",
                    request.model,
                    route.provider_id,
                    route.response_time_ms,
                    route.attempts,
                    route.fallback_used
                );
            }
            Err(_) => {
                self.metrics.failed_requests.increment();
            }
        }
        result
    }

    /// Route on a separate task and stop waiting after `deadline`
    ///
    /// On `CallerTimeout` the route keeps running and still reports its
    /// outcome to the health monitor and the cache.
    pub async fn route_with_deadline(
        self: &Arc<Self>,
        request: RouteRequest,
        deadline: Duration,
    ) -> Result<RouteResult, RouterError> {
        let orchestrator = Arc::clone(self);
        let task = tokio::spawn(async move { orchestrator.route(request).await });

        match tokio::time::timeout(deadline, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(RouterError::TaskFailed(join_error.to_string())),
            Err(_) => {
                warn!("Caller gave up after {:?}, route continues in background", deadline);
                Err(RouterError::CallerTimeout(deadline))
            }
        }
    }

    async fn route_admitted(&self, request: &RouteRequest) -> Result<RouteResult, RouterError> {
        request.validate().map_err(RouterError::InvalidRequest)?;
        let _permit = self.admit().await?;

        let expected_tokens = request
            .expected_tokens
            .unwrap_or(self.config.default_expected_tokens);
        let fingerprint = RequestFingerprint::new(
            &request.user_id,
            &request.model,
            &request.prompt,
            expected_tokens,
        );

        let chain = match self.cached_chain(&fingerprint, &request.model, expected_tokens) {
            Some(chain) => chain,
            None => self.scored_chain(request, expected_tokens)?,
        };

        self.dispatch(request, expected_tokens, fingerprint, chain)
            .await
    }

    async fn admit(&self) -> Result<SemaphorePermit<'_>, RouterError> {
        self.admission
            .acquire_timeout(self.config.admission_timeout)
            .await
            .map_err(|error| match error {
                SyncError::TimedOut(waited) => RouterError::Overloaded(waited),
                SyncError::Closed => RouterError::ShuttingDown,
            })
    }

    fn is_eligible(provider: &Provider, model: &str, expected_tokens: u32) -> bool {
        provider.is_active && provider.supports_model(model) && provider.max_tokens >= expected_tokens
    }

    /// Candidate chain from a trusted cached decision
    fn cached_chain(
        &self,
        fingerprint: &RequestFingerprint,
        model: &str,
        expected_tokens: u32,
    ) -> Option<CandidateChain<'_>> {
        let decision = self.cache.lookup(fingerprint)?;

        if self.cache.needs_revalidation(&decision) && self.health.is_down(&decision.selected_provider_id) {
            debug!(
                "Cached decision for {} points at down provider {}, re-scoring",
                fingerprint, decision.selected_provider_id
            );
            self.cache.invalidate(fingerprint);
            return None;
        }

        let providers: Vec<&Provider> = decision
            .chain()
            .filter_map(|id| self.registry.get(id))
            .filter(|provider| Self::is_eligible(provider, model, expected_tokens))
            .collect();

        if providers.is_empty() {
            self.cache.invalidate(fingerprint);
            return None;
        }

        self.metrics.cache_hits.increment();
        Some(CandidateChain {
            providers,
            cache_hit: true,
        })
    }

    /// Candidate chain from a fresh scoring run
    fn scored_chain(
        &self,
        request: &RouteRequest,
        expected_tokens: u32,
    ) -> Result<CandidateChain<'_>, RouterError> {
        let candidates: Vec<&Provider> = self
            .registry
            .supporting(&request.model)
            .into_iter()
            .filter(|provider| provider.max_tokens >= expected_tokens)
            .collect();

        if candidates.is_empty() {
            warn!("No provider serves model {}", request.model);
            return Err(RouterError::NoProviderAvailable(request.model.clone()));
        }

        self.metrics.scoring_runs.increment();
        let context = ScoringContext::new(request, expected_tokens, &candidates);
        let ranked = rank_candidates(self.scorer.as_ref(), &candidates, &context, |id| {
            self.health.health_of(id)
        });

        for (rank, scored) in ranked.iter().enumerate() {
            debug!(
                "Candidate #{} for {}: {} (score {:.4})",
                rank + 1,
                request.model,
                scored.provider.id,
                scored.score
            );
        }

        Ok(CandidateChain {
            providers: ranked.into_iter().map(|scored| scored.provider).collect(),
            cache_hit: false,
        })
    }

    async fn lease(&self, provider: &Provider) -> Result<Pooled<Connection>, ProviderError> {
        let Some(pool) = self.pools.get(&provider.id) else {
            return Err(ProviderError::unavailable(&provider.id, "No connection pool"));
        };

        pool.acquire_blocking(self.config.pool_acquire_timeout)
            .await
            .map_err(|_| ProviderError::saturated(&provider.id))
    }

    /// Walk the chain until one provider answers
    async fn dispatch(
        &self,
        request: &RouteRequest,
        expected_tokens: u32,
        fingerprint: RequestFingerprint,
        chain: CandidateChain<'_>,
    ) -> Result<RouteResult, RouterError> {
        let completion_request = CompletionRequest {
            model: request.model.clone(),
            prompt: request.prompt.clone(),
            max_tokens: expected_tokens,
            temperature: request.temperature,
        };
        let mut attempts = 0u32;

        for (index, provider) in chain.providers.iter().enumerate() {
            if self.health.blocks_dispatch(&provider.id) {
                debug!("Skipping down provider {}", provider.id);
                continue;
            }

            let connection = match self.lease(provider).await {
                Ok(connection) => connection,
                Err(error) => {
                    warn!("Skipping provider {}: {}", provider.id, error);
                    continue;
                }
            };

            attempts += 1;
            self.metrics.dispatch_attempts.increment();
            debug!(
                "Dispatching {} to {} on connection {}",
                request.model, provider.id, connection.id
            );

            let started = Instant::now();
            let outcome = match tokio::time::timeout(
                provider.timeout(),
                self.transport.invoke(provider, &completion_request),
            )
            .await
            {
                Ok(outcome) => outcome,
                Err(_) => Err(ProviderError::timeout(&provider.id, provider.timeout())),
            };
            let elapsed = started.elapsed();
            drop(connection);

            match outcome {
                Ok(response) => {
                    self.health
                        .record_outcome(&provider.id, HealthCheckResult::success(elapsed));

                    let fallback_used = index > 0;
                    if fallback_used {
                        self.metrics.fallbacks.increment();
                    }
                    // A cached chain whose head answered is still accurate
                    if !chain.cache_hit || fallback_used {
                        self.remember(fingerprint, provider, &chain.providers[index + 1..], expected_tokens);
                    }

                    let tokens = response.token_usage.total_tokens;
                    return Ok(RouteResult {
                        provider_id: provider.id.clone(),
                        provider_name: provider.name.clone(),
                        content: response.content,
                        tokens,
                        cost: f64::from(tokens) * provider.cost_per_token,
                        response_time_ms: elapsed.as_secs_f64() * 1000.0,
                        fallback_used,
                        attempts,
                        cache_hit: chain.cache_hit,
                    });
                }
                Err(error) => {
                    warn!("Provider {} failed, trying next candidate: {}", provider.id, error);
                    if error.is_health_failure() {
                        self.health.record_outcome(
                            &provider.id,
                            HealthCheckResult::failure(error.to_string(), elapsed),
                        );
                    }
                }
            }
        }

        error!(
            "All providers unavailable for model {} after {} attempts",
            request.model, attempts
        );
        Err(RouterError::AllProvidersUnavailable {
            model: request.model.clone(),
            attempts,
        })
    }

    fn remember(
        &self,
        fingerprint: RequestFingerprint,
        winner: &Provider,
        remaining: &[&Provider],
        expected_tokens: u32,
    ) {
        let decision = RoutingDecision::new(
            winner.id.as_str(),
            winner.estimate_cost(expected_tokens),
            self.health.health_of(&winner.id).response_time_ms,
            remaining.iter().map(|p| p.id.clone()).collect(),
        );
        self.cache.store_default(fingerprint, decision);
    }
}
