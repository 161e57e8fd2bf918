//! Provider scoring and ranking
//!
//! A score is a weighted sum of four components, each roughly in `[0, 1]`
//! before the urgency and tier multipliers:
//!
//! - cost: share of the budget left, or `cheapest / estimate` without one
//! - latency: `1000 / (1000 + response_time_ms)`, times the urgency factor
//! - quality: live success rate, times the tier factor
//! - priority: `1 / max(priority, 1)`

use super::config::ScoringWeights;
use super::request::{QualityTier, RouteRequest, Urgency};
use crate::core::health::ProviderHealth;
use crate::core::providers::Provider;
use std::cmp::Ordering;

/// Per-request inputs shared by every candidate's score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringContext {
    pub expected_tokens: u32,
    pub budget: Option<f64>,
    pub urgency: Urgency,
    pub quality: QualityTier,
    /// Lowest estimated cost across the candidate set
    pub min_estimated_cost: f64,
}

impl ScoringContext {
    pub fn new(request: &RouteRequest, expected_tokens: u32, candidates: &[&Provider]) -> Self {
        let min_estimated_cost = candidates
            .iter()
            .map(|p| p.estimate_cost(expected_tokens))
            .fold(f64::INFINITY, f64::min);

        Self {
            expected_tokens,
            budget: request.budget,
            urgency: request.urgency,
            quality: request.quality,
            min_estimated_cost: if min_estimated_cost.is_finite() {
                min_estimated_cost
            } else {
                0.0
            },
        }
    }
}

/// Scores one candidate; higher is better
pub trait ProviderScorer: Send + Sync {
    fn score(&self, provider: &Provider, health: &ProviderHealth, context: &ScoringContext) -> f64;
}

/// Default scorer, a weighted sum of cost, latency, quality and priority
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedScorer {
    weights: ScoringWeights,
}

impl WeightedScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn cost_score(provider: &Provider, context: &ScoringContext) -> f64 {
        let estimate = provider.estimate_cost(context.expected_tokens);

        match context.budget {
            Some(budget) if budget > 0.0 => ((budget - estimate) / budget).max(0.0),
            // A zero budget only admits free providers
            Some(_) => {
                if estimate <= 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            None => {
                if estimate <= 0.0 {
                    1.0
                } else {
                    context.min_estimated_cost / estimate
                }
            }
        }
    }

    pub fn latency_score(health: &ProviderHealth, context: &ScoringContext) -> f64 {
        let response_time_ms = health.response_time_ms.max(0.0);
        1000.0 / (1000.0 + response_time_ms) * context.urgency.factor()
    }

    pub fn quality_score(health: &ProviderHealth, context: &ScoringContext) -> f64 {
        health.success_rate.clamp(0.0, 1.0) * context.quality.factor()
    }

    pub fn priority_score(provider: &Provider) -> f64 {
        1.0 / f64::from(provider.priority.max(1))
    }
}

impl ProviderScorer for WeightedScorer {
    fn score(&self, provider: &Provider, health: &ProviderHealth, context: &ScoringContext) -> f64 {
        self.weights.cost * Self::cost_score(provider, context)
            + self.weights.latency * Self::latency_score(health, context)
            + self.weights.quality * Self::quality_score(health, context)
            + self.weights.priority * Self::priority_score(provider)
    }
}

/// A candidate with its score
#[derive(Debug, Clone)]
pub struct ScoredProvider<'a> {
    pub provider: &'a Provider,
    pub score: f64,
    pub estimated_cost: f64,
    pub estimated_latency_ms: f64,
}

/// Score and order candidates, best first
///
/// Ties are broken by priority, cost per token, fallback order and id, so
/// the order is fully deterministic.
pub fn rank_candidates<'a, F>(
    scorer: &dyn ProviderScorer,
    candidates: &[&'a Provider],
    context: &ScoringContext,
    health_of: F,
) -> Vec<ScoredProvider<'a>>
where
    F: Fn(&str) -> ProviderHealth,
{
    let mut scored: Vec<ScoredProvider<'a>> = candidates
        .iter()
        .map(|&provider| {
            let health = health_of(&provider.id);
            ScoredProvider {
                provider,
                score: scorer.score(provider, &health, context),
                estimated_cost: provider.estimate_cost(context.expected_tokens),
                estimated_latency_ms: health.response_time_ms,
            }
        })
        .collect();

    scored.sort_by(compare_ranked);
    scored
}

fn compare_ranked(a: &ScoredProvider<'_>, b: &ScoredProvider<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.provider.priority.cmp(&b.provider.priority))
        .then_with(|| a.provider.cost_per_token.total_cmp(&b.provider.cost_per_token))
        .then_with(|| a.provider.fallback_order.cmp(&b.provider.fallback_order))
        .then_with(|| a.provider.id.cmp(&b.provider.id))
}
