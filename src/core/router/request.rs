//! Inbound routing request

use serde::{Deserialize, Serialize};

/// How much the caller cares about latency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

impl Urgency {
    /// Multiplier applied to the latency score
    pub fn factor(self) -> f64 {
        match self {
            Urgency::Low => 0.5,
            Urgency::Medium => 1.0,
            Urgency::High => 2.0,
        }
    }
}

/// Requested quality tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    #[default]
    Standard,
    Premium,
}

impl QualityTier {
    /// Multiplier applied to the quality score
    pub fn factor(self) -> f64 {
        match self {
            QualityTier::Standard => 1.0,
            QualityTier::Premium => 2.0,
        }
    }
}

/// One inbound routing call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub user_id: String,
    pub model: String,
    pub prompt: String,
    #[serde(default)]
    pub expected_tokens: Option<u32>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub quality: QualityTier,
    #[serde(default)]
    pub temperature: Option<f32>,
}

impl RouteRequest {
    pub fn new(
        user_id: impl Into<String>,
        model: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            model: model.into(),
            prompt: prompt.into(),
            expected_tokens: None,
            budget: None,
            urgency: Urgency::default(),
            quality: QualityTier::default(),
            temperature: None,
        }
    }

    pub fn with_expected_tokens(mut self, tokens: u32) -> Self {
        self.expected_tokens = Some(tokens);
        self
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = urgency;
        self
    }

    pub fn with_quality(mut self, quality: QualityTier) -> Self {
        self.quality = quality;
        self
    }

    /// Check the request before any routing work
    pub fn validate(&self) -> Result<(), String> {
        if self.user_id.trim().is_empty() {
            return Err("userId cannot be empty".to_string());
        }
        if self.model.trim().is_empty() {
            return Err("model cannot be empty".to_string());
        }
        if self.expected_tokens == Some(0) {
            return Err("expectedTokens must be greater than 0".to_string());
        }
        if let Some(budget) = self.budget {
            if !budget.is_finite() || budget < 0.0 {
                return Err("budget must be a non-negative number".to_string());
            }
        }
        if let Some(temperature) = self.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                return Err("temperature must be between 0.0 and 2.0".to_string());
            }
        }
        Ok(())
    }
}
