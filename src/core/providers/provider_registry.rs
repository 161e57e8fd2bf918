//! Provider Registry
//!
//! Read-only catalog of the configured providers

use super::types::Provider;
use crate::utils::error::{GatewayError, Result};
use std::collections::HashMap;

/// Provider Registry
///
/// Keeps configuration order, which is also the order `all()` and
/// `list_active()` report.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Provider>,
    index: HashMap<String, usize>,
}

impl ProviderRegistry {
    /// Build the registry, rejecting duplicate ids
    pub fn new(providers: Vec<Provider>) -> Result<Self> {
        let mut index = HashMap::with_capacity(providers.len());
        for (position, provider) in providers.iter().enumerate() {
            if provider.id.is_empty() {
                return Err(GatewayError::config("Provider id cannot be empty"));
            }
            if index.insert(provider.id.clone(), position).is_some() {
                return Err(GatewayError::config(format!(
                    "Duplicate provider id: {}",
                    provider.id
                )));
            }
        }
        Ok(Self { providers, index })
    }

    /// Get provider by id
    pub fn get(&self, id: &str) -> Option<&Provider> {
        self.index.get(id).map(|&position| &self.providers[position])
    }

    /// Active providers
    pub fn list_active(&self) -> Vec<&Provider> {
        self.providers.iter().filter(|p| p.is_active).collect()
    }

    /// Active providers serving `model`
    pub fn supporting(&self, model: &str) -> Vec<&Provider> {
        self.providers
            .iter()
            .filter(|p| p.is_active && p.supports_model(model))
            .collect()
    }

    /// Every registered provider, active or not
    pub fn all(&self) -> &[Provider] {
        &self.providers
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
