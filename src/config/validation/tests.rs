//! Tests for configuration validation

#[cfg(test)]
mod tests {
    use super::super::trait_def::Validate;
    use crate::config::models::*;

    fn provider(id: &str) -> ProviderConfig {
        ProviderConfig {
            id: id.to_string(),
            models: vec!["gpt-4".to_string()],
            cost_per_token: 0.00002,
            ..Default::default()
        }
    }

    #[test]
    fn test_server_config_validation() {
        let mut config = ServerConfig::default();
        assert!(config.validate().is_ok());

        config.port = 0;
        assert!(config.validate().is_err());

        config.port = 8080;
        config.host = "".to_string();
        assert!(config.validate().is_err());

        config.host = "localhost".to_string();
        config.workers = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_provider_config_validation() {
        let mut config = provider("openai");
        assert!(config.validate().is_ok());

        config.cost_per_token = -1.0;
        assert!(config.validate().is_err());

        config.cost_per_token = 0.0;
        config.models.clear();
        assert!(config.validate().is_err());

        config.models.push("gpt-4".to_string());
        config.max_concurrent = 0;
        assert!(config.validate().is_err());

        config.max_concurrent = 4;
        config.simulation = Some(SimulationConfig {
            failure_rate: 1.5,
            ..Default::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_gateway_requires_unique_providers() {
        let mut config = GatewayConfig::default();
        assert!(config.validate().is_err());

        config.providers = vec![provider("a"), provider("b")];
        assert!(config.validate().is_ok());

        config.providers.push(provider("a"));
        let error = config.validate().unwrap_err();
        assert!(error.contains("Duplicate provider id"));
    }

    #[test]
    fn test_weights_validation() {
        assert!(WeightsConfig::default().validate().is_ok());

        let negative = WeightsConfig {
            cost: -0.1,
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let zero = WeightsConfig {
            cost: 0.0,
            latency: 0.0,
            quality: 0.0,
            priority: 0.0,
        };
        assert!(zero.validate().is_err());
    }

    #[test]
    fn test_health_penalty_must_exceed_reward() {
        let mut config = HealthConfig::default();
        assert!(config.validate().is_ok());

        config.failure_penalty = config.success_reward;
        assert!(config.validate().is_err());

        config.failure_penalty = 0.05;
        config.check_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cache_and_router_validation() {
        assert!(CacheConfig::default().validate().is_ok());
        assert!(RouterConfig::default().validate().is_ok());

        let cache = CacheConfig {
            ttl_secs: 0,
            ..Default::default()
        };
        assert!(cache.validate().is_err());

        let router = RouterConfig {
            max_concurrent_routes: 0,
            ..Default::default()
        };
        assert!(router.validate().is_err());
    }
}
