//! Configuration loading and gateway wiring tests

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use provider_orchestrator::config::{Config, Validate};
    use provider_orchestrator::core::router::RouteRequest;
    use provider_orchestrator::{Gateway, GatewayError};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONFIG: &str = r#"
server:
  port: 9001

providers:
  - id: "primary"
    models: ["gpt-4"]
    cost_per_token: 0.00003
    priority: 1
    simulation: { min_latency_ms: 1, max_latency_ms: 2, failure_rate: 0.0 }
  - id: "backup"
    models: ["gpt-4", "gpt-3.5-turbo"]
    cost_per_token: 0.00001
    priority: 2
    simulation: { min_latency_ms: 1, max_latency_ms: 2, failure_rate: 0.0 }

router:
  weights: { cost: 0.0, latency: 0.0, quality: 0.0, priority: 1.0 }

health:
  enabled: false
"#;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_loaded_config_drives_routing() {
        let file = write_config(CONFIG);
        let config = assert_ok!(Config::from_file(file.path()).await);
        assert_eq!(config.providers().len(), 2);

        let gateway = assert_ok!(Gateway::new(config));
        gateway.start_background_services().await;
        assert!(!gateway.health().is_running());

        // Priority is the only weight, so the primary wins
        let result = assert_ok!(
            gateway
                .orchestrator()
                .route(RouteRequest::new("user-1", "gpt-4", "Hi"))
                .await
        );
        assert_eq!(result.provider_id, "primary");

        // Only the backup serves this model
        let result = assert_ok!(
            gateway
                .orchestrator()
                .route(RouteRequest::new("user-1", "gpt-3.5-turbo", "Hi"))
                .await
        );
        assert_eq!(result.provider_id, "backup");

        gateway.shutdown();
    }

    #[test]
    fn test_env_overrides_layer_on_file() {
        let mut config = Config::from_yaml_str(CONFIG).unwrap();
        config
            .gateway
            .apply_overrides_from(|name| match name {
                "ORCHESTRATOR_WEIGHT_COST" => Some("0.5".to_string()),
                "ORCHESTRATOR_PROBE_TIMEOUT_MS" => Some("250".to_string()),
                "PROVIDER_BACKUP_API_KEY" => Some("sk-backup".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.router().weights.cost, 0.5);
        assert_eq!(config.router().weights.priority, 1.0);
        assert_eq!(config.health().probe_timeout_ms, 250);
        assert_eq!(config.providers()[1].api_key.as_deref(), Some("sk-backup"));
        assert_eq!(config.providers()[0].api_key, None);
        assert!(config.gateway.validate().is_ok());
    }

    #[tokio::test]
    async fn test_invalid_weights_rejected() {
        let file = write_config(
            r#"
providers:
  - id: "p"
    models: ["gpt-4"]
router:
  weights: { cost: 0.0, latency: 0.0, quality: 0.0, priority: 0.0 }
"#,
        );

        match Config::from_file(file.path()).await {
            Err(GatewayError::Config(message)) => assert!(message.contains("weight")),
            other => panic!("expected config error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_yaml_rejected() {
        let file = write_config("providers: [ { id: ");
        let result = Config::from_file(file.path()).await;
        assert!(matches!(result, Err(GatewayError::Config(_))));
    }
}
