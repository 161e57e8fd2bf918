//! Health monitor integration tests

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{Harness, provider, provider_pair, request};
    use crate::common::transport::{ScriptedTransport, Step};
    use provider_orchestrator::core::health::{HealthMonitorConfig, HealthStatus};
    use provider_orchestrator::core::router::{RouterConfig, RouterError};
    use std::time::Duration;

    fn fast_config() -> HealthMonitorConfig {
        HealthMonitorConfig {
            check_interval: Duration::from_millis(40),
            probe_timeout: Duration::from_millis(100),
            degraded_threshold: Duration::from_millis(30),
            probe_workers: 1,
            ..Default::default()
        }
    }

    fn harness(transport: ScriptedTransport) -> Harness {
        Harness::with_config(provider_pair(), transport, RouterConfig::default(), fast_config())
    }

    #[tokio::test]
    async fn test_failed_probes_walk_down_then_recover() {
        let transport = ScriptedTransport::new().script(
            "a",
            [
                Step::Fail("refused".into()),
                Step::Fail("refused".into()),
                Step::Answer,
                Step::Answer,
            ],
        );
        let harness = harness(transport);
        let health = harness.health();

        assert_eq!(health.probe_all().await, 2);
        assert_eq!(health.get_status("a").unwrap().status, HealthStatus::Degraded);
        assert_eq!(health.get_status("b").unwrap().status, HealthStatus::Operational);

        health.probe_all().await;
        let a = health.health_of("a");
        assert_eq!(a.status, HealthStatus::Down);
        assert_eq!(a.consecutive_failures, 2);
        assert_eq!(a.message, "Transport error for a: refused");

        health.probe_all().await;
        assert_eq!(health.health_of("a").status, HealthStatus::Degraded);
        health.probe_all().await;
        let a = health.health_of("a");
        assert_eq!(a.status, HealthStatus::Operational);
        assert_eq!(a.consecutive_failures, 0);
        assert_eq!(a.total_checks, 4);
    }

    #[tokio::test]
    async fn test_slow_probe_degrades() {
        let transport = ScriptedTransport::new().script("a", [Step::Delay(Duration::from_millis(40))]);
        let harness = harness(transport);

        harness.health().probe_all().await;

        let a = harness.health().health_of("a");
        assert_eq!(a.status, HealthStatus::Degraded);
        assert!(a.message.starts_with("High latency"));
        assert!(a.response_time_ms >= 40.0);
    }

    #[tokio::test]
    async fn test_hanging_probe_times_out() {
        let transport = ScriptedTransport::new().script("b", [Step::Hang]);
        let harness = harness(transport);

        harness.health().probe_all().await;

        let b = harness.health().health_of("b");
        assert_eq!(b.status, HealthStatus::Degraded);
        assert_eq!(b.message, "Health check timeout");
    }

    #[tokio::test]
    async fn test_probe_outcomes_shape_routing() {
        let transport = ScriptedTransport::new().script(
            "b",
            [Step::Fail("refused".into()), Step::Fail("refused".into())],
        );
        // Long interval: the down record must stay fresh for the whole test
        let config = HealthMonitorConfig {
            check_interval: Duration::from_secs(30),
            ..fast_config()
        };
        let harness =
            Harness::with_config(provider_pair(), transport, RouterConfig::default(), config);

        harness.health().probe_all().await;
        harness.health().probe_all().await;
        assert!(harness.health().is_down("b"));

        let result = harness.orchestrator.route(request("user-1")).await.unwrap();
        assert_eq!(result.provider_id, "a");
        // Two probes each for a and b, then one dispatch to a
        assert_eq!(harness.transport.calls_to("b"), 2);
        assert_eq!(harness.transport.calls_to("a"), 3);
    }

    #[tokio::test]
    async fn test_background_probing_runs_until_shutdown() {
        let harness = harness(ScriptedTransport::new());
        let health = harness.health();

        health.start();
        assert!(health.is_running());
        tokio::time::sleep(Duration::from_millis(200)).await;

        let probed = health.health_of("a").total_checks;
        assert!(probed >= 1, "expected scheduled probes, got {}", probed);

        health.shutdown();
        assert!(!health.is_running());

        tokio::time::sleep(Duration::from_millis(50)).await;
        let settled = harness.transport.calls().len();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(harness.transport.calls().len(), settled);
    }

    #[tokio::test]
    async fn test_down_provider_recovers_without_background_checks() {
        let config = HealthMonitorConfig {
            auto_check_enabled: false,
            check_interval: Duration::from_millis(50),
            ..fast_config()
        };
        let harness = Harness::with_config(
            vec![provider("a", 0.00002, 1)],
            ScriptedTransport::new(),
            RouterConfig::default(),
            config,
        );
        harness.health().start();
        assert!(!harness.health().is_running());
        harness.mark_down("a");

        // Fresh down record: the provider is passed over
        let error = harness.orchestrator.route(request("user-1")).await.unwrap_err();
        assert!(matches!(
            error,
            RouterError::AllProvidersUnavailable { attempts: 0, .. }
        ));
        assert_eq!(harness.transport.calls_to("a"), 0);

        // Once the record is older than the check interval a dispatch is let through
        tokio::time::sleep(Duration::from_millis(80)).await;
        let result = harness.orchestrator.route(request("user-1")).await.unwrap();
        assert_eq!(result.provider_id, "a");
        assert_eq!(harness.health().health_of("a").status, HealthStatus::Degraded);

        harness.orchestrator.route(request("user-2")).await.unwrap();
        assert_eq!(harness.health().health_of("a").status, HealthStatus::Operational);
        assert_eq!(harness.transport.calls_to("a"), 2);
    }

    #[tokio::test]
    async fn test_rates_stay_in_bounds() {
        let transport = ScriptedTransport::new().always_failing("a");
        let harness = harness(transport);

        let mut previous = 1.0;
        for _ in 0..30 {
            harness.health().probe_all().await;
            let a = harness.health().health_of("a");
            assert!(a.success_rate <= previous);
            assert!((0.0..=1.0).contains(&a.success_rate));
            assert!((0.0..=1.0).contains(&a.error_rate));
            previous = a.success_rate;
        }
        assert_eq!(previous, 0.0);
    }
}
