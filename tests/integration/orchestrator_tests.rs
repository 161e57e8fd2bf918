//! Orchestrator integration tests
//!
//! Routing, fallback, caching and admission over the scripted transport.

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{Harness, provider, provider_pair, request};
    use crate::common::transport::{ScriptedTransport, Step};
    use crate::{assert_err, assert_ok};
    use provider_orchestrator::core::health::{HealthMonitorConfig, HealthStatus};
    use provider_orchestrator::core::router::{RouterConfig, RouterError, ScoringWeights};
    use std::collections::HashSet;
    use std::time::Duration;

    #[tokio::test]
    async fn test_route_picks_best_scored_provider() {
        let harness = Harness::new(provider_pair(), ScriptedTransport::new());

        let result = assert_ok!(harness.orchestrator.route(request("user-1")).await);

        assert_eq!(result.provider_id, "b");
        assert_eq!(result.provider_name, "B");
        assert!(!result.fallback_used);
        assert_eq!(result.attempts, 1);
        assert_eq!(result.tokens, 100);
        assert!((result.cost - 100.0 * 0.00002).abs() < 1e-12);
        assert_eq!(harness.transport.calls(), vec!["b".to_string()]);
    }

    #[tokio::test]
    async fn test_priority_weight_changes_winner() {
        let config = RouterConfig {
            weights: ScoringWeights {
                cost: 0.1,
                latency: 0.1,
                quality: 0.1,
                priority: 0.7,
            },
            ..Default::default()
        };
        let harness = Harness::with_config(
            provider_pair(),
            ScriptedTransport::new(),
            config,
            HealthMonitorConfig::default(),
        );

        let result = assert_ok!(harness.orchestrator.route(request("user-1")).await);
        assert_eq!(result.provider_id, "a");
    }

    #[tokio::test]
    async fn test_transport_failure_falls_back_and_penalizes() {
        let transport = ScriptedTransport::new().script("b", [Step::Fail("reset".into())]);
        let harness = Harness::new(provider_pair(), transport);

        let result = assert_ok!(harness.orchestrator.route(request("user-1")).await);

        assert_eq!(result.provider_id, "a");
        assert!(result.fallback_used);
        assert_eq!(result.attempts, 2);
        assert_eq!(harness.transport.calls(), vec!["b".to_string(), "a".to_string()]);

        let b = harness.health().health_of("b");
        assert_eq!(b.status, HealthStatus::Degraded);
        assert_eq!(b.consecutive_failures, 1);
        assert!(b.success_rate < 1.0);

        let a = harness.health().health_of("a");
        assert_eq!(a.status, HealthStatus::Operational);
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let providers = vec![
            provider("a", 0.00003, 1),
            provider("b", 0.00002, 2).with_timeout(Duration::from_millis(50)),
        ];
        let transport = ScriptedTransport::new().script("b", [Step::Hang]);
        let harness = Harness::new(providers, transport);

        let result = assert_ok!(harness.orchestrator.route(request("user-1")).await);

        assert_eq!(result.provider_id, "a");
        assert!(result.fallback_used);
        let b = harness.health().health_of("b");
        assert_eq!(b.consecutive_failures, 1);
        assert!(b.message.contains("Timeout"));
    }

    #[tokio::test]
    async fn test_down_provider_is_skipped_without_a_call() {
        let harness = Harness::new(provider_pair(), ScriptedTransport::new());
        harness.mark_down("b");

        let result = assert_ok!(harness.orchestrator.route(request("user-1")).await);

        assert_eq!(result.provider_id, "a");
        assert!(result.fallback_used);
        assert_eq!(result.attempts, 1);
        assert_eq!(harness.transport.calls_to("b"), 0);
    }

    #[tokio::test]
    async fn test_all_down_reports_exhaustion_without_dispatch() {
        let harness = Harness::new(provider_pair(), ScriptedTransport::new());
        harness.mark_down("a");
        harness.mark_down("b");

        let error = assert_err!(harness.orchestrator.route(request("user-1")).await);

        assert_eq!(
            error,
            RouterError::AllProvidersUnavailable {
                model: "gpt-4".to_string(),
                attempts: 0,
            }
        );
        assert!(harness.transport.calls().is_empty());
        assert_eq!(harness.orchestrator.metrics().snapshot().failed_requests, 1);
    }

    #[tokio::test]
    async fn test_every_provider_failing_exhausts_chain() {
        let transport = ScriptedTransport::new()
            .always_failing("a")
            .always_failing("b");
        let harness = Harness::new(provider_pair(), transport);

        let error = assert_err!(harness.orchestrator.route(request("user-1")).await);

        assert!(matches!(
            error,
            RouterError::AllProvidersUnavailable { attempts: 2, .. }
        ));
    }

    #[tokio::test]
    async fn test_unknown_model_has_no_provider() {
        let harness = Harness::new(provider_pair(), ScriptedTransport::new());
        let mut unknown = request("user-1");
        unknown.model = "claude-3".to_string();

        let error = assert_err!(harness.orchestrator.route(unknown).await);
        assert_eq!(error, RouterError::NoProviderAvailable("claude-3".to_string()));
    }

    #[tokio::test]
    async fn test_repeated_request_uses_cached_decision() {
        let harness = Harness::new(provider_pair(), ScriptedTransport::new());

        let first = assert_ok!(harness.orchestrator.route(request("user-1")).await);
        let second = assert_ok!(harness.orchestrator.route(request("user-1")).await);

        assert_eq!(first.provider_id, second.provider_id);
        assert!(!first.cache_hit);
        assert!(second.cache_hit);

        let metrics = harness.orchestrator.metrics().snapshot();
        assert_eq!(metrics.scoring_runs, 1);
        assert_eq!(metrics.cache_hits, 1);

        // A different user is a different fingerprint
        let other = assert_ok!(harness.orchestrator.route(request("user-2")).await);
        assert!(!other.cache_hit);
        assert_eq!(harness.orchestrator.metrics().snapshot().scoring_runs, 2);
    }

    #[tokio::test]
    async fn test_caller_deadline_leaves_route_running() {
        let transport = ScriptedTransport::new().script("b", [Step::Delay(Duration::from_millis(150))]);
        let harness = Harness::new(provider_pair(), transport);

        let error = assert_err!(
            harness
                .orchestrator
                .route_with_deadline(request("user-1"), Duration::from_millis(20))
                .await
        );
        assert_eq!(error, RouterError::CallerTimeout(Duration::from_millis(20)));

        tokio::time::sleep(Duration::from_millis(400)).await;

        let b = harness.health().health_of("b");
        assert_eq!(b.total_checks, 1);
        assert_eq!(b.status, HealthStatus::Operational);
        assert_eq!(harness.orchestrator.metrics().snapshot().successful_requests, 1);
        assert_eq!(harness.orchestrator.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_saturated_pool_skips_without_penalty() {
        let providers = vec![
            provider("a", 0.00003, 1),
            provider("b", 0.00002, 2).with_max_concurrent(1),
        ];
        let transport = ScriptedTransport::new().script("b", [Step::Delay(Duration::from_millis(150))]);
        let config = RouterConfig {
            pool_acquire_timeout: Duration::from_millis(20),
            ..Default::default()
        };
        let harness = Harness::with_config(
            providers,
            transport,
            config,
            HealthMonitorConfig::default(),
        );

        let (first, second) = tokio::join!(
            harness.orchestrator.route(request("user-1")),
            harness.orchestrator.route(request("user-2")),
        );
        let first = assert_ok!(first);
        let second = assert_ok!(second);

        let served: HashSet<_> = [first.provider_id.as_str(), second.provider_id.as_str()]
            .into_iter()
            .collect();
        assert_eq!(served, HashSet::from(["a", "b"]));
        assert_eq!(harness.transport.calls_to("b"), 1);

        let b = harness.health().health_of("b");
        assert_eq!(b.consecutive_failures, 0);
        assert_eq!(b.status, HealthStatus::Operational);
    }

    #[tokio::test]
    async fn test_admission_limit_reports_overload() {
        let transport = ScriptedTransport::new().script("b", [Step::Delay(Duration::from_millis(150))]);
        let config = RouterConfig {
            max_concurrent_routes: 1,
            admission_timeout: Duration::from_millis(20),
            ..Default::default()
        };
        let harness = Harness::with_config(
            provider_pair(),
            transport,
            config,
            HealthMonitorConfig::default(),
        );

        let (first, second) = tokio::join!(
            harness.orchestrator.route(request("user-1")),
            harness.orchestrator.route(request("user-2")),
        );

        let outcomes = [first, second];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(
            outcomes
                .iter()
                .any(|r| matches!(r, Err(RouterError::Overloaded(_))))
        );
    }

    #[tokio::test]
    async fn test_shutdown_rejects_new_routes() {
        let harness = Harness::new(provider_pair(), ScriptedTransport::new());
        harness.orchestrator.shutdown();

        let error = assert_err!(harness.orchestrator.route(request("user-1")).await);
        assert_eq!(error, RouterError::ShuttingDown);
        assert!(harness.transport.calls().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_routes_all_succeed() {
        let harness = Harness::new(provider_pair(), ScriptedTransport::new());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let orchestrator = harness.orchestrator.clone();
                tokio::spawn(async move { orchestrator.route(request(&format!("user-{}", i))).await })
            })
            .collect();

        for handle in handles {
            assert_ok!(handle.await.unwrap());
        }

        let metrics = harness.orchestrator.metrics().snapshot();
        assert_eq!(metrics.total_requests, 32);
        assert_eq!(metrics.successful_requests, 32);
        for usage in harness.orchestrator.pool_usage().values() {
            assert_eq!(usage.in_use, 0);
        }
    }
}
