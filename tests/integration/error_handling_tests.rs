//! Error mapping tests

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;
    use actix_web::body::MessageBody;
    use actix_web::http::StatusCode;
    use provider_orchestrator::core::providers::ProviderError;
    use provider_orchestrator::core::router::RouterError;
    use provider_orchestrator::GatewayError;
    use std::time::Duration;

    #[test]
    fn test_provider_errors_classify_health_impact() {
        assert!(ProviderError::timeout("a", Duration::from_secs(1)).is_health_failure());
        assert!(ProviderError::transport("a", "reset").is_health_failure());
        assert!(!ProviderError::saturated("a").is_health_failure());
        assert!(!ProviderError::unavailable("a", "no pool").is_health_failure());
        assert_eq!(ProviderError::saturated("a").provider(), "a");
    }

    #[test]
    fn test_router_errors_map_to_codes() {
        let error = GatewayError::from(RouterError::AllProvidersUnavailable {
            model: "gpt-4".to_string(),
            attempts: 2,
        });
        assert_eq!(
            error.status_and_code(),
            (StatusCode::SERVICE_UNAVAILABLE, "ALL_PROVIDERS_UNAVAILABLE")
        );

        let error = GatewayError::from(RouterError::Overloaded(Duration::from_millis(5)));
        assert_eq!(error.status_code(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_task_failure_details_hidden() {
        let error = GatewayError::from(RouterError::TaskFailed("panicked at secret.rs".to_string()));
        assert_eq!(error.public_message(), "An internal error occurred");

        let response = error.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = response.into_body().try_into_bytes().unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(!text.contains("secret.rs"));
        assert!(text.contains("ROUTING_TASK_FAILED"));
    }

    #[test]
    fn test_not_found_message_is_public() {
        let error = GatewayError::not_found("Provider x");
        assert_eq!(error.public_message(), "Not found: Provider x");
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
    }
}
