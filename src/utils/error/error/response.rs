//! HTTP response handling for errors

use super::types::GatewayError;
use crate::core::router::RouterError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl GatewayError {
    /// HTTP status and stable error code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            GatewayError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            GatewayError::Serialization(_) | GatewayError::Yaml(_) => {
                (StatusCode::BAD_REQUEST, "PARSING_ERROR")
            }
            GatewayError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
            GatewayError::Router(router_error) => match router_error {
                RouterError::NoProviderAvailable(_) => {
                    (StatusCode::NOT_FOUND, "NO_PROVIDER_AVAILABLE")
                }
                RouterError::AllProvidersUnavailable { .. } => {
                    (StatusCode::SERVICE_UNAVAILABLE, "ALL_PROVIDERS_UNAVAILABLE")
                }
                RouterError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
                RouterError::Overloaded(_) => (StatusCode::TOO_MANY_REQUESTS, "OVERLOADED"),
                RouterError::ShuttingDown => (StatusCode::SERVICE_UNAVAILABLE, "SHUTTING_DOWN"),
                RouterError::CallerTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, "CALLER_TIMEOUT"),
                RouterError::TaskFailed(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "ROUTING_TASK_FAILED")
                }
            },
            GatewayError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            GatewayError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Message safe to send to a client
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::Io(_)
            | GatewayError::Internal(_)
            | GatewayError::Router(RouterError::TaskFailed(_)) => {
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        self.status_and_code().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code) = self.status_and_code();

        let error_response = ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: error_code.to_string(),
                message: self.public_message(),
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}
