//! HTTP route modules
//!
//! - `routing`: `POST /route-request`
//! - `providers`: `GET /providers`, `GET /provider-status/{id}`
//! - `health`: `GET /health`, `GET /stats`

pub mod health;
pub mod providers;
pub mod routing;

use actix_web::web;

/// Register every route
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    routing::configure_routes(cfg);
    providers::configure_routes(cfg);
    health::configure_routes(cfg);
}

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}
