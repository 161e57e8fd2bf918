//! Inbound routing endpoint

use crate::core::router::{RouteRequest, RouteResult};
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::error::InternalError;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::{debug, warn};

/// Configure routing routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/route-request")
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                let response =
                    HttpResponse::BadRequest().json(RouteResponse::failure(err.to_string()));
                InternalError::from_response(err, response).into()
            }))
            .route(web::post().to(route_request)),
    );
}

/// Body of `/route-request` responses
///
/// Failures carry only `success` and `error`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_used: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RouteResponse {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

impl From<RouteResult> for RouteResponse {
    fn from(result: RouteResult) -> Self {
        Self {
            success: true,
            provider: Some(result.provider_id),
            cost: Some(result.cost),
            tokens: Some(result.tokens),
            response_time_ms: Some(result.response_time_ms),
            fallback_used: Some(result.fallback_used),
            content: Some(result.content),
            error: None,
        }
    }
}

/// Route one completion request
///
/// Waits at most the configured request deadline. A route that outlives
/// it is answered with 504 and finishes in the background.
pub async fn route_request(
    state: web::Data<AppState>,
    request: web::Json<RouteRequest>,
) -> HttpResponse {
    let request = request.into_inner();
    debug!(user = %request.user_id, model = %request.model, "Route request received");

    let deadline = state.config().server().request_deadline();
    match state
        .orchestrator()
        .route_with_deadline(request, deadline)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(RouteResponse::from(result)),
        Err(router_error) => {
            let error = GatewayError::from(router_error);
            let (status, code) = error.status_and_code();
            warn!(code, "Route request failed: {}", error);
            HttpResponse::build(status).json(RouteResponse::failure(error.public_message()))
        }
    }
}
