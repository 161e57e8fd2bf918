//! Provider catalog and status endpoints

use crate::core::health::ProviderHealth;
use crate::core::providers::Provider;
use crate::core::router::PoolUsage;
use crate::server::state::AppState;
use crate::utils::error::GatewayError;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::debug;

/// Configure provider routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/providers", web::get().to(list_providers))
        .route("/provider-status/{id}", web::get().to(provider_status));
}

/// One registry entry with its live health
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderEntry<'a> {
    #[serde(flatten)]
    pub provider: &'a Provider,
    pub health: ProviderHealth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pool: Option<PoolUsage>,
}

#[derive(Debug, Serialize)]
pub struct ProviderList<'a> {
    pub providers: Vec<ProviderEntry<'a>>,
}

/// List every configured provider, active or not
pub async fn list_providers(state: web::Data<AppState>) -> HttpResponse {
    debug!("Provider list requested");

    let mut pools = state.orchestrator().pool_usage();
    let providers = state
        .registry()
        .all()
        .iter()
        .map(|provider| ProviderEntry {
            provider,
            health: state.health().health_of(&provider.id),
            pool: pools.remove(&provider.id),
        })
        .collect();

    HttpResponse::Ok().json(ProviderList { providers })
}

/// Current health of one provider
pub async fn provider_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, GatewayError> {
    let provider_id = path.into_inner();

    if !state.registry().contains(&provider_id) {
        return Err(GatewayError::not_found(format!("Provider {}", provider_id)));
    }

    Ok(HttpResponse::Ok().json(state.health().health_of(&provider_id)))
}
