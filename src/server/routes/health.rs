//! Health check and statistics endpoints

use crate::core::GatewayHealth;
use crate::core::cache_manager::CacheStats;
use crate::core::router::{PoolUsage, RouterMetricsSnapshot};
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/stats", web::get().to(stats));
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthReport {
    version: &'static str,
    uptime_seconds: u64,
    #[serde(flatten)]
    health: GatewayHealth,
}

/// Liveness and aggregate provider health
///
/// Answers 503 once no active provider can take requests or the gateway is
/// shutting down.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    debug!("Health check requested");

    let health = state.gateway.health_check();
    let unhealthy = health.status == "unhealthy";
    let report = HealthReport {
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.uptime_seconds(),
        health,
    };

    if unhealthy {
        HttpResponse::ServiceUnavailable().json(ApiResponse::success(report))
    } else {
        HttpResponse::Ok().json(ApiResponse::success(report))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Stats {
    uptime_seconds: u64,
    router: RouterMetricsSnapshot,
    success_rate: f64,
    cache: CacheStats,
    pools: HashMap<String, PoolUsage>,
}

/// Router counters, cache statistics and pool usage
pub async fn stats(state: web::Data<AppState>) -> HttpResponse {
    debug!("Stats requested");

    let orchestrator = state.orchestrator();
    let stats = Stats {
        uptime_seconds: state.uptime_seconds(),
        router: orchestrator.metrics().snapshot(),
        success_rate: orchestrator.metrics().success_rate(),
        cache: orchestrator.cache().stats(),
        pools: orchestrator.pool_usage(),
    };

    HttpResponse::Ok().json(ApiResponse::success(stats))
}
