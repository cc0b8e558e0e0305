//! Health check handler.

use axum::Json;
use axum::extract::State;

use trafi_core::traits::CacheProvider;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /health
///
/// Probes the database and cache; reports "degraded" if either fails
/// but still answers 200 so that load balancers see the process alive.
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database_ok = state.db.health_check().await.unwrap_or(false);
    let cache_ok = state.cache.health_check().await.unwrap_or(false);

    let status = if database_ok && cache_ok {
        "ok"
    } else {
        "degraded"
    };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if database_ok { "connected" } else { "unreachable" }.to_string(),
        cache: if cache_ok { "connected" } else { "unreachable" }.to_string(),
    }))
}
