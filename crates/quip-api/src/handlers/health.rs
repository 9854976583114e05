//! Liveness and readiness probes, served outside the rate limiter

use axum::{extract::State, http::StatusCode, Json};
use quip_service::{HealthResponse, ReadinessResponse};

use crate::state::AppState;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// GET /health/ready: 503 while PostgreSQL does not answer.
///
/// Contexts built without a pool (the in-memory store) are always ready.
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let store_reachable = match state.service_context().pool() {
        Some(pool) => quip_db::ping(pool).await.is_ok(),
        None => true,
    };

    let status = match store_reachable {
        true => StatusCode::OK,
        false => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(ReadinessResponse::ready(store_reachable)))
}
