use axum::extract::State;
use axum::Json;
use service::health_service::{self, HealthReport, Liveness, Readiness};

use crate::state::ServerState;

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service and database status", body = crate::openapi::HealthDoc))
)]
pub async fn health(State(state): State<ServerState>) -> Json<HealthReport> {
    Json(health_service::health(&state.db, &state.health).await)
}

#[utoipa::path(
    get,
    path = "/health/detailed",
    tag = "health",
    responses((status = 200, description = "Status with row counts and system info", body = crate::openapi::HealthDoc))
)]
pub async fn detailed(State(state): State<ServerState>) -> Json<HealthReport> {
    Json(health_service::detailed_health(&state.db, &state.health).await)
}

#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses((status = 200, description = "Readiness", body = crate::openapi::ReadinessDoc))
)]
pub async fn ready(State(state): State<ServerState>) -> Json<Readiness> {
    Json(health_service::readiness(&state.db, &state.health).await)
}

#[utoipa::path(
    get,
    path = "/health/live",
    tag = "health",
    responses((status = 200, description = "Liveness", body = crate::openapi::LivenessDoc))
)]
pub async fn live(State(state): State<ServerState>) -> Json<Liveness> {
    Json(health_service::liveness(&state.health))
}
