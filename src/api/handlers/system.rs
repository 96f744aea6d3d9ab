//! System handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status, always `"ok"` while the process is serving.
    pub status: String,
    /// Server time at the moment of the check.
    pub timestamp: DateTime<Utc>,
    /// Crate version.
    pub version: String,
    /// Whether routing is currently paused.
    pub paused: bool,
    /// Number of registered pools.
    pub pool_count: usize,
}

/// `GET /health` — Liveness and basic engine state.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service liveness along with the pause flag and pool count.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let paused = state.engine.is_paused().await;
    let pool_count = state.engine.list_pools().await.len();

    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        paused,
        pool_count,
    })
}

/// Root-level system routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
