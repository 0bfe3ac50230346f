use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// "healthy" when the store is connected, "degraded" otherwise.
    pub status: String,
    pub store_connected: bool,
    pub port: u16,
    pub version: String,
}

/// Liveness and store readiness. Always 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Service status", body = HealthResponse))
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_connected = state.store.is_connected();
    Json(HealthResponse {
        status: if store_connected { "healthy" } else { "degraded" }.to_string(),
        store_connected,
        port: state.port,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
