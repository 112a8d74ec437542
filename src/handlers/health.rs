use axum::Json;
use axum::extract::State;
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Which storage backend is serving requests.
    pub backend: &'static str,
    /// True while database reads are failing over to fallback content.
    pub degraded: bool,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    operation_id = "health",
    summary = "Service health and storage status",
    responses(
        (status = 200, description = "Always returns 200 while the process is up", body = HealthResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        backend: state.storage.backend_name(),
        degraded: state.storage.degraded(),
    })
}
