//! Health endpoint.

use axum::Json;
use axum::extract::State;

use crate::AppState;
use crate::models::HealthResponse;

/// `GET /health` — reports whether a completion credential is configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        has_key: state.relay.has_client(),
        model: state.relay.model().map(String::from),
    })
}
