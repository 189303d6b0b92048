//! Welcome and health check handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use matdb_persistence::core::{CredentialStorage, MaterialStorage};
use serde_json::json;
use tracing::debug;

use crate::state::AppState;

/// Handler for the API root.
///
/// # HTTP Request
///
/// `GET /`
pub async fn root_handler() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to the Materials Database API" }))
}

/// Handler for the health check endpoint.
///
/// Reports the configured backend without touching the store, so it stays
/// cheap enough for load balancer probes.
///
/// # HTTP Request
///
/// `GET /health`
///
/// # Response
///
/// - `200 OK` - `{status, backend, timestamp}`
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> Response
where
    S: MaterialStorage + CredentialStorage + Send + Sync,
{
    debug!("Processing health check request");

    let health_response = json!({
        "status": "healthy",
        "backend": state.storage().backend_name(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    (StatusCode::OK, Json(health_response)).into_response()
}
