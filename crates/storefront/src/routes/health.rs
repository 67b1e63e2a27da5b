//! Health check endpoints.

use axum::{extract::State, http::StatusCode};

use checkout_quantity_core::LABEL_OPTION_KEY;

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Reads the label setting to verify the settings store is reachable.
/// Returns 503 Service Unavailable if it is not.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.settings().get(LABEL_OPTION_KEY).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
