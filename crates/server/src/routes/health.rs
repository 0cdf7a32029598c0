//! Liveness and readiness checks.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Liveness banner at `/`.
pub async fn root() -> &'static str {
    "BigCartel → Printify bridge is live!"
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Ready once the SKU cache has been built at least once, so webhook
/// orders can be resolved. Returns 503 Service Unavailable before that.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.sku_cache().is_populated() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
