//! HTTP route handlers for the bridge.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                   - Liveness banner
//! GET  /health             - Health check
//! GET  /health/ready       - Ready once the SKU cache has been built
//!
//! # Orders
//! POST /order              - Pre-mapped order (Printify IDs supplied)
//! POST /bigcartel-webhook  - BigCartel order, SKUs resolved via cache
//!                            (requires ?token=<webhook secret>)
//! ```

pub mod health;
pub mod orders;
pub mod webhook;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the bridge.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route("/order", post(orders::create_order))
        .route("/bigcartel-webhook", post(webhook::bigcartel_webhook))
}
