//! `POST /bigcartel-webhook?token=...`: orders pushed by BigCartel.

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::error::{AppError, WebhookError, add_breadcrumb};
use crate::models::WebhookOrder;
use crate::services::{fulfillment, translate::translate_webhook};
use crate::state::AppState;

/// Query string of a webhook call.
#[derive(Debug, Deserialize)]
pub struct WebhookQuery {
    pub token: Option<String>,
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}

/// Authenticate, translate via the SKU cache, and submit to Printify.
///
/// The token is checked before the body is looked at, so an unauthenticated
/// call never learns whether its payload was valid.
#[instrument(skip_all)]
pub async fn bigcartel_webhook(
    State(state): State<AppState>,
    query: Result<Query<WebhookQuery>, QueryRejection>,
    payload: Result<Json<WebhookOrder>, JsonRejection>,
) -> Result<Json<Value>, WebhookError> {
    let token = query.ok().and_then(|Query(q)| q.token).unwrap_or_default();
    let secret = state.config().bigcartel.webhook_secret.expose_secret();
    if !constant_time_compare(&token, secret) {
        return Err(AppError::Unauthorized.into());
    }

    let Json(order) = payload.map_err(|e| AppError::MalformedOrder(e.body_text()))?;

    let order_id = order.id.as_ref().map(ToString::to_string).unwrap_or_default();
    info!(%order_id, "Received BigCartel webhook order");
    add_breadcrumb(
        "order",
        "Webhook order received",
        Some(&[("order_id", order_id.as_str())]),
    );

    let request = translate_webhook(&order, state.sku_cache())?;
    let result = fulfillment::submit(state.printify(), &request).await?;

    Ok(Json(json!({
        "success": true,
        "data": result.raw,
    })))
}
