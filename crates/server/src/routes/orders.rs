//! `POST /order`: pre-mapped orders from the direct integration.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::{Value, json};
use tracing::{info, instrument};

use crate::error::{AppError, DirectOrderError, add_breadcrumb};
use crate::models::DirectOrder;
use crate::services::{fulfillment, translate::translate_direct};
use crate::state::AppState;

/// Translate a pre-mapped order and submit it to Printify.
///
/// Answers `{success: true, printify_order}` with Printify's raw response.
#[instrument(skip_all)]
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<DirectOrder>, JsonRejection>,
) -> Result<Json<Value>, DirectOrderError> {
    let Json(order) = payload.map_err(|e| AppError::MalformedOrder(e.body_text()))?;

    let order_id = order
        .order_id
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default();
    info!(%order_id, "Received direct order");
    add_breadcrumb(
        "order",
        "Direct order received",
        Some(&[("order_id", order_id.as_str())]),
    );

    let request = translate_direct(&order)?;
    let result = fulfillment::submit(state.printify(), &request).await?;

    Ok(Json(json!({
        "success": true,
        "printify_order": result.raw,
    })))
}
