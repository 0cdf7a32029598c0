//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for the order routes. The two order
//! endpoints answer their callers with different JSON shapes, so the
//! response is rendered by a per-route wrapper: [`DirectOrderError`] for
//! `POST /order` and [`WebhookError`] for `POST /bigcartel-webhook`. Both
//! capture server-class errors to Sentry before responding.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use print_bridge_core::Sku;
use serde_json::{Value, json};
use thiserror::Error;

use crate::printify::PrintifyError;
use crate::services::TranslateError;

/// Application-level error type for the order routes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Required fields are missing or the body is not a valid order.
    #[error("Malformed order: {0}")]
    MalformedOrder(String),

    /// A line item SKU has no Printify mapping.
    #[error("SKU not found in Printify catalog: {0}")]
    SkuNotFound(Sku),

    /// Printify answered with a non-success status.
    #[error("Printify rejected the order ({status}): {body}")]
    FulfillmentRejected { status: u16, body: Value },

    /// Printify could not be reached or did not answer in time.
    #[error("Printify unreachable: {0}")]
    FulfillmentUnreachable(String),

    /// The webhook shared secret was missing or wrong.
    #[error("Unauthorized webhook call")]
    Unauthorized,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<TranslateError> for AppError {
    fn from(err: TranslateError) -> Self {
        match err {
            TranslateError::MalformedOrder(message) => Self::MalformedOrder(message),
            TranslateError::SkuNotFound(sku) => Self::SkuNotFound(sku),
        }
    }
}

impl From<PrintifyError> for AppError {
    fn from(err: PrintifyError) -> Self {
        match err {
            PrintifyError::Rejected { status, body } => Self::FulfillmentRejected { status, body },
            PrintifyError::Unreachable(e) => Self::FulfillmentUnreachable(e.to_string()),
            e @ (PrintifyError::Decode(_) | PrintifyError::Client(_)) => {
                Self::Internal(e.to_string())
            }
        }
    }
}

impl AppError {
    /// Report to Sentry and log. Called for every error answered with a 5xx.
    fn capture(&self) {
        let event_id = sentry::capture_error(self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Request error"
        );
    }
}

/// Renders an [`AppError`] for `POST /order`.
///
/// - Printify rejection: 400 with Printify's raw error body
/// - Malformed order: 400 with the validation message
/// - Anything else: 500 with a generic message
#[derive(Debug)]
pub struct DirectOrderError(pub AppError);

impl<E: Into<AppError>> From<E> for DirectOrderError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for DirectOrderError {
    fn into_response(self) -> Response {
        match self.0 {
            AppError::FulfillmentRejected { status, body } => {
                tracing::warn!(printify_status = status, error = %body, "Printify API error");
                (StatusCode::BAD_REQUEST, Json(json!({ "error": body }))).into_response()
            }
            AppError::MalformedOrder(message) => {
                tracing::warn!(%message, "Rejected malformed order");
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            err => {
                err.capture();
                // Don't expose internal error details to clients
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Renders an [`AppError`] for `POST /bigcartel-webhook`.
///
/// - Bad or missing token: 403
/// - Malformed order: 400
/// - Anything else, including unmapped SKUs and Printify rejections: 500
///   with `success: false` and the error message
#[derive(Debug)]
pub struct WebhookError(pub AppError);

impl<E: Into<AppError>> From<E> for WebhookError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        match self.0 {
            AppError::Unauthorized => {
                tracing::warn!("Webhook call with missing or invalid token");
                (
                    StatusCode::FORBIDDEN,
                    Json(json!({ "error": "Unauthorized webhook call" })),
                )
                    .into_response()
            }
            AppError::MalformedOrder(message) => {
                tracing::warn!(%message, "Rejected malformed webhook order");
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Invalid order payload" })),
                )
                    .into_response()
            }
            err => {
                err.capture();
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": err.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

/// Add a breadcrumb for an order event.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of events
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("order", "Webhook order received", Some(&[("order_id", "42")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
