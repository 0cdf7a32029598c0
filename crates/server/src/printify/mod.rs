//! Printify REST API client.
//!
//! Printify is the fulfillment side of the bridge: orders are created in a
//! single Printify shop, and that shop's catalog is the source of truth for
//! SKU mappings and variant availability.
//!
//! # Endpoints
//!
//! - `POST /v1/shops/{shop_id}/orders.json` - create an order
//! - `GET  /v1/shops/{shop_id}/products.json?page=N&limit=50` - read the catalog
//!
//! All calls use bearer-token auth and the per-call timeout from
//! [`BridgeConfig::http_timeout`](crate::config::BridgeConfig::http_timeout).

mod client;
pub mod types;

pub use client::PrintifyClient;

use thiserror::Error;

/// Errors that can occur when interacting with the Printify API.
#[derive(Debug, Error)]
pub enum PrintifyError {
    /// Printify answered with a non-success status.
    ///
    /// `body` is the raw response body: parsed JSON if it was JSON, otherwise
    /// the text wrapped in a JSON string.
    #[error("Printify rejected the request ({status}): {body}")]
    Rejected {
        status: u16,
        body: serde_json::Value,
    },

    /// The request never produced a response (connect failure, timeout, ...).
    #[error("Printify unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// A success response could not be decoded.
    #[error("Failed to decode Printify response: {0}")]
    Decode(String),

    /// The client could not be constructed or a URL could not be built.
    #[error("Printify client error: {0}")]
    Client(String),
}

/// Turn a raw error body into JSON, falling back to a JSON string.
pub(crate) fn raw_body(text: String) -> serde_json::Value {
    serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
}
