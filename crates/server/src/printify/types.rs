//! Printify response envelopes.

use print_bridge_core::CatalogProduct;
use serde::Deserialize;

/// Number of products requested per catalog page (Printify's maximum).
pub const PRODUCTS_PAGE_LIMIT: u32 = 50;

/// One page of `products.json`.
#[derive(Debug, Deserialize)]
pub struct ProductPage {
    #[serde(default = "first_page")]
    pub current_page: u32,
    /// Absent on single-shot responses, in which case this is the only page.
    #[serde(default)]
    pub last_page: Option<u32>,
    #[serde(default)]
    pub data: Vec<CatalogProduct>,
}

const fn first_page() -> u32 {
    1
}

impl ProductPage {
    /// Whether another page should be requested after this one.
    #[must_use]
    pub fn has_more(&self) -> bool {
        !self.data.is_empty() && self.last_page.is_some_and(|last| self.current_page < last)
    }
}

/// Result of a successful order creation.
#[derive(Debug, Clone)]
pub struct FulfillmentOrderResult {
    /// Printify order ID, when the response carries one.
    pub id: Option<String>,
    /// The response body exactly as Printify returned it.
    pub raw: serde_json::Value,
}

impl FulfillmentOrderResult {
    /// Wrap a raw create-order response.
    #[must_use]
    pub fn from_raw(raw: serde_json::Value) -> Self {
        let id = raw.get("id").and_then(|id| match id {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        Self { id, raw }
    }
}
