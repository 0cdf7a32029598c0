//! Inbound order payloads.
//!
//! Every field is optional at the serde level so that a structurally valid
//! JSON body always deserializes; presence of required fields is checked by
//! the translator, which reports the first missing field by name.

use print_bridge_core::{OrderRef, ProductId, VariantId};
use serde::Deserialize;

/// An order in one of the two accepted inbound forms.
#[derive(Debug, Clone)]
pub enum IncomingOrder {
    /// Pre-mapped order from the direct integration (`POST /order`).
    Direct(DirectOrder),
    /// BigCartel webhook order (`POST /bigcartel-webhook`).
    Webhook(WebhookOrder),
}

/// Pre-mapped order: line items already carry Printify identifiers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectOrder {
    pub order_id: Option<OrderRef>,
    pub customer_name: Option<String>,
    pub items: Option<Vec<DirectOrderItem>>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
}

/// A pre-mapped line item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectOrderItem {
    pub printify_product_id: Option<ProductId>,
    pub printify_variant_id: Option<VariantId>,
    pub quantity: Option<u32>,
}

/// BigCartel webhook order: line items carry only a storefront SKU.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookOrder {
    pub id: Option<OrderRef>,
    pub email: Option<String>,
    pub items: Option<Vec<WebhookOrderItem>>,
    pub shipping_address: Option<WebhookAddress>,
}

/// A webhook line item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookOrderItem {
    pub sku: Option<String>,
    pub quantity: Option<u32>,
}

/// Shipping address as sent by BigCartel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookAddress {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_order_accepts_numeric_and_string_ids() {
        let order: DirectOrder = serde_json::from_value(serde_json::json!({
            "order_id": 1001,
            "items": [
                {"printify_product_id": "p1", "printify_variant_id": 17, "quantity": 1},
                {"printify_product_id": "p2", "printify_variant_id": "18", "quantity": 2}
            ],
            "country": "US"
        }))
        .unwrap();

        assert_eq!(order.order_id, Some(OrderRef::from(1001_u64)));
        assert_eq!(order.items.unwrap().len(), 2);
        assert!(order.phone.is_none());
    }

    #[test]
    fn test_webhook_order_without_items() {
        let order: WebhookOrder = serde_json::from_value(serde_json::json!({"id": 42})).unwrap();
        assert!(order.items.is_none());

        let order: WebhookOrder =
            serde_json::from_value(serde_json::json!({"id": 42, "items": null})).unwrap();
        assert!(order.items.is_none());
    }

    #[test]
    fn test_wrong_field_type_fails() {
        let result: Result<WebhookOrder, _> = serde_json::from_value(serde_json::json!({
            "id": 42,
            "items": [{"sku": "X1", "quantity": "two"}]
        }));
        assert!(result.is_err());
    }
}
