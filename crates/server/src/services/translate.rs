//! Inbound order → Printify order-creation request.
//!
//! Translation is pure: no network I/O. Webhook orders are resolved against
//! a single SKU snapshot so every line of one order sees the same mappings.
//!
//! Validation order is fixed: order ID, line items, destination address,
//! then per-line fields, then SKU resolution. The first problem found is
//! reported and nothing partial is produced.

use print_bridge_core::{
    ExternalOrderId, FulfillmentLineItem, FulfillmentOrderRequest, OrderRef, ShippingAddress,
    ShippingMethod, Sku,
};
use thiserror::Error;
use tracing::instrument;

use super::sku_cache::SkuCache;
use crate::models::{DirectOrder, IncomingOrder, WebhookAddress, WebhookOrder};

/// Customer email used for webhook orders that arrive without one.
pub const PLACEHOLDER_EMAIL: &str = "orders@bigcartel-bridge.invalid";

/// Errors produced while translating an inbound order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslateError {
    /// A required field is missing or invalid.
    #[error("Malformed order: {0}")]
    MalformedOrder(String),

    /// A webhook line item references a SKU with no Printify mapping.
    #[error("SKU not found in Printify catalog: {0}")]
    SkuNotFound(Sku),
}

/// Translate an inbound order into a Printify order request.
///
/// # Errors
///
/// Returns `TranslateError::MalformedOrder` naming the first missing field,
/// or `TranslateError::SkuNotFound` naming the first unmapped SKU.
pub fn translate(
    order: &IncomingOrder,
    cache: &SkuCache,
) -> Result<FulfillmentOrderRequest, TranslateError> {
    match order {
        IncomingOrder::Direct(order) => translate_direct(order),
        IncomingOrder::Webhook(order) => translate_webhook(order, cache),
    }
}

/// Translate a pre-mapped order. Printify notifies the customer on shipment.
///
/// # Errors
///
/// Returns `TranslateError::MalformedOrder` if a required field is missing.
#[instrument(skip_all, fields(order_id = ?order.order_id))]
pub fn translate_direct(order: &DirectOrder) -> Result<FulfillmentOrderRequest, TranslateError> {
    let order_id = order_id(order.order_id.as_ref(), "order_id")?;
    let items = order
        .items
        .as_deref()
        .ok_or_else(|| malformed("missing field: items"))?;
    non_empty(items.len())?;

    let address_to = ShippingAddress {
        first_name: or_blank(order.first_name.as_ref()),
        last_name: or_blank(order.last_name.as_ref()),
        email: or_blank(order.email.as_ref()),
        phone: or_blank(order.phone.as_ref()),
        country: required(order.country.as_ref(), "country")?,
        region: or_blank(order.state.as_ref()),
        address1: or_blank(order.address1.as_ref()),
        address2: or_blank(order.address2.as_ref()),
        city: required(order.city.as_ref(), "city")?,
        zip: required(order.zip.as_ref(), "zip")?,
    };

    let line_items = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            Ok(FulfillmentLineItem {
                product_id: item
                    .printify_product_id
                    .clone()
                    .filter(|id| !id.is_blank())
                    .ok_or_else(|| malformed(format!("items[{index}]: missing printify_product_id")))?,
                variant_id: item
                    .printify_variant_id
                    .clone()
                    .filter(|id| !id.is_blank())
                    .ok_or_else(|| malformed(format!("items[{index}]: missing printify_variant_id")))?,
                quantity: quantity(item.quantity, index)?,
            })
        })
        .collect::<Result<Vec<_>, TranslateError>>()?;

    Ok(FulfillmentOrderRequest {
        external_id: ExternalOrderId::direct(order_id),
        label: or_blank(order.customer_name.as_ref()),
        line_items,
        shipping_method: ShippingMethod::Standard,
        send_shipping_notification: true,
        address_to,
    })
}

/// Translate a BigCartel webhook order, resolving SKUs through the cache.
///
/// BigCartel already notifies the customer, so Printify's shipment
/// notification is turned off.
///
/// # Errors
///
/// Returns `TranslateError::MalformedOrder` if a required field is missing
/// and `TranslateError::SkuNotFound` for the first unmapped SKU.
#[instrument(skip_all, fields(order_id = ?order.id))]
pub fn translate_webhook(
    order: &WebhookOrder,
    cache: &SkuCache,
) -> Result<FulfillmentOrderRequest, TranslateError> {
    let order_id = order_id(order.id.as_ref(), "id")?;
    let items = order
        .items
        .as_deref()
        .ok_or_else(|| malformed("missing field: items"))?;
    non_empty(items.len())?;

    let address = order
        .shipping_address
        .as_ref()
        .ok_or_else(|| malformed("missing field: shipping_address"))?;
    let address_to = webhook_address(address, order.email.as_ref())?;

    // Parse every line before resolving any of them
    let lines = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let sku = item
                .sku
                .as_deref()
                .ok_or_else(|| malformed(format!("items[{index}]: missing sku")))
                .and_then(|raw| {
                    Sku::parse(raw).map_err(|e| malformed(format!("items[{index}]: {e}")))
                })?;
            Ok((sku, quantity(item.quantity, index)?))
        })
        .collect::<Result<Vec<_>, TranslateError>>()?;

    let snapshot = cache.snapshot();
    let line_items = lines
        .into_iter()
        .map(|(sku, quantity)| {
            let variant = snapshot
                .get(&sku)
                .ok_or_else(|| TranslateError::SkuNotFound(sku.clone()))?;
            Ok(FulfillmentLineItem {
                product_id: variant.product_id.clone(),
                variant_id: variant.variant_id.clone(),
                quantity,
            })
        })
        .collect::<Result<Vec<_>, TranslateError>>()?;

    let external_id = ExternalOrderId::webhook(order_id);
    let label = format!("{} {}", address_to.first_name, address_to.last_name)
        .trim()
        .to_string();

    Ok(FulfillmentOrderRequest {
        label: if label.is_empty() {
            external_id.to_string()
        } else {
            label
        },
        external_id,
        line_items,
        shipping_method: ShippingMethod::Standard,
        send_shipping_notification: false,
        address_to,
    })
}

fn webhook_address(
    address: &WebhookAddress,
    email: Option<&String>,
) -> Result<ShippingAddress, TranslateError> {
    Ok(ShippingAddress {
        first_name: or_blank(address.first_name.as_ref()),
        last_name: or_blank(address.last_name.as_ref()),
        email: email
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .unwrap_or(PLACEHOLDER_EMAIL)
            .to_string(),
        phone: or_blank(address.phone.as_ref()),
        country: required(address.country.as_ref(), "shipping_address.country")?,
        region: or_blank(address.state.as_ref()),
        address1: or_blank(address.address1.as_ref()),
        address2: or_blank(address.address2.as_ref()),
        city: required(address.city.as_ref(), "shipping_address.city")?,
        zip: required(address.zip.as_ref(), "shipping_address.zip")?,
    })
}

fn malformed(message: impl Into<String>) -> TranslateError {
    TranslateError::MalformedOrder(message.into())
}

fn order_id<'a>(id: Option<&'a OrderRef>, field: &str) -> Result<&'a OrderRef, TranslateError> {
    id.filter(|id| !id.is_blank())
        .ok_or_else(|| malformed(format!("missing field: {field}")))
}

fn non_empty(count: usize) -> Result<(), TranslateError> {
    if count == 0 {
        return Err(malformed("order has no line items"));
    }
    Ok(())
}

fn required(value: Option<&String>, field: &str) -> Result<String, TranslateError> {
    value
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .ok_or_else(|| malformed(format!("missing field: {field}")))
}

fn or_blank(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

fn quantity(quantity: Option<u32>, index: usize) -> Result<u32, TranslateError> {
    match quantity {
        Some(0) => Err(malformed(format!("items[{index}]: quantity must be at least 1"))),
        Some(q) => Ok(q),
        None => Err(malformed(format!("items[{index}]: missing quantity"))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use print_bridge_core::{CatalogProduct, CatalogVariant, ProductId, VariantId};

    use super::*;
    use crate::models::{DirectOrderItem, WebhookOrderItem};
    use crate::services::sku_cache::SkuSnapshot;

    fn cache_with(entries: &[(&str, &str, &str)]) -> SkuCache {
        let catalog: Vec<CatalogProduct> = entries
            .iter()
            .map(|(sku, product, variant)| CatalogProduct {
                id: ProductId::from(*product),
                title: String::new(),
                variants: vec![CatalogVariant {
                    id: VariantId::from(*variant),
                    sku: (*sku).to_string(),
                    is_enabled: true,
                }],
            })
            .collect();
        SkuCache::with_snapshot(SkuSnapshot::from_catalog(&catalog, Utc::now()))
    }

    fn webhook_order(items: &[(&str, u32)]) -> WebhookOrder {
        WebhookOrder {
            id: Some(OrderRef::from(42_u64)),
            email: None,
            items: Some(
                items
                    .iter()
                    .map(|(sku, quantity)| WebhookOrderItem {
                        sku: Some((*sku).to_string()),
                        quantity: Some(*quantity),
                    })
                    .collect(),
            ),
            shipping_address: Some(WebhookAddress {
                first_name: Some("Ada".to_string()),
                last_name: Some("Lovelace".to_string()),
                country: Some("GB".to_string()),
                state: Some("London".to_string()),
                address1: Some("12 St James's Square".to_string()),
                city: Some("London".to_string()),
                zip: Some("SW1Y 4JH".to_string()),
                ..WebhookAddress::default()
            }),
        }
    }

    fn direct_order() -> DirectOrder {
        DirectOrder {
            order_id: Some(OrderRef::from("1001")),
            customer_name: Some("Jane Doe".to_string()),
            items: Some(vec![
                DirectOrderItem {
                    printify_product_id: Some(ProductId::from("p1")),
                    printify_variant_id: Some(VariantId::from(11_u64)),
                    quantity: Some(1),
                },
                DirectOrderItem {
                    printify_product_id: Some(ProductId::from("p2")),
                    printify_variant_id: Some(VariantId::from(22_u64)),
                    quantity: Some(3),
                },
            ]),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            country: Some("US".to_string()),
            address1: Some("1 Main St".to_string()),
            city: Some("Springfield".to_string()),
            zip: Some("12345".to_string()),
            ..DirectOrder::default()
        }
    }

    #[test]
    fn test_webhook_order_resolves_skus() {
        let cache = cache_with(&[("X1", "p1", "v1")]);
        let request = translate_webhook(&webhook_order(&[("X1", 2)]), &cache).unwrap();

        assert_eq!(request.external_id.as_str(), "bigcartel-42");
        assert!(!request.send_shipping_notification);
        assert_eq!(request.shipping_method, ShippingMethod::Standard);
        assert_eq!(
            request.line_items,
            vec![FulfillmentLineItem {
                product_id: ProductId::from("p1"),
                variant_id: VariantId::from("v1"),
                quantity: 2,
            }]
        );
        assert_eq!(request.label, "Ada Lovelace");
        assert_eq!(request.address_to.region, "London");
    }

    #[test]
    fn test_webhook_order_defaults_email() {
        let cache = cache_with(&[("X1", "p1", "v1")]);
        let request = translate_webhook(&webhook_order(&[("X1", 1)]), &cache).unwrap();
        assert_eq!(request.address_to.email, PLACEHOLDER_EMAIL);
        assert_eq!(request.address_to.phone, "");
        assert_eq!(request.address_to.address2, "");

        let mut order = webhook_order(&[("X1", 1)]);
        order.email = Some("ada@example.com".to_string());
        let request = translate_webhook(&order, &cache).unwrap();
        assert_eq!(request.address_to.email, "ada@example.com");
    }

    #[test]
    fn test_webhook_order_unknown_sku_fails_whole_order() {
        let cache = cache_with(&[("X1", "p1", "v1"), ("X3", "p3", "v3")]);
        let order = webhook_order(&[("X1", 1), ("MISSING", 1), ("X3", 1)]);

        let err = translate_webhook(&order, &cache).unwrap_err();
        assert_eq!(
            err,
            TranslateError::SkuNotFound(Sku::parse("MISSING").unwrap())
        );
    }

    #[test]
    fn test_webhook_order_missing_items() {
        let cache = SkuCache::new();
        let mut order = webhook_order(&[]);
        order.items = None;

        let err = translate_webhook(&order, &cache).unwrap_err();
        assert_eq!(err, TranslateError::MalformedOrder("missing field: items".to_string()));
    }

    #[test]
    fn test_webhook_order_malformed_checked_before_skus() {
        // Unmapped SKU and missing city: the missing city is reported
        let cache = SkuCache::new();
        let mut order = webhook_order(&[("NOPE", 1)]);
        if let Some(address) = order.shipping_address.as_mut() {
            address.city = None;
        }

        let err = translate_webhook(&order, &cache).unwrap_err();
        assert_eq!(
            err,
            TranslateError::MalformedOrder("missing field: shipping_address.city".to_string())
        );
    }

    #[test]
    fn test_webhook_order_blank_sku() {
        let cache = SkuCache::new();
        let err = translate_webhook(&webhook_order(&[("  ", 1)]), &cache).unwrap_err();
        assert!(matches!(err, TranslateError::MalformedOrder(ref m) if m.starts_with("items[0]")));
    }

    #[test]
    fn test_direct_order_copies_fields_in_order() {
        let request = translate_direct(&direct_order()).unwrap();

        assert_eq!(request.external_id.as_str(), "1001");
        assert_eq!(request.label, "Jane Doe");
        assert_eq!(request.shipping_method, ShippingMethod::Standard);
        assert!(request.send_shipping_notification);
        assert_eq!(request.line_items.len(), 2);
        assert_eq!(request.line_items[0].product_id, ProductId::from("p1"));
        assert_eq!(request.line_items[1].product_id, ProductId::from("p2"));
        assert_eq!(request.line_items[1].quantity, 3);
        assert_eq!(request.address_to.phone, "");
        assert_eq!(request.address_to.address2, "");
        assert_eq!(request.address_to.region, "");
    }

    #[test]
    fn test_direct_order_missing_variant() {
        let mut order = direct_order();
        if let Some(items) = order.items.as_mut() {
            items[1].printify_variant_id = None;
        }

        let err = translate_direct(&order).unwrap_err();
        assert_eq!(
            err,
            TranslateError::MalformedOrder("items[1]: missing printify_variant_id".to_string())
        );
    }

    #[test]
    fn test_direct_order_missing_address_fields() {
        for field in ["country", "city", "zip"] {
            let mut order = direct_order();
            match field {
                "country" => order.country = Some("   ".to_string()),
                "city" => order.city = None,
                _ => order.zip = None,
            }
            let err = translate_direct(&order).unwrap_err();
            assert_eq!(
                err,
                TranslateError::MalformedOrder(format!("missing field: {field}"))
            );
        }
    }

    #[test]
    fn test_direct_order_address_is_copied_verbatim() {
        let mut order = direct_order();
        order.zip = Some(" 12345 ".to_string());
        order.city = Some("Springfield ".to_string());

        let request = translate_direct(&order).unwrap();
        assert_eq!(request.address_to.zip, " 12345 ");
        assert_eq!(request.address_to.city, "Springfield ");
        assert_eq!(request.address_to.country, "US");
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut order = direct_order();
        if let Some(items) = order.items.as_mut() {
            items[0].quantity = Some(0);
        }
        assert!(matches!(
            translate_direct(&order),
            Err(TranslateError::MalformedOrder(_))
        ));
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut order = direct_order();
        order.items = Some(Vec::new());
        assert_eq!(
            translate_direct(&order).unwrap_err(),
            TranslateError::MalformedOrder("order has no line items".to_string())
        );
    }

    #[test]
    fn test_translate_dispatches_on_form() {
        let cache = cache_with(&[("X1", "p1", "v1")]);

        let direct = translate(&IncomingOrder::Direct(direct_order()), &cache).unwrap();
        assert!(direct.send_shipping_notification);

        let webhook =
            translate(&IncomingOrder::Webhook(webhook_order(&[("X1", 1)])), &cache).unwrap();
        assert!(!webhook.send_shipping_notification);
    }
}
