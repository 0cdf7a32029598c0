//! Printify order-creation request.
//!
//! This is the normalized shape every inbound order is translated into,
//! regardless of whether it came from the direct integration or from a
//! BigCartel webhook. It serializes to the JSON body of
//! `POST /v1/shops/{shop_id}/orders.json`.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::id::{OrderRef, ProductId, VariantId};

/// Prefix applied to BigCartel order IDs so they cannot collide with IDs
/// from the direct integration.
pub const WEBHOOK_ORDER_PREFIX: &str = "bigcartel-";

/// The caller-side order identifier sent to Printify as `external_id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalOrderId(String);

impl ExternalOrderId {
    /// External ID for a pre-mapped order: the raw order ID.
    #[must_use]
    pub fn direct(order_id: &OrderRef) -> Self {
        Self(order_id.to_string())
    }

    /// External ID for a BigCartel webhook order: `bigcartel-{id}`.
    #[must_use]
    pub fn webhook(order_id: &OrderRef) -> Self {
        Self(format!("{WEBHOOK_ORDER_PREFIX}{order_id}"))
    }

    /// Returns the external ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExternalOrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Printify shipping method selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ShippingMethod {
    /// Standard shipping (`1`).
    #[default]
    Standard,
    /// Priority shipping (`2`).
    Priority,
    /// Printify Express (`3`).
    Express,
    /// Economy shipping (`4`).
    Economy,
}

impl From<ShippingMethod> for u8 {
    fn from(method: ShippingMethod) -> Self {
        match method {
            ShippingMethod::Standard => 1,
            ShippingMethod::Priority => 2,
            ShippingMethod::Express => 3,
            ShippingMethod::Economy => 4,
        }
    }
}

impl TryFrom<u8> for ShippingMethod {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Standard),
            2 => Ok(Self::Priority),
            3 => Ok(Self::Express),
            4 => Ok(Self::Economy),
            other => Err(format!("unknown shipping method: {other}")),
        }
    }
}

/// One line of a Printify order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentLineItem {
    pub product_id: ProductId,
    pub variant_id: VariantId,
    pub quantity: u32,
}

/// Destination address (`address_to`).
///
/// Optional fields are sent as empty strings rather than omitted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub region: String,
    pub address1: String,
    pub address2: String,
    pub city: String,
    pub zip: String,
}

/// A complete Printify order-creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentOrderRequest {
    pub external_id: ExternalOrderId,
    pub label: String,
    pub line_items: Vec<FulfillmentLineItem>,
    pub shipping_method: ShippingMethod,
    /// Whether Printify emails the customer when the order ships.
    pub send_shipping_notification: bool,
    pub address_to: ShippingAddress,
}
