//! Core types for the bridge.
//!
//! This module provides type-safe wrappers for the identifiers and payloads
//! exchanged between BigCartel and Printify.

pub mod catalog;
pub mod id;
pub mod order;
pub mod sku;

pub use catalog::{CatalogProduct, CatalogVariant, VariantRef};
pub use id::*;
pub use order::{
    ExternalOrderId, FulfillmentLineItem, FulfillmentOrderRequest, ShippingAddress,
    ShippingMethod,
};
pub use sku::{Sku, SkuError};
