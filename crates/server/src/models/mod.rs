//! Domain models for the bridge service.
//!
//! - [`order`] - Inbound order payloads (direct and webhook forms)

pub mod order;

pub use order::{
    DirectOrder, DirectOrderItem, IncomingOrder, WebhookAddress, WebhookOrder, WebhookOrderItem,
};
