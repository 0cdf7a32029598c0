//! Print Bridge Core - Shared types library.
//!
//! This crate provides the types shared by the bridge components:
//! - `server` - Order intake, SKU cache, and inventory sync service
//! - `cli` - Operator commands for one-off syncs and order submission
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. Request and
//! response shapes for the Printify API live here so that the server and the
//! CLI serialize exactly the same payloads.
//!
//! # Modules
//!
//! - [`types`] - SKUs, remote identifiers, order requests, and catalog records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
