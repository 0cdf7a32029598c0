//! BigCartel REST API client.
//!
//! BigCartel is the storefront side of the bridge. The bridge only writes to
//! it: inventory quantities are pushed per SKU by the inventory reconciler.
//! Orders arrive from BigCartel via webhook (see `routes::webhook`).

mod client;

pub use client::BigCartelClient;

use thiserror::Error;

/// Errors that can occur when interacting with the BigCartel API.
#[derive(Debug, Error)]
pub enum BigCartelError {
    /// BigCartel answered with a non-success status.
    #[error("BigCartel rejected the request ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// The request never produced a response.
    #[error("BigCartel unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// The client could not be constructed or a URL could not be built.
    #[error("BigCartel client error: {0}")]
    Client(String),
}
