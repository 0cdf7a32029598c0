//! Application state shared across handlers.

use std::sync::Arc;

use thiserror::Error;

use crate::bigcartel::{BigCartelClient, BigCartelError};
use crate::config::BridgeConfig;
use crate::printify::{PrintifyClient, PrintifyError};
use crate::services::{InventoryReconciler, SkuCache};

/// Error building the platform clients.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("printify client: {0}")]
    Printify(#[from] PrintifyError),
    #[error("bigcartel client: {0}")]
    BigCartel(#[from] BigCartelError),
}

/// Application state shared across all handlers and background jobs.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, both platform clients and the SKU cache.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: BridgeConfig,
    printify: PrintifyClient,
    bigcartel: BigCartelClient,
    sku_cache: SkuCache,
}

impl AppState {
    /// Create a new application state with an empty SKU cache.
    ///
    /// # Errors
    ///
    /// Returns an error if either platform client cannot be built.
    pub fn new(config: BridgeConfig) -> Result<Self, StateError> {
        let printify = PrintifyClient::new(&config.printify, config.http_timeout)?;
        let bigcartel = BigCartelClient::new(&config.bigcartel, config.http_timeout)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                printify,
                bigcartel,
                sku_cache: SkuCache::new(),
            }),
        })
    }

    /// Get a reference to the bridge configuration.
    #[must_use]
    pub fn config(&self) -> &BridgeConfig {
        &self.inner.config
    }

    /// Get a reference to the Printify API client.
    #[must_use]
    pub fn printify(&self) -> &PrintifyClient {
        &self.inner.printify
    }

    /// Get a reference to the shared SKU cache.
    #[must_use]
    pub fn sku_cache(&self) -> &SkuCache {
        &self.inner.sku_cache
    }

    /// Build an inventory reconciler over this state's clients.
    #[must_use]
    pub fn reconciler(&self) -> InventoryReconciler {
        InventoryReconciler::new(
            self.inner.printify.clone(),
            self.inner.bigcartel.clone(),
            self.inner.config.sync.in_stock_quantity,
        )
    }
}
