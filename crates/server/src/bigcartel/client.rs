//! BigCartel inventory client.

use std::sync::Arc;
use std::time::Duration;

use print_bridge_core::Sku;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use tracing::instrument;
use url::Url;

use super::BigCartelError;
use crate::config::BigCartelConfig;

/// BigCartel REST API client.
#[derive(Clone)]
pub struct BigCartelClient {
    inner: Arc<BigCartelClientInner>,
}

struct BigCartelClientInner {
    client: reqwest::Client,
    base_url: Url,
    store_id: String,
}

#[derive(Debug, Serialize)]
struct InventoryUpdate {
    quantity: u32,
}

impl BigCartelClient {
    /// Create a new BigCartel API client.
    ///
    /// # Errors
    ///
    /// Returns error if the token is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &BigCartelConfig, timeout: Duration) -> Result<Self, BigCartelError> {
        let mut headers = HeaderMap::new();

        let mut auth_value =
            HeaderValue::from_str(&format!("Bearer {}", config.api_token.expose_secret()))
                .map_err(|e| BigCartelError::Client(format!("Invalid API token format: {e}")))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("print-bridge/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| BigCartelError::Client(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(BigCartelClientInner {
                client,
                base_url: config.api_url.clone(),
                store_id: config.store_id.clone(),
            }),
        })
    }

    /// Build `{base}/stores/{store_id}/products/{sku}`.
    fn product_url(&self, sku: &Sku) -> Result<Url, BigCartelError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| BigCartelError::Client("API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend([
                "stores",
                self.inner.store_id.as_str(),
                "products",
                sku.as_str(),
            ]);
        Ok(url)
    }

    /// Set the available quantity of the product identified by `sku`.
    ///
    /// # Errors
    ///
    /// Returns `BigCartelError::Rejected` on a non-success status (including
    /// 404 for a SKU the store does not have) and `BigCartelError::Unreachable`
    /// on transport failure.
    #[instrument(skip(self), fields(sku = %sku))]
    pub async fn update_inventory(&self, sku: &Sku, quantity: u32) -> Result<(), BigCartelError> {
        let url = self.product_url(sku)?;

        let response = self
            .inner
            .client
            .put(url)
            .json(&InventoryUpdate { quantity })
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BigCartelError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}
