//! Printify REST API client.

use std::sync::Arc;
use std::time::Duration;

use print_bridge_core::{CatalogProduct, FulfillmentOrderRequest};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::{debug, instrument};
use url::Url;

use super::types::{FulfillmentOrderResult, PRODUCTS_PAGE_LIMIT, ProductPage};
use super::{PrintifyError, raw_body};
use crate::config::PrintifyConfig;

/// Hard stop for catalog paging in case `last_page` is never reached.
const MAX_CATALOG_PAGES: u32 = 500;

/// Printify REST API client.
///
/// Cheaply cloneable; all clones share one connection pool.
#[derive(Clone)]
pub struct PrintifyClient {
    inner: Arc<PrintifyClientInner>,
}

struct PrintifyClientInner {
    client: reqwest::Client,
    base_url: Url,
    shop_id: String,
}

impl PrintifyClient {
    /// Create a new Printify API client.
    ///
    /// # Errors
    ///
    /// Returns `PrintifyError::Client` if the API key is not a valid header
    /// value or the HTTP client fails to build.
    pub fn new(config: &PrintifyConfig, timeout: Duration) -> Result<Self, PrintifyError> {
        let mut headers = HeaderMap::new();

        let mut auth_value =
            HeaderValue::from_str(&format!("Bearer {}", config.api_key.expose_secret()))
                .map_err(|e| PrintifyError::Client(format!("Invalid API key format: {e}")))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!("print-bridge/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| PrintifyError::Client(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(PrintifyClientInner {
                client,
                base_url: config.api_url.clone(),
                shop_id: config.shop_id.clone(),
            }),
        })
    }

    /// Build `{base}/v1/shops/{shop_id}/{resource}`.
    fn shop_url(&self, resource: &str) -> Result<Url, PrintifyError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| PrintifyError::Client("API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["v1", "shops", self.inner.shop_id.as_str(), resource]);
        Ok(url)
    }

    /// Create an order.
    ///
    /// Issues exactly one request; nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns `PrintifyError::Rejected` with Printify's raw error body on a
    /// non-success status, `PrintifyError::Unreachable` on transport failure,
    /// and `PrintifyError::Decode` if a success body is not JSON.
    #[instrument(skip(self, request), fields(external_id = %request.external_id))]
    pub async fn create_order(
        &self,
        request: &FulfillmentOrderRequest,
    ) -> Result<FulfillmentOrderResult, PrintifyError> {
        let url = self.shop_url("orders.json")?;

        let response = self.inner.client.post(url).json(request).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(PrintifyError::Rejected {
                status: status.as_u16(),
                body: raw_body(text),
            });
        }

        let raw: serde_json::Value =
            serde_json::from_str(&text).map_err(|e| PrintifyError::Decode(e.to_string()))?;

        Ok(FulfillmentOrderResult::from_raw(raw))
    }

    /// Read the complete shop catalog, following pagination.
    ///
    /// Either every page is read or an error is returned; a partial catalog
    /// is never handed back.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered on any page.
    #[instrument(skip(self), fields(shop_id = %self.inner.shop_id))]
    pub async fn list_products(&self) -> Result<Vec<CatalogProduct>, PrintifyError> {
        let mut products = Vec::new();
        let mut page_number = 1;

        loop {
            let page = self.fetch_product_page(page_number).await?;
            let has_more = page.has_more();
            debug!(
                page = page.current_page,
                last_page = ?page.last_page,
                count = page.data.len(),
                "Fetched catalog page"
            );
            products.extend(page.data);

            if !has_more {
                break;
            }

            page_number += 1;
            if page_number > MAX_CATALOG_PAGES {
                return Err(PrintifyError::Decode(format!(
                    "catalog exceeds {MAX_CATALOG_PAGES} pages"
                )));
            }
        }

        Ok(products)
    }

    async fn fetch_product_page(&self, page: u32) -> Result<ProductPage, PrintifyError> {
        let mut url = self.shop_url("products.json")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &PRODUCTS_PAGE_LIMIT.to_string());

        let response = self.inner.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(PrintifyError::Rejected {
                status: status.as_u16(),
                body: raw_body(text),
            });
        }

        serde_json::from_str(&text).map_err(|e| PrintifyError::Decode(e.to_string()))
    }
}
