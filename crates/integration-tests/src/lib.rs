//! Integration tests for the BigCartel → Printify bridge.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p print-bridge-integration-tests
//! ```
//!
//! Every test starts a [`TestBridge`]: the real router bound to an
//! ephemeral port on `127.0.0.1`, talking to two `mockito` servers that
//! stand in for Printify and BigCartel. No external services are needed.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::SocketAddr;

use print_bridge_server::build_router;
use print_bridge_server::config::BridgeConfig;
use print_bridge_server::state::AppState;

/// Webhook secret configured on every test bridge.
pub const WEBHOOK_SECRET: &str = "k9Fq2LzR7mWx4Tb8";

/// Printify shop ID configured on every test bridge.
pub const SHOP_ID: &str = "shop-1";

/// BigCartel store ID configured on every test bridge.
pub const STORE_ID: &str = "store-9";

/// Path of the Printify order-creation endpoint for [`SHOP_ID`].
pub const ORDERS_PATH: &str = "/v1/shops/shop-1/orders.json";

/// Path of the Printify catalog endpoint for [`SHOP_ID`].
pub const PRODUCTS_PATH: &str = "/v1/shops/shop-1/products.json";

/// A running bridge with mocked platforms.
pub struct TestBridge {
    pub addr: SocketAddr,
    pub state: AppState,
    pub printify: mockito::ServerGuard,
    pub bigcartel: mockito::ServerGuard,
    pub client: reqwest::Client,
}

impl TestBridge {
    /// Start a bridge with an empty (never built) SKU cache.
    pub async fn start() -> Self {
        Self::launch(None).await
    }

    /// Start a bridge whose Printify URL points at a closed port.
    pub async fn with_unreachable_printify() -> Self {
        Self::launch(Some("http://127.0.0.1:9".to_string())).await
    }

    async fn launch(printify_url: Option<String>) -> Self {
        let printify = mockito::Server::new_async().await;
        let bigcartel = mockito::Server::new_async().await;

        let vars: HashMap<&str, String> = HashMap::from([
            ("PRINTIFY_API_KEY", "test-key".to_string()),
            ("PRINTIFY_SHOP_ID", SHOP_ID.to_string()),
            ("PRINTIFY_API_URL", printify_url.unwrap_or_else(|| printify.url())),
            ("BIGCARTEL_API_TOKEN", "bc-token".to_string()),
            ("BIGCARTEL_STORE_ID", STORE_ID.to_string()),
            ("BIGCARTEL_API_URL", bigcartel.url()),
            ("BIGCARTEL_WEBHOOK_SECRET", WEBHOOK_SECRET.to_string()),
            ("HTTP_TIMEOUT_SECS", "5".to_string()),
        ]);
        let config = BridgeConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();
        let state = AppState::new(config).unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = build_router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            state,
            printify,
            bigcartel,
            client: reqwest::Client::new(),
        }
    }

    /// Start a bridge whose SKU cache was built from `catalog`, a
    /// `products.json` response body.
    pub async fn with_catalog(catalog: serde_json::Value) -> Self {
        let mut bridge = Self::start().await;
        let mock = bridge.mock_catalog(catalog).await;
        bridge
            .state
            .sku_cache()
            .rebuild(bridge.state.printify())
            .await
            .unwrap();
        mock.remove_async().await;
        bridge
    }

    /// Serve `catalog` from the Printify products endpoint, any page.
    pub async fn mock_catalog(&mut self, catalog: serde_json::Value) -> mockito::Mock {
        self.printify
            .mock("GET", PRODUCTS_PATH)
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(catalog.to_string())
            .create_async()
            .await
    }

    /// Absolute URL on the bridge.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Webhook URL carrying `token`.
    #[must_use]
    pub fn webhook_url(&self, token: &str) -> String {
        self.url(&format!("/bigcartel-webhook?token={token}"))
    }
}

/// A single-page catalog: one product per `(product_id, [(variant_id, sku, enabled)])`.
#[must_use]
pub fn catalog(products: &[(&str, &[(u64, &str, bool)])]) -> serde_json::Value {
    let data: Vec<serde_json::Value> = products
        .iter()
        .map(|(id, variants)| {
            serde_json::json!({
                "id": id,
                "title": format!("Product {id}"),
                "variants": variants
                    .iter()
                    .map(|(vid, sku, enabled)| serde_json::json!({
                        "id": vid,
                        "sku": sku,
                        "is_enabled": enabled,
                    }))
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    serde_json::json!({
        "current_page": 1,
        "last_page": 1,
        "data": data,
    })
}
