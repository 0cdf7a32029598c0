//! `POST /order` end to end.

#![allow(clippy::unwrap_used)]

use mockito::Matcher;
use print_bridge_integration_tests::{ORDERS_PATH, TestBridge};
use reqwest::StatusCode;
use serde_json::{Value, json};

fn direct_order() -> Value {
    json!({
        "order_id": "1001",
        "customer_name": "Jane Doe",
        "items": [
            {"printify_product_id": "p1", "printify_variant_id": 11, "quantity": 1},
            {"printify_product_id": "p2", "printify_variant_id": 22, "quantity": 3}
        ],
        "first_name": "Jane",
        "last_name": "Doe",
        "email": "jane@example.com",
        "country": "US",
        "state": "IL",
        "address1": "1 Main St",
        "city": "Springfield",
        "zip": "62701"
    })
}

#[tokio::test]
async fn test_direct_order_is_submitted() {
    let mut bridge = TestBridge::start().await;
    let create = bridge
        .printify
        .mock("POST", ORDERS_PATH)
        .match_body(Matcher::PartialJson(json!({
            "external_id": "1001",
            "label": "Jane Doe",
            "shipping_method": 1,
            "send_shipping_notification": true,
            "line_items": [
                {"product_id": "p1", "variant_id": 11, "quantity": 1},
                {"product_id": "p2", "variant_id": 22, "quantity": 3}
            ],
            "address_to": {"phone": "", "address2": "", "region": "IL"}
        })))
        .with_status(200)
        .with_body(r#"{"id":"5a96f649b2439217d070f507"}"#)
        .expect(1)
        .create_async()
        .await;

    let response = bridge
        .client
        .post(bridge.url("/order"))
        .json(&direct_order())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"success": true, "printify_order": {"id": "5a96f649b2439217d070f507"}})
    );
    create.assert_async().await;
}

#[tokio::test]
async fn test_printify_rejection_is_passed_through() {
    let mut bridge = TestBridge::start().await;
    bridge
        .printify
        .mock("POST", ORDERS_PATH)
        .with_status(400)
        .with_body(r#"{"status":"error","code":8150,"message":"Validation failed."}"#)
        .create_async()
        .await;

    let response = bridge
        .client
        .post(bridge.url("/order"))
        .json(&direct_order())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({"error": {"status": "error", "code": 8150, "message": "Validation failed."}})
    );
}

#[tokio::test]
async fn test_missing_fields_never_reach_printify() {
    let mut bridge = TestBridge::start().await;
    let create = bridge
        .printify
        .mock("POST", ORDERS_PATH)
        .expect(0)
        .create_async()
        .await;

    let mut order = direct_order();
    order.as_object_mut().unwrap().remove("items");

    let response = bridge
        .client
        .post(bridge.url("/order"))
        .json(&order)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "missing field: items");
    create.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_printify_is_generic_server_error() {
    let bridge = TestBridge::with_unreachable_printify().await;

    let response = bridge
        .client
        .post(bridge.url("/order"))
        .json(&direct_order())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Internal server error"}));
}
