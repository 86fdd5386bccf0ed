//! Integration tests for orders.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use catalog_admin_integration_tests::{OTHER, OWNER, TestContext};

#[tokio::test]
async fn test_create_order_and_read_items() {
    let ctx = TestContext::new();
    let fixture = ctx.catalog_fixture().await;
    let tee = ctx.create_product(&fixture, "Tee", "10.00").await;
    let cap = ctx.create_product(&fixture, "Cap", "15.50").await;

    let created = ctx
        .post(
            &fixture.api("orders"),
            Some(OWNER),
            json!({ "productIds": [tee, cap], "phone": "555-0100", "address": "1 Main St" }),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["isPaid"], false);
    assert_eq!(created.body["phone"], "555-0100");
    let id = created.id();

    let fetched = ctx.get(&format!("{}/{id}", fixture.api("orders")), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    let items = fetched.body["orderItems"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["product"]["name"], "Tee");
    assert_eq!(items[1]["product"]["price"], "15.50");
}

#[tokio::test]
async fn test_order_requires_products() {
    let ctx = TestContext::new();
    let fixture = ctx.catalog_fixture().await;

    let response = ctx
        .post(&fixture.api("orders"), Some(OWNER), json!({ "productIds": [] }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_message(), "Product ids are required");
}

#[tokio::test]
async fn test_order_products_must_be_in_store() {
    let ctx = TestContext::new();
    let fixture = ctx.catalog_fixture().await;
    let writes = ctx.writes();
    let stranger = fixture.category_id.clone();

    let response = ctx
        .post(
            &fixture.api("orders"),
            Some(OWNER),
            json!({ "productIds": [stranger] }),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.error_message(),
        format!("Product {} not found", fixture.category_id)
    );
    assert_eq!(ctx.writes(), writes);
}

#[tokio::test]
async fn test_patch_order_payment_status() {
    let ctx = TestContext::new();
    let fixture = ctx.catalog_fixture().await;
    let tee = ctx.create_product(&fixture, "Tee", "10.00").await;
    let id = ctx
        .create(
            &fixture.store_id,
            "orders",
            json!({ "productIds": [tee], "phone": "555-0100" }),
        )
        .await;
    let uri = format!("{}/{id}", fixture.api("orders"));

    let paid = ctx.patch(&uri, Some(OWNER), json!({ "isPaid": true })).await;
    assert_eq!(paid.status, StatusCode::OK);
    assert_eq!(paid.body["isPaid"], true);
    assert_eq!(paid.body["phone"], "555-0100");

    let untouched = ctx.patch(&uri, Some(OWNER), json!({})).await;
    assert_eq!(untouched.status, StatusCode::OK);
    assert_eq!(untouched.body["isPaid"], true);

    let forbidden = ctx.patch(&uri, Some(OTHER), json!({ "isPaid": false })).await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_ordered_product_cannot_be_deleted_until_order_is() {
    let ctx = TestContext::new();
    let fixture = ctx.catalog_fixture().await;
    let tee = ctx.create_product(&fixture, "Tee", "10.00").await;
    let order = ctx
        .create(&fixture.store_id, "orders", json!({ "productIds": [tee] }))
        .await;
    let product_uri = format!("{}/{tee}", fixture.api("products"));

    let blocked = ctx.delete(&product_uri, Some(OWNER)).await;
    assert_eq!(blocked.status, StatusCode::CONFLICT);
    assert_eq!(
        blocked.error_message(),
        "Remove all orders containing this product first"
    );

    let deleted = ctx
        .delete(&format!("{}/{order}", fixture.api("orders")), Some(OWNER))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    assert_eq!(ctx.delete(&product_uri, Some(OWNER)).await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_missing_order_is_not_found() {
    let ctx = TestContext::new();
    let fixture = ctx.catalog_fixture().await;

    let response = ctx
        .get(&format!("{}/{}", fixture.api("orders"), fixture.size_id), None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_message(), "Order not found");
}
