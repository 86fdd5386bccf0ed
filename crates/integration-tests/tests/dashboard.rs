//! Integration tests for the dashboard views and their redirects.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use catalog_admin_integration_tests::{OTHER, OWNER, SIGN_IN_URL, TestContext};

#[tokio::test]
async fn test_signed_out_visitor_is_sent_to_sign_in() {
    let ctx = TestContext::new();

    let response = ctx.get("/dashboard", None).await;

    assert!(response.status.is_redirection());
    assert_eq!(response.location(), Some(SIGN_IN_URL));
}

#[tokio::test]
async fn test_user_without_store_gets_null() {
    let ctx = TestContext::new();

    let response = ctx.get("/dashboard", Some(OWNER)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "store": null }));
}

#[tokio::test]
async fn test_user_is_sent_to_first_store() {
    let ctx = TestContext::new();
    let first = ctx.create_store("First").await;
    ctx.create_store("Second").await;

    let response = ctx.get("/dashboard", Some(OWNER)).await;

    assert!(response.status.is_redirection());
    let expected = format!("/dashboard/{first}");
    assert_eq!(response.location(), Some(expected.as_str()));
}

#[tokio::test]
async fn test_non_owner_is_sent_back_to_dashboard() {
    let ctx = TestContext::new();
    let store_id = ctx.create_store("Mine").await;

    for path in ["", "/billboards", "/products", "/orders"] {
        let response = ctx
            .get(&format!("/dashboard/{store_id}{path}"), Some(OTHER))
            .await;
        assert!(response.status.is_redirection(), "{path}");
        assert_eq!(response.location(), Some("/dashboard"));
    }

    let malformed = ctx.get("/dashboard/not-a-store", Some(OWNER)).await;
    assert_eq!(malformed.location(), Some("/dashboard"));
}

#[tokio::test]
async fn test_store_view() {
    let ctx = TestContext::new();
    let store_id = ctx.create_store("Mine").await;

    let response = ctx.get(&format!("/dashboard/{store_id}"), Some(OWNER)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Mine");
}

#[tokio::test]
async fn test_category_rows_carry_billboard_label() {
    let ctx = TestContext::new();
    let fixture = ctx.catalog_fixture().await;

    let response = ctx
        .get(
            &format!("/dashboard/{}/categories", fixture.store_id),
            Some(OWNER),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body[0]["name"], "Shirts");
    assert_eq!(response.body[0]["billboardLabel"], "Summer");
    assert!(response.body[0]["createdAt"].as_str().unwrap().contains(", "));
}

#[tokio::test]
async fn test_product_rows_include_archived_and_format_price() {
    let ctx = TestContext::new();
    let fixture = ctx.catalog_fixture().await;
    ctx.create_product(&fixture, "Tee", "1234.5").await;
    let mut archived = fixture.product_body("Old Tee", "5.00");
    archived["isArchived"] = json!(true);
    ctx.create(&fixture.store_id, "products", archived).await;

    let response = ctx
        .get(&format!("/dashboard/{}/products", fixture.store_id), Some(OWNER))
        .await;

    let rows = response.body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Old Tee");
    assert_eq!(rows[0]["isArchived"], true);
    assert_eq!(rows[1]["price"], "$1,234.50");
    assert_eq!(rows[1]["category"], "Shirts");
    assert_eq!(rows[1]["size"], "Medium");
    assert_eq!(rows[1]["color"], "Red");
}

#[tokio::test]
async fn test_order_rows_total_and_list_products() {
    let ctx = TestContext::new();
    let fixture = ctx.catalog_fixture().await;
    let tee = ctx.create_product(&fixture, "Tee", "10.00").await;
    let cap = ctx.create_product(&fixture, "Cap", "15.50").await;
    ctx.create(
        &fixture.store_id,
        "orders",
        json!({ "productIds": [tee, cap], "phone": "555-0100", "address": "1 Main St" }),
    )
    .await;

    let response = ctx
        .get(&format!("/dashboard/{}/orders", fixture.store_id), Some(OWNER))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let row = &response.body[0];
    assert_eq!(row["products"], "Tee, Cap");
    assert_eq!(row["totalPrice"], "$25.50");
    assert_eq!(row["isPaid"], false);
    assert_eq!(row["address"], "1 Main St");
}

#[tokio::test]
async fn test_size_and_color_rows() {
    let ctx = TestContext::new();
    let fixture = ctx.catalog_fixture().await;

    let sizes = ctx
        .get(&format!("/dashboard/{}/sizes", fixture.store_id), Some(OWNER))
        .await;
    assert_eq!(sizes.body[0]["value"], "M");

    let colors = ctx
        .get(&format!("/dashboard/{}/colors", fixture.store_id), Some(OWNER))
        .await;
    assert_eq!(colors.body[0]["value"], "#FF0000");

    let billboards = ctx
        .get(&format!("/dashboard/{}/billboards", fixture.store_id), Some(OWNER))
        .await;
    assert_eq!(billboards.body[0]["label"], "Summer");
}
