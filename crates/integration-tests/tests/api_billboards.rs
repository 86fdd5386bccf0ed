//! Integration tests for billboards, including check ordering.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use catalog_admin_integration_tests::{OTHER, OWNER, TestContext};

#[tokio::test]
async fn test_billboard_lifecycle() {
    let ctx = TestContext::new();
    let store_id = ctx.create_store("Shop").await;
    let base = format!("/api/{store_id}/billboards");

    let created = ctx
        .post(
            &base,
            Some(OWNER),
            json!({ "label": "Summer", "imageUrl": "https://img.test/summer.png" }),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.body["storeId"], store_id.as_str());
    let id = created.id();

    // Reads are public.
    let fetched = ctx.get(&format!("{base}/{id}"), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["label"], "Summer");
    assert_eq!(fetched.body["imageUrl"], "https://img.test/summer.png");

    let updated = ctx
        .patch(
            &format!("{base}/{id}"),
            Some(OWNER),
            json!({ "label": "Autumn", "imageUrl": "https://img.test/autumn.png" }),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["label"], "Autumn");

    let deleted = ctx.delete(&format!("{base}/{id}"), Some(OWNER)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["id"], id.as_str());

    let gone = ctx.get(&format!("{base}/{id}"), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.error_message(), "Billboard not found");
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let ctx = TestContext::new();
    let store_id = ctx.create_store("Shop").await;
    for label in ["One", "Two", "Three"] {
        ctx.create(
            &store_id,
            "billboards",
            json!({ "label": label, "imageUrl": "https://img.test/x.png" }),
        )
        .await;
    }

    let response = ctx.get(&format!("/api/{store_id}/billboards"), None).await;

    let labels: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Three", "Two", "One"]);
}

#[tokio::test]
async fn test_required_fields_in_declaration_order() {
    let ctx = TestContext::new();
    let store_id = ctx.create_store("Shop").await;
    let base = format!("/api/{store_id}/billboards");
    let writes = ctx.writes();

    let neither = ctx.post(&base, Some(OWNER), json!({})).await;
    assert_eq!(neither.status, StatusCode::BAD_REQUEST);
    assert_eq!(neither.error_message(), "Label is required");

    let no_image = ctx.post(&base, Some(OWNER), json!({ "label": "Summer" })).await;
    assert_eq!(no_image.error_message(), "Image URL is required");
    assert_eq!(no_image.body["error"]["field"], "imageUrl");

    assert_eq!(ctx.writes(), writes);
}

#[tokio::test]
async fn test_authentication_is_checked_before_the_body() {
    let ctx = TestContext::new();
    let store_id = ctx.create_store("Shop").await;

    let response = ctx
        .post(&format!("/api/{store_id}/billboards"), None, json!({}))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_body_is_checked_before_ownership() {
    let ctx = TestContext::new();
    let store_id = ctx.create_store("Shop").await;

    let response = ctx
        .post(&format!("/api/{store_id}/billboards"), Some(OTHER), json!({}))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_message(), "Label is required");
}

#[tokio::test]
async fn test_non_owner_mutations_are_forbidden_without_writes() {
    let ctx = TestContext::new();
    let store_id = ctx.create_store("Shop").await;
    let id = ctx
        .create(
            &store_id,
            "billboards",
            json!({ "label": "Summer", "imageUrl": "https://img.test/s.png" }),
        )
        .await;
    let writes = ctx.writes();
    let body = json!({ "label": "Hacked", "imageUrl": "https://img.test/h.png" });

    let create = ctx
        .post(&format!("/api/{store_id}/billboards"), Some(OTHER), body.clone())
        .await;
    assert_eq!(create.status, StatusCode::FORBIDDEN);
    assert_eq!(create.error_message(), "Unauthorized");

    let update = ctx
        .patch(&format!("/api/{store_id}/billboards/{id}"), Some(OTHER), body)
        .await;
    assert_eq!(update.status, StatusCode::FORBIDDEN);

    let delete = ctx
        .delete(&format!("/api/{store_id}/billboards/{id}"), Some(OTHER))
        .await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    assert_eq!(ctx.writes(), writes);
}

#[tokio::test]
async fn test_repeated_delete_is_not_found() {
    let ctx = TestContext::new();
    let store_id = ctx.create_store("Shop").await;
    let id = ctx
        .create(
            &store_id,
            "billboards",
            json!({ "label": "Summer", "imageUrl": "https://img.test/s.png" }),
        )
        .await;
    let uri = format!("/api/{store_id}/billboards/{id}");

    assert_eq!(ctx.delete(&uri, Some(OWNER)).await.status, StatusCode::OK);
    let again = ctx.delete(&uri, Some(OWNER)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.error_code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_billboard_from_another_store_is_not_found() {
    let ctx = TestContext::new();
    let store_a = ctx.create_store("A").await;
    let store_b = ctx.create_store("B").await;
    let id = ctx
        .create(
            &store_a,
            "billboards",
            json!({ "label": "Summer", "imageUrl": "https://img.test/s.png" }),
        )
        .await;

    let response = ctx.get(&format!("/api/{store_b}/billboards/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_billboard_id() {
    let ctx = TestContext::new();
    let store_id = ctx.create_store("Shop").await;

    let response = ctx
        .get(&format!("/api/{store_id}/billboards/nope"), None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_message(), "Billboard id is invalid");
}

#[tokio::test]
async fn test_billboard_in_use_cannot_be_deleted() {
    let ctx = TestContext::new();
    let fixture = ctx.catalog_fixture().await;

    let response = ctx
        .delete(
            &format!("{}/{}", fixture.api("billboards"), fixture.billboard_id),
            Some(OWNER),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.error_message(),
        "Remove all categories using this billboard first"
    );

    let still_there = ctx
        .get(
            &format!("{}/{}", fixture.api("billboards"), fixture.billboard_id),
            None,
        )
        .await;
    assert_eq!(still_there.status, StatusCode::OK);
}
