//! Integration tests for store management and the ownership guard.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use catalog_admin_integration_tests::{OTHER, OWNER, TestContext};

#[tokio::test]
async fn test_create_store_belongs_to_caller() {
    let ctx = TestContext::new();

    let response = ctx
        .post("/api/stores", Some(OWNER), json!({ "name": "  Summer Shop " }))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "Summer Shop");
    assert_eq!(response.body["userId"], OWNER);
    assert!(response.body["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_store_requires_authentication() {
    let ctx = TestContext::new();

    let response = ctx
        .post("/api/stores", None, json!({ "name": "Summer Shop" }))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNAUTHENTICATED");
    assert_eq!(ctx.writes(), 0);
}

#[tokio::test]
async fn test_invalid_token_is_unauthenticated() {
    let ctx = TestContext::new();

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/stores")
        .header("authorization", "Bearer not.a.token")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(r#"{"name":"Shop"}"#))
        .unwrap();
    let response = ctx.dispatch(request).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(ctx.writes(), 0);
}

#[tokio::test]
async fn test_configured_issuer_is_required() {
    let ctx = TestContext::with_issuer(Some("https://id.example.test"));

    for token in [
        ctx.token_from(None, OWNER),
        ctx.token_from(Some("https://other.example.test"), OWNER),
    ] {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri("/api/stores")
            .header("authorization", format!("Bearer {token}"))
            .header("content-type", "application/json")
            .body(axum::body::Body::from(r#"{"name":"Shop"}"#))
            .unwrap();
        let response = ctx.dispatch(request).await;

        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }
    assert_eq!(ctx.writes(), 0);

    let accepted = ctx
        .post("/api/stores", Some(OWNER), json!({ "name": "Shop" }))
        .await;
    assert_eq!(accepted.status, StatusCode::OK);
}

#[tokio::test]
async fn test_session_cookie_authenticates() {
    let ctx = TestContext::new();

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/stores")
        .header("cookie", format!("__session={}", ctx.token(OWNER)))
        .header("content-type", "application/json")
        .body(axum::body::Body::from(r#"{"name":"Cookie Shop"}"#))
        .unwrap();
    let response = ctx.dispatch(request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["userId"], OWNER);
}

#[tokio::test]
async fn test_create_store_requires_name() {
    let ctx = TestContext::new();

    let response = ctx.post("/api/stores", Some(OWNER), json!({ "name": "   " })).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
    assert_eq!(response.error_message(), "Name is required");
    assert_eq!(response.body["error"]["field"], "name");
    assert_eq!(ctx.writes(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let ctx = TestContext::new();

    let request = axum::http::Request::builder()
        .method("POST")
        .uri("/api/stores")
        .header("authorization", format!("Bearer {}", ctx.token(OWNER)))
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"name\":"))
        .unwrap();
    let response = ctx.dispatch(request).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "BAD_REQUEST");
    assert_eq!(ctx.writes(), 0);
}

#[tokio::test]
async fn test_list_stores_only_returns_callers_stores_oldest_first() {
    let ctx = TestContext::new();
    let first = ctx.create_store("First").await;
    let second = ctx.create_store("Second").await;
    ctx.post("/api/stores", Some(OTHER), json!({ "name": "Elsewhere" }))
        .await;

    let response = ctx.get("/api/stores", Some(OWNER)).await;

    assert_eq!(response.status, StatusCode::OK);
    let ids: Vec<&str> = response
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec![first.as_str(), second.as_str()]);
}

#[tokio::test]
async fn test_rename_store() {
    let ctx = TestContext::new();
    let store_id = ctx.create_store("Old Name").await;

    let response = ctx
        .patch(
            &format!("/api/stores/{store_id}"),
            Some(OWNER),
            json!({ "name": "New Name" }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["name"], "New Name");

    let fetched = ctx.get(&format!("/api/stores/{store_id}"), Some(OWNER)).await;
    assert_eq!(fetched.body["name"], "New Name");
}

#[tokio::test]
async fn test_other_user_cannot_touch_store() {
    let ctx = TestContext::new();
    let store_id = ctx.create_store("Mine").await;
    let writes = ctx.writes();

    let read = ctx.get(&format!("/api/stores/{store_id}"), Some(OTHER)).await;
    assert_eq!(read.status, StatusCode::FORBIDDEN);
    assert_eq!(read.error_code(), "UNAUTHORIZED");

    let rename = ctx
        .patch(
            &format!("/api/stores/{store_id}"),
            Some(OTHER),
            json!({ "name": "Stolen" }),
        )
        .await;
    assert_eq!(rename.status, StatusCode::FORBIDDEN);

    let delete = ctx.delete(&format!("/api/stores/{store_id}"), Some(OTHER)).await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    assert_eq!(ctx.writes(), writes);
}

#[tokio::test]
async fn test_store_with_catalog_rows_cannot_be_deleted() {
    let ctx = TestContext::new();
    let fixture = ctx.catalog_fixture().await;

    let response = ctx
        .delete(&format!("/api/stores/{}", fixture.store_id), Some(OWNER))
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(
        response.error_message(),
        "Remove all catalog data from this store first"
    );
}

#[tokio::test]
async fn test_delete_empty_store() {
    let ctx = TestContext::new();
    let store_id = ctx.create_store("Temporary").await;

    let response = ctx.delete(&format!("/api/stores/{store_id}"), Some(OWNER)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], store_id.as_str());

    // A deleted store is no longer owned by anyone.
    let again = ctx.delete(&format!("/api/stores/{store_id}"), Some(OWNER)).await;
    assert_eq!(again.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_malformed_store_id_is_rejected() {
    let ctx = TestContext::new();

    let response = ctx
        .patch("/api/stores/not-a-uuid", Some(OWNER), json!({ "name": "X" }))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_message(), "Store id is invalid");
}
