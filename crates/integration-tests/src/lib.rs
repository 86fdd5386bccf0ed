//! Integration tests for the catalog admin API.
//!
//! Tests drive the full router (routes, extractors, middleware) in process
//! with `tower::ServiceExt::oneshot` against a [`MemoryCatalog`], so they
//! need neither a database nor a running server.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p catalog-admin-integration-tests
//! ```

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use catalog_admin::db::{MemoryCatalog, ProductRepository};
use catalog_admin::models::ProductFilter;
use catalog_admin::services::IdentityVerifier;
use catalog_admin::{AppState, app};
use catalog_admin_core::{StoreId, UserId};

/// User that owns the stores created by fixtures.
pub const OWNER: &str = "user_owner_2NNEqL2nrIRdJ194";
/// Authenticated user that owns nothing.
pub const OTHER: &str = "user_other_7QxLm2Rt9Vb4Kp3";

pub const SIGN_IN_URL: &str = "/sign-in";

const TEST_SECRET: &str = "it-Kx9$mQ2#vL7@pR4!wZ8&nT3^bY6*cJ1";

/// Decoded response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// JSON body, `Null` when empty, or the raw text when not JSON.
    pub body: Value,
}

impl TestResponse {
    /// `Location` header of a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// `error.code` of an error body.
    #[must_use]
    pub fn error_code(&self) -> &str {
        self.body["error"]["code"].as_str().unwrap_or_default()
    }

    /// `error.message` of an error body.
    #[must_use]
    pub fn error_message(&self) -> &str {
        self.body["error"]["message"].as_str().unwrap_or_default()
    }

    /// `id` of a record body.
    #[must_use]
    pub fn id(&self) -> String {
        self.body["id"]
            .as_str()
            .unwrap_or_else(|| panic!("no id in {}", self.body))
            .to_string()
    }
}

fn verifier(issuer: Option<&str>) -> IdentityVerifier {
    IdentityVerifier::new(
        &SecretString::from(TEST_SECRET.to_string()),
        issuer.map(str::to_string),
    )
}

/// Router plus direct access to the catalog behind it.
pub struct TestContext {
    pub catalog: Arc<MemoryCatalog>,
    identity: IdentityVerifier,
    app: Router,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    #[must_use]
    pub fn new() -> Self {
        Self::with_issuer(None)
    }

    /// Context whose verifier requires tokens from `issuer`.
    #[must_use]
    pub fn with_issuer(issuer: Option<&str>) -> Self {
        let catalog = Arc::new(MemoryCatalog::new());
        let identity = verifier(issuer);
        let state = AppState::new(catalog.clone(), identity.clone(), SIGN_IN_URL);

        Self {
            catalog,
            identity,
            app: app(state),
        }
    }

    /// A valid session token for `user`.
    #[must_use]
    pub fn token(&self, user: &str) -> String {
        self.identity
            .issue(&UserId::parse(user).unwrap(), Duration::from_secs(300))
            .unwrap()
    }

    /// A token signed with the shared key but carrying `issuer` instead of
    /// the one this context expects.
    #[must_use]
    pub fn token_from(&self, issuer: Option<&str>, user: &str) -> String {
        verifier(issuer)
            .issue(&UserId::parse(user).unwrap(), Duration::from_secs(300))
            .unwrap()
    }

    /// Number of successful catalog writes so far.
    #[must_use]
    pub fn writes(&self) -> u64 {
        self.catalog.write_count()
    }

    /// Send a request, authenticated as `user` through the bearer header.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token(user)));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.dispatch(request).await
    }

    /// Send a prepared request.
    pub async fn dispatch(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, user: Option<&str>) -> TestResponse {
        self.send(Method::GET, uri, user, None).await
    }

    pub async fn post(&self, uri: &str, user: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::POST, uri, user, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, user: Option<&str>, body: Value) -> TestResponse {
        self.send(Method::PATCH, uri, user, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, user: Option<&str>) -> TestResponse {
        self.send(Method::DELETE, uri, user, None).await
    }

    // =========================================================================
    // Fixtures
    // =========================================================================

    /// Create a store owned by [`OWNER`] and return its id.
    pub async fn create_store(&self, name: &str) -> String {
        let response = self
            .post("/api/stores", Some(OWNER), json!({ "name": name }))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.id()
    }

    /// Create a store with one billboard, category, size and color.
    pub async fn catalog_fixture(&self) -> Fixture {
        let store_id = self.create_store("Summer Shop").await;

        let billboard_id = self
            .create(
                &store_id,
                "billboards",
                json!({ "label": "Summer", "imageUrl": "https://img.test/summer.png" }),
            )
            .await;
        let category_id = self
            .create(
                &store_id,
                "categories",
                json!({ "name": "Shirts", "billboardId": billboard_id }),
            )
            .await;
        let size_id = self
            .create(&store_id, "sizes", json!({ "name": "Medium", "value": "M" }))
            .await;
        let color_id = self
            .create(&store_id, "colors", json!({ "name": "Red", "value": "#FF0000" }))
            .await;

        Fixture {
            store_id,
            billboard_id,
            category_id,
            size_id,
            color_id,
        }
    }

    /// POST a resource as [`OWNER`] and return its id.
    pub async fn create(&self, store_id: &str, resource: &str, body: Value) -> String {
        let response = self
            .post(&format!("/api/{store_id}/{resource}"), Some(OWNER), body)
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.body);
        response.id()
    }

    /// Products stored for the fixture store, archived included.
    pub async fn stored_product_count(&self, fixture: &Fixture) -> usize {
        let store_id: StoreId = fixture.store_id.parse().unwrap();
        let filter = ProductFilter {
            include_archived: true,
            ..ProductFilter::default()
        };
        self.catalog
            .list_products(store_id, filter)
            .await
            .unwrap()
            .len()
    }

    /// Create a product in the fixture store and return its id.
    pub async fn create_product(&self, fixture: &Fixture, name: &str, price: &str) -> String {
        self.create(&fixture.store_id, "products", fixture.product_body(name, price))
            .await
    }
}

/// Ids created by [`TestContext::catalog_fixture`].
#[derive(Debug, Clone)]
pub struct Fixture {
    pub store_id: String,
    pub billboard_id: String,
    pub category_id: String,
    pub size_id: String,
    pub color_id: String,
}

impl Fixture {
    /// A valid product body using the fixture's category, size and color.
    #[must_use]
    pub fn product_body(&self, name: &str, price: &str) -> Value {
        json!({
            "name": name,
            "price": price,
            "categoryId": self.category_id,
            "colorId": self.color_id,
            "sizeId": self.size_id,
            "images": [{ "url": format!("https://img.test/{name}.png") }],
        })
    }

    /// `/api/{storeId}/{resource}`.
    #[must_use]
    pub fn api(&self, resource: &str) -> String {
        format!("/api/{}/{resource}", self.store_id)
    }
}
