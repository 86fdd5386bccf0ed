//! HTTP route handlers for the catalog API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                              - Liveness
//! GET  /health/ready                        - Catalog readiness
//!
//! # Stores (auth)
//! POST   /api/stores                        - Create store
//! GET    /api/stores                        - Caller's stores
//! GET    /api/stores/{storeId}              - Store (owner)
//! PATCH  /api/stores/{storeId}              - Rename store (owner)
//! DELETE /api/stores/{storeId}              - Delete empty store (owner)
//!
//! # Store resources
//! # (GET is public; POST/PATCH/DELETE need auth and ownership)
//! POST/GET          /api/{storeId}/billboards
//! GET/PATCH/DELETE  /api/{storeId}/billboards/{billboardId}
//! POST/GET          /api/{storeId}/categories
//! GET/PATCH/DELETE  /api/{storeId}/categories/{categoryId}
//! POST/GET          /api/{storeId}/sizes
//! GET/PATCH/DELETE  /api/{storeId}/sizes/{sizeId}
//! POST/GET          /api/{storeId}/colors
//! GET/PATCH/DELETE  /api/{storeId}/colors/{colorId}
//! POST/GET          /api/{storeId}/products
//! GET/PATCH/DELETE  /api/{storeId}/products/{productId}
//! POST/GET          /api/{storeId}/orders
//! GET/PATCH/DELETE  /api/{storeId}/orders/{orderId}
//!
//! # Dashboard views (auth, redirects)
//! GET  /dashboard                           - Redirect to first store
//! GET  /dashboard/{storeId}                 - Store
//! GET  /dashboard/{storeId}/billboards      - Billboard rows
//! GET  /dashboard/{storeId}/categories      - Category rows
//! GET  /dashboard/{storeId}/sizes           - Size rows
//! GET  /dashboard/{storeId}/colors          - Color rows
//! GET  /dashboard/{storeId}/products        - Product rows (archived included)
//! GET  /dashboard/{storeId}/orders          - Order rows
//! ```

pub mod billboards;
pub mod categories;
pub mod colors;
pub mod dashboard;
pub mod extract;
pub mod health;
pub mod orders;
pub mod products;
pub mod sizes;
pub mod stores;

use std::time::Duration;

use axum::{
    Router,
    http::{Request, Response},
    routing::get,
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Store management routes, nested under `/api/stores`.
fn store_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(stores::list).post(stores::create))
        .route(
            "/{store_id}",
            get(stores::show)
                .patch(stores::update)
                .delete(stores::delete),
        )
}

/// Per-store catalog routes, nested under `/api/{store_id}`.
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/billboards",
            get(billboards::list).post(billboards::create),
        )
        .route(
            "/billboards/{billboard_id}",
            get(billboards::show)
                .patch(billboards::update)
                .delete(billboards::delete),
        )
        .route(
            "/categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/categories/{category_id}",
            get(categories::show)
                .patch(categories::update)
                .delete(categories::delete),
        )
        .route("/sizes", get(sizes::list).post(sizes::create))
        .route(
            "/sizes/{size_id}",
            get(sizes::show).patch(sizes::update).delete(sizes::delete),
        )
        .route("/colors", get(colors::list).post(colors::create))
        .route(
            "/colors/{color_id}",
            get(colors::show).patch(colors::update).delete(colors::delete),
        )
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{product_id}",
            get(products::show)
                .patch(products::update)
                .delete(products::delete),
        )
        .route("/orders", get(orders::list).post(orders::create))
        .route(
            "/orders/{order_id}",
            get(orders::show).patch(orders::update).delete(orders::delete),
        )
}

/// Dashboard views, nested under `/dashboard`.
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/{store_id}", get(dashboard::store))
        .route("/{store_id}/billboards", get(dashboard::billboards))
        .route("/{store_id}/categories", get(dashboard::categories))
        .route("/{store_id}/sizes", get(dashboard::sizes))
        .route("/{store_id}/colors", get(dashboard::colors))
        .route("/{store_id}/products", get(dashboard::products))
        .route("/{store_id}/orders", get(dashboard::orders))
}

/// All routes without state or middleware.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api/stores", store_routes())
        .nest("/api/{store_id}", catalog_routes())
        .route("/dashboard", get(dashboard::index))
        .nest("/dashboard", dashboard_routes())
}

/// Build the full application: routes, state, tracing and request ids.
///
/// Sentry layers are added by the binary, outside this router, so tests can
/// drive it without a Sentry client.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        user_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &Response<_>, latency: Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
