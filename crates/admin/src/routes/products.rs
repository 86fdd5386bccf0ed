//! Product routes.
//!
//! Public listings accept `categoryId`, `colorId`, `sizeId` and `isFeatured`
//! query filters and never include archived products. Reads embed images,
//! category, size and color.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use catalog_admin_core::ProductId;

use crate::{
    error::AppError,
    middleware::RequireUser,
    models::{Product, ProductDetails, ProductInput, ProductListQuery},
    services::{references::ensure_product_references, require_store_owner},
    state::AppState,
};

use super::extract::{ApiJson, path_id, store_id};

fn product_id(raw: &str) -> Result<ProductId, AppError> {
    path_id(raw, "productId", "Product id")
}

/// Create a product with its images.
#[instrument(skip(state, input))]
pub async fn create(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
    ApiJson(input): ApiJson<ProductInput>,
) -> Result<Json<Product>, AppError> {
    let fields = input.validate()?;
    let store_id = store_id(&raw_store_id)?;
    require_store_owner(state.catalog(), store_id, &user_id).await?;
    ensure_product_references(state.catalog(), store_id, &fields).await?;

    let image_count = fields.images.len();
    let product = state.catalog().create_product(store_id, fields).await?;
    tracing::info!(product_id = %product.id, image_count, "Product created");
    Ok(Json(product))
}

#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<Vec<ProductDetails>>, AppError> {
    let store_id = store_id(&raw_store_id)?;
    let filter = query.into_filter()?;
    Ok(Json(state.catalog().list_products(store_id, filter).await?))
}

#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((raw_store_id, raw_id)): Path<(String, String)>,
) -> Result<Json<ProductDetails>, AppError> {
    let store_id = store_id(&raw_store_id)?;
    let id = product_id(&raw_id)?;

    state
        .catalog()
        .get_product(store_id, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Product"))
}

/// Replace a product's fields and its whole image set.
#[instrument(skip(state, input))]
pub async fn update(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path((raw_store_id, raw_id)): Path<(String, String)>,
    ApiJson(input): ApiJson<ProductInput>,
) -> Result<Json<Product>, AppError> {
    let fields = input.validate()?;
    let store_id = store_id(&raw_store_id)?;
    let id = product_id(&raw_id)?;
    require_store_owner(state.catalog(), store_id, &user_id).await?;
    ensure_product_references(state.catalog(), store_id, &fields).await?;

    state
        .catalog()
        .update_product(store_id, id, fields)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Product"))
}

/// Delete a product and its images. Products on an order cannot be deleted.
#[instrument(skip(state))]
pub async fn delete(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path((raw_store_id, raw_id)): Path<(String, String)>,
) -> Result<Json<Product>, AppError> {
    let store_id = store_id(&raw_store_id)?;
    let id = product_id(&raw_id)?;
    require_store_owner(state.catalog(), store_id, &user_id).await?;

    state
        .catalog()
        .delete_product(store_id, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Product"))
}
