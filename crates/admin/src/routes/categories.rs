//! Category routes. Reads embed the category's billboard.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use catalog_admin_core::CategoryId;

use crate::{
    error::AppError,
    middleware::RequireUser,
    models::{Category, CategoryInput, CategoryWithBillboard},
    services::{references::ensure_billboard, require_store_owner},
    state::AppState,
};

use super::extract::{ApiJson, path_id, store_id};

fn category_id(raw: &str) -> Result<CategoryId, AppError> {
    path_id(raw, "categoryId", "Category id")
}

#[instrument(skip(state, input))]
pub async fn create(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
    ApiJson(input): ApiJson<CategoryInput>,
) -> Result<Json<Category>, AppError> {
    let fields = input.validate()?;
    let store_id = store_id(&raw_store_id)?;
    require_store_owner(state.catalog(), store_id, &user_id).await?;
    ensure_billboard(state.catalog(), store_id, fields.billboard_id).await?;

    let category = state.catalog().create_category(store_id, fields).await?;
    tracing::info!(category_id = %category.id, "Category created");
    Ok(Json(category))
}

#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
) -> Result<Json<Vec<CategoryWithBillboard>>, AppError> {
    let store_id = store_id(&raw_store_id)?;
    Ok(Json(state.catalog().list_categories(store_id).await?))
}

#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((raw_store_id, raw_id)): Path<(String, String)>,
) -> Result<Json<CategoryWithBillboard>, AppError> {
    let store_id = store_id(&raw_store_id)?;
    let id = category_id(&raw_id)?;

    state
        .catalog()
        .get_category(store_id, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Category"))
}

#[instrument(skip(state, input))]
pub async fn update(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path((raw_store_id, raw_id)): Path<(String, String)>,
    ApiJson(input): ApiJson<CategoryInput>,
) -> Result<Json<Category>, AppError> {
    let fields = input.validate()?;
    let store_id = store_id(&raw_store_id)?;
    let id = category_id(&raw_id)?;
    require_store_owner(state.catalog(), store_id, &user_id).await?;
    ensure_billboard(state.catalog(), store_id, fields.billboard_id).await?;

    state
        .catalog()
        .update_category(store_id, id, fields)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Category"))
}

#[instrument(skip(state))]
pub async fn delete(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path((raw_store_id, raw_id)): Path<(String, String)>,
) -> Result<Json<Category>, AppError> {
    let store_id = store_id(&raw_store_id)?;
    let id = category_id(&raw_id)?;
    require_store_owner(state.catalog(), store_id, &user_id).await?;

    state
        .catalog()
        .delete_category(store_id, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Category"))
}
