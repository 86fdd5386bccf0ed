//! Size routes.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use catalog_admin_core::SizeId;

use crate::{
    error::AppError,
    middleware::RequireUser,
    models::{Size, SizeInput},
    services::require_store_owner,
    state::AppState,
};

use super::extract::{ApiJson, path_id, store_id};

fn size_id(raw: &str) -> Result<SizeId, AppError> {
    path_id(raw, "sizeId", "Size id")
}

#[instrument(skip(state, input))]
pub async fn create(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
    ApiJson(input): ApiJson<SizeInput>,
) -> Result<Json<Size>, AppError> {
    let fields = input.validate()?;
    let store_id = store_id(&raw_store_id)?;
    require_store_owner(state.catalog(), store_id, &user_id).await?;

    Ok(Json(state.catalog().create_size(store_id, fields).await?))
}

#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
) -> Result<Json<Vec<Size>>, AppError> {
    let store_id = store_id(&raw_store_id)?;
    Ok(Json(state.catalog().list_sizes(store_id).await?))
}

#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((raw_store_id, raw_id)): Path<(String, String)>,
) -> Result<Json<Size>, AppError> {
    let store_id = store_id(&raw_store_id)?;
    let id = size_id(&raw_id)?;

    state
        .catalog()
        .get_size(store_id, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Size"))
}

#[instrument(skip(state, input))]
pub async fn update(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path((raw_store_id, raw_id)): Path<(String, String)>,
    ApiJson(input): ApiJson<SizeInput>,
) -> Result<Json<Size>, AppError> {
    let fields = input.validate()?;
    let store_id = store_id(&raw_store_id)?;
    let id = size_id(&raw_id)?;
    require_store_owner(state.catalog(), store_id, &user_id).await?;

    state
        .catalog()
        .update_size(store_id, id, fields)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Size"))
}

#[instrument(skip(state))]
pub async fn delete(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path((raw_store_id, raw_id)): Path<(String, String)>,
) -> Result<Json<Size>, AppError> {
    let store_id = store_id(&raw_store_id)?;
    let id = size_id(&raw_id)?;
    require_store_owner(state.catalog(), store_id, &user_id).await?;

    state
        .catalog()
        .delete_size(store_id, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Size"))
}
