//! Store (tenant) routes.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use crate::{
    error::AppError,
    middleware::RequireUser,
    models::{Store, StoreInput},
    services::require_store_owner,
    state::AppState,
};

use super::extract::{ApiJson, store_id};

/// Create a store owned by the caller.
#[instrument(skip(state, input))]
pub async fn create(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    ApiJson(input): ApiJson<StoreInput>,
) -> Result<Json<Store>, AppError> {
    let fields = input.validate()?;
    let store = state.catalog().create_store(&user_id, fields).await?;
    tracing::info!(store_id = %store.id, "Store created");
    Ok(Json(store))
}

/// Stores owned by the caller.
#[instrument(skip(state))]
pub async fn list(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Store>>, AppError> {
    Ok(Json(state.catalog().list_stores(&user_id).await?))
}

#[instrument(skip(state))]
pub async fn show(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
) -> Result<Json<Store>, AppError> {
    let store_id = store_id(&raw_store_id)?;
    let store = require_store_owner(state.catalog(), store_id, &user_id).await?;
    Ok(Json(store))
}

/// Rename a store.
#[instrument(skip(state, input))]
pub async fn update(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
    ApiJson(input): ApiJson<StoreInput>,
) -> Result<Json<Store>, AppError> {
    let fields = input.validate()?;
    let store_id = store_id(&raw_store_id)?;
    require_store_owner(state.catalog(), store_id, &user_id).await?;

    state
        .catalog()
        .update_store(store_id, fields)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Store"))
}

/// Delete a store. Fails with a conflict while it still holds catalog rows.
#[instrument(skip(state))]
pub async fn delete(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
) -> Result<Json<Store>, AppError> {
    let store_id = store_id(&raw_store_id)?;
    require_store_owner(state.catalog(), store_id, &user_id).await?;

    let store = state
        .catalog()
        .delete_store(store_id)
        .await?
        .ok_or(AppError::NotFound("Store"))?;
    tracing::info!(%store_id, "Store deleted");
    Ok(Json(store))
}
