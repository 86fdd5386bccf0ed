//! Billboard routes.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use catalog_admin_core::BillboardId;

use crate::{
    error::AppError,
    middleware::RequireUser,
    models::{Billboard, BillboardInput},
    services::require_store_owner,
    state::AppState,
};

use super::extract::{ApiJson, path_id, store_id};

fn billboard_id(raw: &str) -> Result<BillboardId, AppError> {
    path_id(raw, "billboardId", "Billboard id")
}

#[instrument(skip(state, input))]
pub async fn create(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
    ApiJson(input): ApiJson<BillboardInput>,
) -> Result<Json<Billboard>, AppError> {
    let fields = input.validate()?;
    let store_id = store_id(&raw_store_id)?;
    require_store_owner(state.catalog(), store_id, &user_id).await?;

    let billboard = state.catalog().create_billboard(store_id, fields).await?;
    tracing::info!(billboard_id = %billboard.id, "Billboard created");
    Ok(Json(billboard))
}

/// Public listing, newest first.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
) -> Result<Json<Vec<Billboard>>, AppError> {
    let store_id = store_id(&raw_store_id)?;
    Ok(Json(state.catalog().list_billboards(store_id).await?))
}

#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((raw_store_id, raw_id)): Path<(String, String)>,
) -> Result<Json<Billboard>, AppError> {
    let store_id = store_id(&raw_store_id)?;
    let id = billboard_id(&raw_id)?;

    state
        .catalog()
        .get_billboard(store_id, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Billboard"))
}

#[instrument(skip(state, input))]
pub async fn update(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path((raw_store_id, raw_id)): Path<(String, String)>,
    ApiJson(input): ApiJson<BillboardInput>,
) -> Result<Json<Billboard>, AppError> {
    let fields = input.validate()?;
    let store_id = store_id(&raw_store_id)?;
    let id = billboard_id(&raw_id)?;
    require_store_owner(state.catalog(), store_id, &user_id).await?;

    state
        .catalog()
        .update_billboard(store_id, id, fields)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Billboard"))
}

/// Delete a billboard. Categories still pointing at it make this a conflict.
#[instrument(skip(state))]
pub async fn delete(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path((raw_store_id, raw_id)): Path<(String, String)>,
) -> Result<Json<Billboard>, AppError> {
    let store_id = store_id(&raw_store_id)?;
    let id = billboard_id(&raw_id)?;
    require_store_owner(state.catalog(), store_id, &user_id).await?;

    state
        .catalog()
        .delete_billboard(store_id, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Billboard"))
}
