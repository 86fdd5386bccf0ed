//! Color routes. Values are hex codes such as `#FF0000`.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use catalog_admin_core::ColorId;

use crate::{
    error::AppError,
    middleware::RequireUser,
    models::{Color, ColorInput},
    services::require_store_owner,
    state::AppState,
};

use super::extract::{ApiJson, path_id, store_id};

fn color_id(raw: &str) -> Result<ColorId, AppError> {
    path_id(raw, "colorId", "Color id")
}

#[instrument(skip(state, input))]
pub async fn create(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
    ApiJson(input): ApiJson<ColorInput>,
) -> Result<Json<Color>, AppError> {
    let fields = input.validate()?;
    let store_id = store_id(&raw_store_id)?;
    require_store_owner(state.catalog(), store_id, &user_id).await?;

    Ok(Json(state.catalog().create_color(store_id, fields).await?))
}

#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
) -> Result<Json<Vec<Color>>, AppError> {
    let store_id = store_id(&raw_store_id)?;
    Ok(Json(state.catalog().list_colors(store_id).await?))
}

#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((raw_store_id, raw_id)): Path<(String, String)>,
) -> Result<Json<Color>, AppError> {
    let store_id = store_id(&raw_store_id)?;
    let id = color_id(&raw_id)?;

    state
        .catalog()
        .get_color(store_id, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Color"))
}

#[instrument(skip(state, input))]
pub async fn update(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path((raw_store_id, raw_id)): Path<(String, String)>,
    ApiJson(input): ApiJson<ColorInput>,
) -> Result<Json<Color>, AppError> {
    let fields = input.validate()?;
    let store_id = store_id(&raw_store_id)?;
    let id = color_id(&raw_id)?;
    require_store_owner(state.catalog(), store_id, &user_id).await?;

    state
        .catalog()
        .update_color(store_id, id, fields)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Color"))
}

#[instrument(skip(state))]
pub async fn delete(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path((raw_store_id, raw_id)): Path<(String, String)>,
) -> Result<Json<Color>, AppError> {
    let store_id = store_id(&raw_store_id)?;
    let id = color_id(&raw_id)?;
    require_store_owner(state.catalog(), store_id, &user_id).await?;

    state
        .catalog()
        .delete_color(store_id, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Color"))
}
