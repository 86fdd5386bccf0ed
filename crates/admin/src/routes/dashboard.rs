//! Dashboard read views.
//!
//! These serve the admin UI's list pages. Signed-out visitors are redirected
//! to the sign-in page by [`RequireUser`]; a store the caller does not own
//! (or a malformed store id) redirects back to `/dashboard`.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use tracing::instrument;

use catalog_admin_core::{StoreId, UserId};

use crate::{
    columns::{
        BillboardColumn, CategoryColumn, ColorColumn, OrderColumn, ProductColumn, SizeColumn,
        columns,
    },
    db::RepositoryError,
    error::AppError,
    middleware::RequireUser,
    models::{ProductFilter, Store},
    state::AppState,
};

const DASHBOARD: &str = "/dashboard";

fn storage_error(err: RepositoryError) -> Response {
    AppError::from(err).into_response()
}

/// Resolve the path store for the caller, or the response to send instead.
async fn owned_store(
    state: &AppState,
    raw_store_id: &str,
    user_id: &UserId,
) -> Result<Store, Response> {
    let Ok(store_id) = raw_store_id.parse::<StoreId>() else {
        return Err(Redirect::to(DASHBOARD).into_response());
    };

    match state.catalog().find_owned_store(store_id, user_id).await {
        Ok(Some(store)) => Ok(store),
        Ok(None) => {
            tracing::debug!(%store_id, "Store not owned by caller, redirecting");
            Err(Redirect::to(DASHBOARD).into_response())
        }
        Err(e) => Err(storage_error(e)),
    }
}

/// Send the caller to their first store, or report that they have none.
#[instrument(skip(state))]
pub async fn index(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.catalog().first_store(&user_id).await? {
        Some(store) => Ok(Redirect::to(&format!("{DASHBOARD}/{}", store.id)).into_response()),
        None => Ok(Json(json!({ "store": null })).into_response()),
    }
}

#[instrument(skip(state))]
pub async fn store(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
) -> Result<Json<Store>, Response> {
    owned_store(&state, &raw_store_id, &user_id).await.map(Json)
}

#[instrument(skip(state))]
pub async fn billboards(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
) -> Result<Json<Vec<BillboardColumn>>, Response> {
    let store = owned_store(&state, &raw_store_id, &user_id).await?;
    let rows = state
        .catalog()
        .list_billboards(store.id)
        .await
        .map_err(storage_error)?;
    Ok(Json(columns(&rows)))
}

#[instrument(skip(state))]
pub async fn categories(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
) -> Result<Json<Vec<CategoryColumn>>, Response> {
    let store = owned_store(&state, &raw_store_id, &user_id).await?;
    let rows = state
        .catalog()
        .list_categories(store.id)
        .await
        .map_err(storage_error)?;
    Ok(Json(columns(&rows)))
}

#[instrument(skip(state))]
pub async fn sizes(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
) -> Result<Json<Vec<SizeColumn>>, Response> {
    let store = owned_store(&state, &raw_store_id, &user_id).await?;
    let rows = state
        .catalog()
        .list_sizes(store.id)
        .await
        .map_err(storage_error)?;
    Ok(Json(columns(&rows)))
}

#[instrument(skip(state))]
pub async fn colors(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
) -> Result<Json<Vec<ColorColumn>>, Response> {
    let store = owned_store(&state, &raw_store_id, &user_id).await?;
    let rows = state
        .catalog()
        .list_colors(store.id)
        .await
        .map_err(storage_error)?;
    Ok(Json(columns(&rows)))
}

/// Products including archived ones.
#[instrument(skip(state))]
pub async fn products(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
) -> Result<Json<Vec<ProductColumn>>, Response> {
    let store = owned_store(&state, &raw_store_id, &user_id).await?;
    let filter = ProductFilter {
        include_archived: true,
        ..ProductFilter::default()
    };
    let rows = state
        .catalog()
        .list_products(store.id, filter)
        .await
        .map_err(storage_error)?;
    Ok(Json(columns(&rows)))
}

#[instrument(skip(state))]
pub async fn orders(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
) -> Result<Json<Vec<OrderColumn>>, Response> {
    let store = owned_store(&state, &raw_store_id, &user_id).await?;
    let rows = state
        .catalog()
        .list_orders(store.id)
        .await
        .map_err(storage_error)?;
    Ok(Json(columns(&rows)))
}
