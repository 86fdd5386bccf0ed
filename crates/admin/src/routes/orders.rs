//! Order routes. Reads embed each item's product.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use catalog_admin_core::OrderId;

use crate::{
    error::AppError,
    middleware::RequireUser,
    models::{Order, OrderDetails, OrderInput, OrderUpdateInput},
    services::{references::ensure_products, require_store_owner},
    state::AppState,
};

use super::extract::{ApiJson, path_id, store_id};

fn order_id(raw: &str) -> Result<OrderId, AppError> {
    path_id(raw, "orderId", "Order id")
}

/// Record an order with one item per product id.
#[instrument(skip(state, input))]
pub async fn create(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
    ApiJson(input): ApiJson<OrderInput>,
) -> Result<Json<Order>, AppError> {
    let fields = input.validate()?;
    let store_id = store_id(&raw_store_id)?;
    require_store_owner(state.catalog(), store_id, &user_id).await?;
    ensure_products(state.catalog(), store_id, &fields.product_ids).await?;

    let item_count = fields.product_ids.len();
    let order = state.catalog().create_order(store_id, fields).await?;
    tracing::info!(order_id = %order.id, item_count, "Order created");
    Ok(Json(order))
}

#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Path(raw_store_id): Path<String>,
) -> Result<Json<Vec<OrderDetails>>, AppError> {
    let store_id = store_id(&raw_store_id)?;
    Ok(Json(state.catalog().list_orders(store_id).await?))
}

#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((raw_store_id, raw_id)): Path<(String, String)>,
) -> Result<Json<OrderDetails>, AppError> {
    let store_id = store_id(&raw_store_id)?;
    let id = order_id(&raw_id)?;

    state
        .catalog()
        .get_order(store_id, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Order"))
}

/// Patch contact details or payment status. Absent fields are unchanged.
#[instrument(skip(state, input))]
pub async fn update(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path((raw_store_id, raw_id)): Path<(String, String)>,
    ApiJson(input): ApiJson<OrderUpdateInput>,
) -> Result<Json<Order>, AppError> {
    let update = input.validate();
    let store_id = store_id(&raw_store_id)?;
    let id = order_id(&raw_id)?;
    require_store_owner(state.catalog(), store_id, &user_id).await?;

    state
        .catalog()
        .update_order(store_id, id, update)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Order"))
}

/// Delete an order and its items.
#[instrument(skip(state))]
pub async fn delete(
    RequireUser(user_id): RequireUser,
    State(state): State<AppState>,
    Path((raw_store_id, raw_id)): Path<(String, String)>,
) -> Result<Json<Order>, AppError> {
    let store_id = store_id(&raw_store_id)?;
    let id = order_id(&raw_id)?;
    require_store_owner(state.catalog(), store_id, &user_id).await?;

    state
        .catalog()
        .delete_order(store_id, id)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound("Order"))
}
