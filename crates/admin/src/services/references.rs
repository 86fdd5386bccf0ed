//! Checks that rows referenced by a request body exist in the same store.
//!
//! These run after the ownership check and before the write, and fail with
//! a validation error naming the referencing field.

use catalog_admin_core::{BillboardId, ProductId, StoreId};

use crate::db::CatalogStore;
use crate::error::AppError;
use crate::models::{ProductFields, ValidationError};

/// The billboard a category points at must belong to the store.
///
/// # Errors
///
/// Returns `AppError::Validation` on `billboardId` when it does not.
pub async fn ensure_billboard(
    catalog: &dyn CatalogStore,
    store_id: StoreId,
    billboard_id: BillboardId,
) -> Result<(), AppError> {
    if catalog.get_billboard(store_id, billboard_id).await?.is_none() {
        return Err(ValidationError::invalid("billboardId", "Billboard not found").into());
    }
    Ok(())
}

/// Category, color and size of a product must belong to the store.
///
/// # Errors
///
/// Returns `AppError::Validation` on the first missing reference, checked in
/// body field order.
pub async fn ensure_product_references(
    catalog: &dyn CatalogStore,
    store_id: StoreId,
    fields: &ProductFields,
) -> Result<(), AppError> {
    if catalog
        .get_category(store_id, fields.category_id)
        .await?
        .is_none()
    {
        return Err(ValidationError::invalid("categoryId", "Category not found").into());
    }
    if catalog.get_color(store_id, fields.color_id).await?.is_none() {
        return Err(ValidationError::invalid("colorId", "Color not found").into());
    }
    if catalog.get_size(store_id, fields.size_id).await?.is_none() {
        return Err(ValidationError::invalid("sizeId", "Size not found").into());
    }
    Ok(())
}

/// Every ordered product must belong to the store.
///
/// # Errors
///
/// Returns `AppError::Validation` on `productIds` for the first unknown id.
pub async fn ensure_products(
    catalog: &dyn CatalogStore,
    store_id: StoreId,
    product_ids: &[ProductId],
) -> Result<(), AppError> {
    for &id in product_ids {
        if catalog.get_product(store_id, id).await?.is_none() {
            return Err(
                ValidationError::invalid("productIds", format!("Product {id} not found")).into(),
            );
        }
    }
    Ok(())
}
