//! Store ownership guard.
//!
//! Every mutation under `/api/{storeId}/...` asks whether the store belongs
//! to the caller before touching storage. A store that does not exist and a
//! store owned by someone else are indistinguishable to the caller.

use catalog_admin_core::{StoreId, UserId};

use crate::db::CatalogStore;
use crate::error::AppError;
use crate::models::Store;

/// Return the store if `user_id` owns it.
///
/// # Errors
///
/// Returns `AppError::Forbidden` when the store is absent or owned by
/// another user, and `AppError::Database` if the lookup fails.
#[tracing::instrument(skip(catalog))]
pub async fn require_store_owner(
    catalog: &dyn CatalogStore,
    store_id: StoreId,
    user_id: &UserId,
) -> Result<Store, AppError> {
    catalog
        .find_owned_store(store_id, user_id)
        .await?
        .ok_or(AppError::Forbidden)
}
