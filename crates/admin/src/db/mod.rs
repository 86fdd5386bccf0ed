//! Catalog storage.
//!
//! # Schema: `catalog`
//!
//! ## Tables
//!
//! - `store` - Tenants, owned by an identity provider user id
//! - `billboard` - Category hero banners
//! - `category` - Product categories (-> billboard)
//! - `size` / `color` - Product attributes
//! - `product` - Products (-> category, size, color)
//! - `product_image` - Product images (cascade with product)
//! - `store_order` - Customer orders
//! - `order_item` - Order lines (cascade with order, -> product)
//!
//! Every table except `store` carries `store_id`. References between catalog
//! rows are `ON DELETE RESTRICT`, so deleting a referenced row fails with
//! [`RepositoryError::Conflict`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p catalog-admin-cli -- migrate
//! ```
//!
//! # Implementations
//!
//! - [`PgCatalog`] - `PostgreSQL` via sqlx (production)
//! - [`MemoryCatalog`] - in-process tables (development and tests)

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use catalog_admin_core::{
    BillboardId, CategoryId, ColorId, OrderId, ProductId, SizeId, StoreId, UserId,
};

use crate::models::{
    Billboard, BillboardFields, Category, CategoryFields, CategoryWithBillboard, Color,
    ColorFields, Order, OrderDetails, OrderFields, OrderUpdate, Product, ProductDetails,
    ProductFields, ProductFilter, Size, SizeFields, Store, StoreFields,
};

pub use memory::MemoryCatalog;
pub use postgres::PgCatalog;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The row is still referenced by other rows.
    #[error("{0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Conflict messages returned when deleting a row that is still referenced.
pub mod conflict {
    pub const STORE_IN_USE: &str = "Remove all catalog data from this store first";
    pub const BILLBOARD_IN_USE: &str = "Remove all categories using this billboard first";
    pub const CATEGORY_IN_USE: &str = "Remove all products using this category first";
    pub const SIZE_IN_USE: &str = "Remove all products using this size first";
    pub const COLOR_IN_USE: &str = "Remove all products using this color first";
    pub const PRODUCT_IN_USE: &str = "Remove all orders containing this product first";
}

// =============================================================================
// Repository traits
// =============================================================================
//
// Item-level operations take the store id alongside the item id and only
// match rows of that store. `Ok(None)` means no such row in that store.

/// Store (tenant) operations.
#[async_trait]
pub trait StoreRepository {
    /// Insert a store owned by `user_id`.
    async fn create_store(
        &self,
        user_id: &UserId,
        fields: StoreFields,
    ) -> Result<Store, RepositoryError>;

    /// The store with this id if and only if `user_id` owns it.
    async fn find_owned_store(
        &self,
        store_id: StoreId,
        user_id: &UserId,
    ) -> Result<Option<Store>, RepositoryError>;

    /// The user's oldest store.
    async fn first_store(&self, user_id: &UserId) -> Result<Option<Store>, RepositoryError>;

    /// All stores owned by the user, oldest first.
    async fn list_stores(&self, user_id: &UserId) -> Result<Vec<Store>, RepositoryError>;

    async fn update_store(
        &self,
        store_id: StoreId,
        fields: StoreFields,
    ) -> Result<Option<Store>, RepositoryError>;

    /// Fails with [`RepositoryError::Conflict`] while any catalog row remains.
    async fn delete_store(&self, store_id: StoreId) -> Result<Option<Store>, RepositoryError>;
}

/// Billboard operations.
#[async_trait]
pub trait BillboardRepository {
    async fn create_billboard(
        &self,
        store_id: StoreId,
        fields: BillboardFields,
    ) -> Result<Billboard, RepositoryError>;

    /// Newest first.
    async fn list_billboards(&self, store_id: StoreId) -> Result<Vec<Billboard>, RepositoryError>;

    async fn get_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<Option<Billboard>, RepositoryError>;

    async fn update_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
        fields: BillboardFields,
    ) -> Result<Option<Billboard>, RepositoryError>;

    async fn delete_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<Option<Billboard>, RepositoryError>;
}

/// Category operations. Reads embed the billboard.
#[async_trait]
pub trait CategoryRepository {
    async fn create_category(
        &self,
        store_id: StoreId,
        fields: CategoryFields,
    ) -> Result<Category, RepositoryError>;

    /// Newest first.
    async fn list_categories(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<CategoryWithBillboard>, RepositoryError>;

    async fn get_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Option<CategoryWithBillboard>, RepositoryError>;

    async fn update_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
        fields: CategoryFields,
    ) -> Result<Option<Category>, RepositoryError>;

    async fn delete_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Option<Category>, RepositoryError>;
}

/// Size operations.
#[async_trait]
pub trait SizeRepository {
    async fn create_size(&self, store_id: StoreId, fields: SizeFields)
    -> Result<Size, RepositoryError>;

    /// Newest first.
    async fn list_sizes(&self, store_id: StoreId) -> Result<Vec<Size>, RepositoryError>;

    async fn get_size(&self, store_id: StoreId, id: SizeId)
    -> Result<Option<Size>, RepositoryError>;

    async fn update_size(
        &self,
        store_id: StoreId,
        id: SizeId,
        fields: SizeFields,
    ) -> Result<Option<Size>, RepositoryError>;

    async fn delete_size(
        &self,
        store_id: StoreId,
        id: SizeId,
    ) -> Result<Option<Size>, RepositoryError>;
}

/// Color operations.
#[async_trait]
pub trait ColorRepository {
    async fn create_color(
        &self,
        store_id: StoreId,
        fields: ColorFields,
    ) -> Result<Color, RepositoryError>;

    /// Newest first.
    async fn list_colors(&self, store_id: StoreId) -> Result<Vec<Color>, RepositoryError>;

    async fn get_color(
        &self,
        store_id: StoreId,
        id: ColorId,
    ) -> Result<Option<Color>, RepositoryError>;

    async fn update_color(
        &self,
        store_id: StoreId,
        id: ColorId,
        fields: ColorFields,
    ) -> Result<Option<Color>, RepositoryError>;

    async fn delete_color(
        &self,
        store_id: StoreId,
        id: ColorId,
    ) -> Result<Option<Color>, RepositoryError>;
}

/// Product operations. Reads embed images and relations.
#[async_trait]
pub trait ProductRepository {
    /// Insert the product and its images in one transaction.
    async fn create_product(
        &self,
        store_id: StoreId,
        fields: ProductFields,
    ) -> Result<Product, RepositoryError>;

    /// Newest first, restricted by `filter`.
    async fn list_products(
        &self,
        store_id: StoreId,
        filter: ProductFilter,
    ) -> Result<Vec<ProductDetails>, RepositoryError>;

    async fn get_product(
        &self,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<Option<ProductDetails>, RepositoryError>;

    /// Replace scalar fields and the whole image set in one transaction.
    async fn update_product(
        &self,
        store_id: StoreId,
        id: ProductId,
        fields: ProductFields,
    ) -> Result<Option<Product>, RepositoryError>;

    /// Removes the product and its images.
    async fn delete_product(
        &self,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<Option<Product>, RepositoryError>;
}

/// Order operations. Reads embed items and their products.
#[async_trait]
pub trait OrderRepository {
    /// Insert the order and one item per product id in one transaction.
    async fn create_order(
        &self,
        store_id: StoreId,
        fields: OrderFields,
    ) -> Result<Order, RepositoryError>;

    /// Newest first.
    async fn list_orders(&self, store_id: StoreId) -> Result<Vec<OrderDetails>, RepositoryError>;

    async fn get_order(
        &self,
        store_id: StoreId,
        id: OrderId,
    ) -> Result<Option<OrderDetails>, RepositoryError>;

    async fn update_order(
        &self,
        store_id: StoreId,
        id: OrderId,
        update: OrderUpdate,
    ) -> Result<Option<Order>, RepositoryError>;

    /// Removes the order and its items.
    async fn delete_order(
        &self,
        store_id: StoreId,
        id: OrderId,
    ) -> Result<Option<Order>, RepositoryError>;
}

/// The full catalog boundary handed to route handlers.
#[async_trait]
pub trait CatalogStore:
    StoreRepository
    + BillboardRepository
    + CategoryRepository
    + SizeRepository
    + ColorRepository
    + ProductRepository
    + OrderRepository
    + Send
    + Sync
{
    /// Readiness probe.
    async fn ping(&self) -> Result<(), RepositoryError>;
}
