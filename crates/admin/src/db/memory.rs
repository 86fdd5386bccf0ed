//! In-process catalog used in development mode and tests.
//!
//! Rows live in insertion order behind a single [`RwLock`], so listing in
//! reverse gives newest first. Multi-row writes stage their changes and only
//! commit once every step succeeded, mirroring the transactions of
//! [`PgCatalog`](super::PgCatalog).

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use catalog_admin_core::{
    BillboardId, CategoryId, ColorId, OrderId, OrderItemId, ProductId, ProductImageId, SizeId,
    StoreId, UserId,
};

use super::{
    BillboardRepository, CatalogStore, CategoryRepository, ColorRepository, OrderRepository,
    ProductRepository, RepositoryError, SizeRepository, StoreRepository, conflict,
};
use crate::models::{
    Billboard, BillboardFields, Category, CategoryFields, CategoryWithBillboard, Color,
    ColorFields, Order, OrderDetails, OrderFields, OrderItem, OrderItemDetails, OrderUpdate,
    Product, ProductDetails, ProductFields, ProductFilter, ProductImage, Size, SizeFields, Store,
    StoreFields,
};

#[derive(Debug, Default)]
struct Tables {
    stores: Vec<Store>,
    billboards: Vec<Billboard>,
    categories: Vec<Category>,
    sizes: Vec<Size>,
    colors: Vec<Color>,
    products: Vec<Product>,
    product_images: Vec<ProductImage>,
    orders: Vec<Order>,
    order_items: Vec<OrderItem>,
}

impl Tables {
    fn missing(what: &str) -> RepositoryError {
        RepositoryError::DataCorruption(format!("dangling {what} reference"))
    }

    fn category_view(&self, category: &Category) -> Result<CategoryWithBillboard, RepositoryError> {
        let billboard = self
            .billboards
            .iter()
            .find(|b| b.id == category.billboard_id)
            .ok_or_else(|| Self::missing("billboard"))?;
        Ok(CategoryWithBillboard {
            category: category.clone(),
            billboard: billboard.clone(),
        })
    }

    fn product_view(&self, product: &Product) -> Result<ProductDetails, RepositoryError> {
        let category = self
            .categories
            .iter()
            .find(|c| c.id == product.category_id)
            .ok_or_else(|| Self::missing("category"))?;
        let size = self
            .sizes
            .iter()
            .find(|s| s.id == product.size_id)
            .ok_or_else(|| Self::missing("size"))?;
        let color = self
            .colors
            .iter()
            .find(|c| c.id == product.color_id)
            .ok_or_else(|| Self::missing("color"))?;
        let images = self
            .product_images
            .iter()
            .filter(|i| i.product_id == product.id)
            .cloned()
            .collect();

        Ok(ProductDetails {
            product: product.clone(),
            images,
            category: category.clone(),
            size: size.clone(),
            color: color.clone(),
        })
    }

    fn order_view(&self, order: &Order) -> Result<OrderDetails, RepositoryError> {
        let order_items = self
            .order_items
            .iter()
            .filter(|item| item.order_id == order.id)
            .map(|item| {
                let product = self
                    .products
                    .iter()
                    .find(|p| p.id == item.product_id)
                    .ok_or_else(|| Self::missing("product"))?;
                Ok(OrderItemDetails {
                    item: item.clone(),
                    product: product.clone(),
                })
            })
            .collect::<Result<Vec<_>, RepositoryError>>()?;

        Ok(OrderDetails {
            order: order.clone(),
            order_items,
        })
    }

    fn store_in_use(&self, store_id: StoreId) -> bool {
        self.billboards.iter().any(|r| r.store_id == store_id)
            || self.categories.iter().any(|r| r.store_id == store_id)
            || self.sizes.iter().any(|r| r.store_id == store_id)
            || self.colors.iter().any(|r| r.store_id == store_id)
            || self.products.iter().any(|r| r.store_id == store_id)
            || self.orders.iter().any(|r| r.store_id == store_id)
    }
}

/// Catalog held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    tables: RwLock<Tables>,
    writes: AtomicU64,
    fail_next_image_insert: AtomicBool,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful write operations so far.
    #[must_use]
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make the next product image insert fail, after the old images of the
    /// product have been cleared within the same write.
    pub fn fail_next_image_insert(&self) {
        self.fail_next_image_insert.store(true, Ordering::SeqCst);
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }

    fn stage_images(
        &self,
        product_id: ProductId,
        urls: Vec<String>,
    ) -> Result<Vec<ProductImage>, RepositoryError> {
        if self.fail_next_image_insert.swap(false, Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::Protocol(
                "injected product image insert failure".to_string(),
            )));
        }
        let now = Utc::now();
        Ok(urls
            .into_iter()
            .map(|url| ProductImage {
                id: ProductImageId::generate(),
                product_id,
                url,
                created_at: now,
                updated_at: now,
            })
            .collect())
    }
}

fn newest_first<'a, T: 'a>(
    rows: &'a [T],
    keep: impl Fn(&T) -> bool + 'a,
) -> impl Iterator<Item = &'a T> + 'a {
    rows.iter().rev().filter(move |row| keep(*row))
}

#[async_trait]
impl StoreRepository for MemoryCatalog {
    async fn create_store(
        &self,
        user_id: &UserId,
        fields: StoreFields,
    ) -> Result<Store, RepositoryError> {
        let now = Utc::now();
        let store = Store {
            id: StoreId::generate(),
            name: fields.name,
            user_id: user_id.clone(),
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.stores.push(store.clone());
        self.record_write();
        Ok(store)
    }

    async fn find_owned_store(
        &self,
        store_id: StoreId,
        user_id: &UserId,
    ) -> Result<Option<Store>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .stores
            .iter()
            .find(|s| s.id == store_id && &s.user_id == user_id)
            .cloned())
    }

    async fn first_store(&self, user_id: &UserId) -> Result<Option<Store>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.stores.iter().find(|s| &s.user_id == user_id).cloned())
    }

    async fn list_stores(&self, user_id: &UserId) -> Result<Vec<Store>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .stores
            .iter()
            .filter(|s| &s.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update_store(
        &self,
        store_id: StoreId,
        fields: StoreFields,
    ) -> Result<Option<Store>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(store) = tables.stores.iter_mut().find(|s| s.id == store_id) else {
            return Ok(None);
        };
        store.name = fields.name;
        store.updated_at = Utc::now();
        let updated = store.clone();
        drop(tables);
        self.record_write();
        Ok(Some(updated))
    }

    async fn delete_store(&self, store_id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(pos) = tables.stores.iter().position(|s| s.id == store_id) else {
            return Ok(None);
        };
        if tables.store_in_use(store_id) {
            return Err(RepositoryError::Conflict(conflict::STORE_IN_USE.to_string()));
        }
        let removed = tables.stores.remove(pos);
        drop(tables);
        self.record_write();
        Ok(Some(removed))
    }
}

#[async_trait]
impl BillboardRepository for MemoryCatalog {
    async fn create_billboard(
        &self,
        store_id: StoreId,
        fields: BillboardFields,
    ) -> Result<Billboard, RepositoryError> {
        let now = Utc::now();
        let billboard = Billboard {
            id: BillboardId::generate(),
            store_id,
            label: fields.label,
            image_url: fields.image_url,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.billboards.push(billboard.clone());
        self.record_write();
        Ok(billboard)
    }

    async fn list_billboards(&self, store_id: StoreId) -> Result<Vec<Billboard>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.billboards, |b| b.store_id == store_id)
            .cloned()
            .collect())
    }

    async fn get_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<Option<Billboard>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .billboards
            .iter()
            .find(|b| b.store_id == store_id && b.id == id)
            .cloned())
    }

    async fn update_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
        fields: BillboardFields,
    ) -> Result<Option<Billboard>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(billboard) = tables
            .billboards
            .iter_mut()
            .find(|b| b.store_id == store_id && b.id == id)
        else {
            return Ok(None);
        };
        billboard.label = fields.label;
        billboard.image_url = fields.image_url;
        billboard.updated_at = Utc::now();
        let updated = billboard.clone();
        drop(tables);
        self.record_write();
        Ok(Some(updated))
    }

    async fn delete_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<Option<Billboard>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(pos) = tables
            .billboards
            .iter()
            .position(|b| b.store_id == store_id && b.id == id)
        else {
            return Ok(None);
        };
        if tables.categories.iter().any(|c| c.billboard_id == id) {
            return Err(RepositoryError::Conflict(
                conflict::BILLBOARD_IN_USE.to_string(),
            ));
        }
        let removed = tables.billboards.remove(pos);
        drop(tables);
        self.record_write();
        Ok(Some(removed))
    }
}

#[async_trait]
impl CategoryRepository for MemoryCatalog {
    async fn create_category(
        &self,
        store_id: StoreId,
        fields: CategoryFields,
    ) -> Result<Category, RepositoryError> {
        let now = Utc::now();
        let category = Category {
            id: CategoryId::generate(),
            store_id,
            billboard_id: fields.billboard_id,
            name: fields.name,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.categories.push(category.clone());
        self.record_write();
        Ok(category)
    }

    async fn list_categories(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<CategoryWithBillboard>, RepositoryError> {
        let tables = self.tables.read().await;
        newest_first(&tables.categories, |c| c.store_id == store_id)
            .map(|c| tables.category_view(c))
            .collect()
    }

    async fn get_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Option<CategoryWithBillboard>, RepositoryError> {
        let tables = self.tables.read().await;
        tables
            .categories
            .iter()
            .find(|c| c.store_id == store_id && c.id == id)
            .map(|c| tables.category_view(c))
            .transpose()
    }

    async fn update_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
        fields: CategoryFields,
    ) -> Result<Option<Category>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(category) = tables
            .categories
            .iter_mut()
            .find(|c| c.store_id == store_id && c.id == id)
        else {
            return Ok(None);
        };
        category.name = fields.name;
        category.billboard_id = fields.billboard_id;
        category.updated_at = Utc::now();
        let updated = category.clone();
        drop(tables);
        self.record_write();
        Ok(Some(updated))
    }

    async fn delete_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Option<Category>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(pos) = tables
            .categories
            .iter()
            .position(|c| c.store_id == store_id && c.id == id)
        else {
            return Ok(None);
        };
        if tables.products.iter().any(|p| p.category_id == id) {
            return Err(RepositoryError::Conflict(
                conflict::CATEGORY_IN_USE.to_string(),
            ));
        }
        let removed = tables.categories.remove(pos);
        drop(tables);
        self.record_write();
        Ok(Some(removed))
    }
}

#[async_trait]
impl SizeRepository for MemoryCatalog {
    async fn create_size(
        &self,
        store_id: StoreId,
        fields: SizeFields,
    ) -> Result<Size, RepositoryError> {
        let now = Utc::now();
        let size = Size {
            id: SizeId::generate(),
            store_id,
            name: fields.name,
            value: fields.value,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.sizes.push(size.clone());
        self.record_write();
        Ok(size)
    }

    async fn list_sizes(&self, store_id: StoreId) -> Result<Vec<Size>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.sizes, |s| s.store_id == store_id)
            .cloned()
            .collect())
    }

    async fn get_size(
        &self,
        store_id: StoreId,
        id: SizeId,
    ) -> Result<Option<Size>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .sizes
            .iter()
            .find(|s| s.store_id == store_id && s.id == id)
            .cloned())
    }

    async fn update_size(
        &self,
        store_id: StoreId,
        id: SizeId,
        fields: SizeFields,
    ) -> Result<Option<Size>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(size) = tables
            .sizes
            .iter_mut()
            .find(|s| s.store_id == store_id && s.id == id)
        else {
            return Ok(None);
        };
        size.name = fields.name;
        size.value = fields.value;
        size.updated_at = Utc::now();
        let updated = size.clone();
        drop(tables);
        self.record_write();
        Ok(Some(updated))
    }

    async fn delete_size(
        &self,
        store_id: StoreId,
        id: SizeId,
    ) -> Result<Option<Size>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(pos) = tables
            .sizes
            .iter()
            .position(|s| s.store_id == store_id && s.id == id)
        else {
            return Ok(None);
        };
        if tables.products.iter().any(|p| p.size_id == id) {
            return Err(RepositoryError::Conflict(conflict::SIZE_IN_USE.to_string()));
        }
        let removed = tables.sizes.remove(pos);
        drop(tables);
        self.record_write();
        Ok(Some(removed))
    }
}

#[async_trait]
impl ColorRepository for MemoryCatalog {
    async fn create_color(
        &self,
        store_id: StoreId,
        fields: ColorFields,
    ) -> Result<Color, RepositoryError> {
        let now = Utc::now();
        let color = Color {
            id: ColorId::generate(),
            store_id,
            name: fields.name,
            value: fields.value,
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.colors.push(color.clone());
        self.record_write();
        Ok(color)
    }

    async fn list_colors(&self, store_id: StoreId) -> Result<Vec<Color>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(newest_first(&tables.colors, |c| c.store_id == store_id)
            .cloned()
            .collect())
    }

    async fn get_color(
        &self,
        store_id: StoreId,
        id: ColorId,
    ) -> Result<Option<Color>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .colors
            .iter()
            .find(|c| c.store_id == store_id && c.id == id)
            .cloned())
    }

    async fn update_color(
        &self,
        store_id: StoreId,
        id: ColorId,
        fields: ColorFields,
    ) -> Result<Option<Color>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(color) = tables
            .colors
            .iter_mut()
            .find(|c| c.store_id == store_id && c.id == id)
        else {
            return Ok(None);
        };
        color.name = fields.name;
        color.value = fields.value;
        color.updated_at = Utc::now();
        let updated = color.clone();
        drop(tables);
        self.record_write();
        Ok(Some(updated))
    }

    async fn delete_color(
        &self,
        store_id: StoreId,
        id: ColorId,
    ) -> Result<Option<Color>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(pos) = tables
            .colors
            .iter()
            .position(|c| c.store_id == store_id && c.id == id)
        else {
            return Ok(None);
        };
        if tables.products.iter().any(|p| p.color_id == id) {
            return Err(RepositoryError::Conflict(conflict::COLOR_IN_USE.to_string()));
        }
        let removed = tables.colors.remove(pos);
        drop(tables);
        self.record_write();
        Ok(Some(removed))
    }
}

#[async_trait]
impl ProductRepository for MemoryCatalog {
    async fn create_product(
        &self,
        store_id: StoreId,
        fields: ProductFields,
    ) -> Result<Product, RepositoryError> {
        let now = Utc::now();
        let product = Product {
            id: ProductId::generate(),
            store_id,
            category_id: fields.category_id,
            size_id: fields.size_id,
            color_id: fields.color_id,
            name: fields.name,
            price: fields.price,
            is_featured: fields.is_featured,
            is_archived: fields.is_archived,
            created_at: now,
            updated_at: now,
        };

        let mut tables = self.tables.write().await;
        let images = self.stage_images(product.id, fields.images)?;
        tables.products.push(product.clone());
        tables.product_images.extend(images);
        drop(tables);
        self.record_write();
        Ok(product)
    }

    async fn list_products(
        &self,
        store_id: StoreId,
        filter: ProductFilter,
    ) -> Result<Vec<ProductDetails>, RepositoryError> {
        let tables = self.tables.read().await;
        newest_first(&tables.products, |p| {
            p.store_id == store_id && filter.matches(p)
        })
        .map(|p| tables.product_view(p))
        .collect()
    }

    async fn get_product(
        &self,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<Option<ProductDetails>, RepositoryError> {
        let tables = self.tables.read().await;
        tables
            .products
            .iter()
            .find(|p| p.store_id == store_id && p.id == id)
            .map(|p| tables.product_view(p))
            .transpose()
    }

    async fn update_product(
        &self,
        store_id: StoreId,
        id: ProductId,
        fields: ProductFields,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(pos) = tables
            .products
            .iter()
            .position(|p| p.store_id == store_id && p.id == id)
        else {
            return Ok(None);
        };

        // Stage: old images cleared, new ones inserted. Nothing is committed
        // to `tables` until the image insert succeeded.
        let mut staged_images: Vec<ProductImage> = tables
            .product_images
            .iter()
            .filter(|i| i.product_id != id)
            .cloned()
            .collect();
        staged_images.extend(self.stage_images(id, fields.images)?);

        let Some(product) = tables.products.get_mut(pos) else {
            return Ok(None);
        };
        product.name = fields.name;
        product.price = fields.price;
        product.category_id = fields.category_id;
        product.color_id = fields.color_id;
        product.size_id = fields.size_id;
        product.is_featured = fields.is_featured;
        product.is_archived = fields.is_archived;
        product.updated_at = Utc::now();
        let updated = product.clone();
        tables.product_images = staged_images;
        drop(tables);
        self.record_write();
        Ok(Some(updated))
    }

    async fn delete_product(
        &self,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(pos) = tables
            .products
            .iter()
            .position(|p| p.store_id == store_id && p.id == id)
        else {
            return Ok(None);
        };
        if tables.order_items.iter().any(|i| i.product_id == id) {
            return Err(RepositoryError::Conflict(
                conflict::PRODUCT_IN_USE.to_string(),
            ));
        }
        let removed = tables.products.remove(pos);
        tables.product_images.retain(|i| i.product_id != id);
        drop(tables);
        self.record_write();
        Ok(Some(removed))
    }
}

#[async_trait]
impl OrderRepository for MemoryCatalog {
    async fn create_order(
        &self,
        store_id: StoreId,
        fields: OrderFields,
    ) -> Result<Order, RepositoryError> {
        let now = Utc::now();
        let order = Order {
            id: OrderId::generate(),
            store_id,
            is_paid: false,
            phone: fields.phone,
            address: fields.address,
            created_at: now,
            updated_at: now,
        };
        let items = fields.product_ids.into_iter().map(|product_id| OrderItem {
            id: OrderItemId::generate(),
            order_id: order.id,
            product_id,
        });

        let mut tables = self.tables.write().await;
        tables.order_items.extend(items);
        tables.orders.push(order.clone());
        drop(tables);
        self.record_write();
        Ok(order)
    }

    async fn list_orders(&self, store_id: StoreId) -> Result<Vec<OrderDetails>, RepositoryError> {
        let tables = self.tables.read().await;
        newest_first(&tables.orders, |o| o.store_id == store_id)
            .map(|o| tables.order_view(o))
            .collect()
    }

    async fn get_order(
        &self,
        store_id: StoreId,
        id: OrderId,
    ) -> Result<Option<OrderDetails>, RepositoryError> {
        let tables = self.tables.read().await;
        tables
            .orders
            .iter()
            .find(|o| o.store_id == store_id && o.id == id)
            .map(|o| tables.order_view(o))
            .transpose()
    }

    async fn update_order(
        &self,
        store_id: StoreId,
        id: OrderId,
        update: OrderUpdate,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(order) = tables
            .orders
            .iter_mut()
            .find(|o| o.store_id == store_id && o.id == id)
        else {
            return Ok(None);
        };
        update.apply(order);
        order.updated_at = Utc::now();
        let updated = order.clone();
        drop(tables);
        self.record_write();
        Ok(Some(updated))
    }

    async fn delete_order(
        &self,
        store_id: StoreId,
        id: OrderId,
    ) -> Result<Option<Order>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(pos) = tables
            .orders
            .iter()
            .position(|o| o.store_id == store_id && o.id == id)
        else {
            return Ok(None);
        };
        let removed = tables.orders.remove(pos);
        tables.order_items.retain(|i| i.order_id != id);
        drop(tables);
        self.record_write();
        Ok(Some(removed))
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn owner() -> UserId {
        UserId::parse("user_owner").unwrap()
    }

    struct Refs {
        store_id: StoreId,
        billboard: Billboard,
        category: Category,
        size: Size,
        color: Color,
    }

    async fn seed(catalog: &MemoryCatalog) -> Refs {
        let store = catalog
            .create_store(
                &owner(),
                StoreFields {
                    name: "Main".to_string(),
                },
            )
            .await
            .unwrap();
        let billboard = catalog
            .create_billboard(
                store.id,
                BillboardFields {
                    label: "Summer".to_string(),
                    image_url: "https://img/summer.png".to_string(),
                },
            )
            .await
            .unwrap();
        let category = catalog
            .create_category(
                store.id,
                CategoryFields {
                    name: "Shirts".to_string(),
                    billboard_id: billboard.id,
                },
            )
            .await
            .unwrap();
        let size = catalog
            .create_size(
                store.id,
                SizeFields {
                    name: "Small".to_string(),
                    value: "S".to_string(),
                },
            )
            .await
            .unwrap();
        let color = catalog
            .create_color(
                store.id,
                ColorFields {
                    name: "Red".to_string(),
                    value: "#FF0000".to_string(),
                },
            )
            .await
            .unwrap();
        Refs {
            store_id: store.id,
            billboard,
            category,
            size,
            color,
        }
    }

    fn product_fields(refs: &Refs, name: &str, images: &[&str]) -> ProductFields {
        ProductFields {
            name: name.to_string(),
            price: Decimal::new(1000, 2),
            category_id: refs.category.id,
            color_id: refs.color.id,
            size_id: refs.size.id,
            images: images.iter().map(ToString::to_string).collect(),
            is_featured: false,
            is_archived: false,
        }
    }

    #[tokio::test]
    async fn test_lists_newest_first() {
        let catalog = MemoryCatalog::new();
        let refs = seed(&catalog).await;
        let second = catalog
            .create_billboard(
                refs.store_id,
                BillboardFields {
                    label: "Winter".to_string(),
                    image_url: "https://img/winter.png".to_string(),
                },
            )
            .await
            .unwrap();

        let list = catalog.list_billboards(refs.store_id).await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, second.id);
        assert_eq!(list[1].id, refs.billboard.id);
    }

    #[tokio::test]
    async fn test_item_lookups_are_store_scoped() {
        let catalog = MemoryCatalog::new();
        let refs = seed(&catalog).await;
        let other = catalog
            .create_store(
                &owner(),
                StoreFields {
                    name: "Other".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(
            catalog
                .get_billboard(other.id, refs.billboard.id)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            catalog
                .delete_size(other.id, refs.size.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_referenced_rows_cannot_be_deleted() {
        let catalog = MemoryCatalog::new();
        let refs = seed(&catalog).await;

        let err = catalog
            .delete_billboard(refs.store_id, refs.billboard.id)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        let err = catalog.delete_store(refs.store_id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_failed_image_insert_keeps_previous_product_state() {
        let catalog = MemoryCatalog::new();
        let refs = seed(&catalog).await;
        let product = catalog
            .create_product(refs.store_id, product_fields(&refs, "Tee", &["https://img/a.png"]))
            .await
            .unwrap();
        let writes = catalog.write_count();

        catalog.fail_next_image_insert();
        let result = catalog
            .update_product(
                refs.store_id,
                product.id,
                product_fields(&refs, "Renamed", &["https://img/b.png"]),
            )
            .await;
        assert!(result.is_err());

        let details = catalog
            .get_product(refs.store_id, product.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(details.product.name, "Tee");
        assert_eq!(details.images.len(), 1);
        assert_eq!(details.images[0].url, "https://img/a.png");
        assert_eq!(catalog.write_count(), writes);
    }

    #[tokio::test]
    async fn test_product_update_replaces_images() {
        let catalog = MemoryCatalog::new();
        let refs = seed(&catalog).await;
        let product = catalog
            .create_product(
                refs.store_id,
                product_fields(&refs, "Tee", &["https://img/a.png", "https://img/b.png"]),
            )
            .await
            .unwrap();

        catalog
            .update_product(
                refs.store_id,
                product.id,
                product_fields(&refs, "Tee", &["https://img/c.png"]),
            )
            .await
            .unwrap()
            .unwrap();

        let details = catalog
            .get_product(refs.store_id, product.id)
            .await
            .unwrap()
            .unwrap();
        let urls: Vec<_> = details.images.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, vec!["https://img/c.png"]);
    }

    #[tokio::test]
    async fn test_order_delete_cascades_items_and_frees_product() {
        let catalog = MemoryCatalog::new();
        let refs = seed(&catalog).await;
        let product = catalog
            .create_product(refs.store_id, product_fields(&refs, "Tee", &["https://img/a.png"]))
            .await
            .unwrap();
        let order = catalog
            .create_order(
                refs.store_id,
                OrderFields {
                    product_ids: vec![product.id],
                    phone: String::new(),
                    address: String::new(),
                },
            )
            .await
            .unwrap();

        assert!(matches!(
            catalog.delete_product(refs.store_id, product.id).await,
            Err(RepositoryError::Conflict(_))
        ));

        catalog
            .delete_order(refs.store_id, order.id)
            .await
            .unwrap()
            .unwrap();
        assert!(
            catalog
                .delete_product(refs.store_id, product.id)
                .await
                .unwrap()
                .is_some()
        );
    }
}
