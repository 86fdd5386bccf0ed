use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use catalog_admin_core::{OrderId, OrderItemId, ProductId, StoreId};

use super::PgCatalog;
use super::products::{PRODUCT_COLUMNS, ProductRow};
use crate::db::{OrderRepository, RepositoryError};
use crate::models::{
    Order, OrderDetails, OrderFields, OrderItem, OrderItemDetails, OrderUpdate, Product,
};

const ORDER_COLUMNS: &str = "id, store_id, is_paid, phone, address, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    store_id: Uuid,
    is_paid: bool,
    phone: String,
    address: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            store_id: StoreId::new(row.store_id),
            is_paid: row.is_paid,
            phone: row.phone,
            address: row.address,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Order item joined with its product.
#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    item_id: Uuid,
    item_order_id: Uuid,
    #[sqlx(flatten)]
    product: ProductRow,
}

impl From<OrderItemRow> for OrderItemDetails {
    fn from(row: OrderItemRow) -> Self {
        let product = Product::from(row.product);
        Self {
            item: OrderItem {
                id: OrderItemId::new(row.item_id),
                order_id: OrderId::new(row.item_order_id),
                product_id: product.id,
            },
            product,
        }
    }
}

impl PgCatalog {
    async fn attach_items(&self, rows: Vec<OrderRow>) -> Result<Vec<OrderDetails>, RepositoryError> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let items = sqlx::query_as::<_, OrderItemRow>(&format!(
            r"
            SELECT oi.id AS item_id, oi.order_id AS item_order_id, {PRODUCT_COLUMNS}
            FROM catalog.order_item oi
            JOIN catalog.product p ON p.id = oi.product_id
            WHERE oi.order_id = ANY($1)
            ORDER BY oi.order_id, oi.position
            "
        ))
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<OrderItemDetails>> = HashMap::new();
        for item in items {
            grouped.entry(item.item_order_id).or_default().push(item.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let order_items = grouped.remove(&row.id).unwrap_or_default();
                OrderDetails {
                    order: row.into(),
                    order_items,
                }
            })
            .collect())
    }
}

#[async_trait]
impl OrderRepository for PgCatalog {
    async fn create_order(
        &self,
        store_id: StoreId,
        fields: OrderFields,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r"
            INSERT INTO catalog.store_order (store_id, phone, address)
            VALUES ($1, $2, $3)
            RETURNING {ORDER_COLUMNS}
            "
        ))
        .bind(store_id)
        .bind(&fields.phone)
        .bind(&fields.address)
        .fetch_one(&mut *tx)
        .await?;

        let product_ids: Vec<Uuid> = fields
            .product_ids
            .iter()
            .map(ProductId::as_uuid)
            .collect();
        sqlx::query(
            r"
            INSERT INTO catalog.order_item (order_id, product_id, position)
            SELECT $1, t.product_id, t.position
            FROM UNNEST($2::uuid[]) WITH ORDINALITY AS t(product_id, position)
            ",
        )
        .bind(row.id)
        .bind(&product_ids)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row.into())
    }

    async fn list_orders(&self, store_id: StoreId) -> Result<Vec<OrderDetails>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            r"
            SELECT {ORDER_COLUMNS}
            FROM catalog.store_order
            WHERE store_id = $1
            ORDER BY created_at DESC
            "
        ))
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        self.attach_items(rows).await
    }

    async fn get_order(
        &self,
        store_id: StoreId,
        id: OrderId,
    ) -> Result<Option<OrderDetails>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r"
            SELECT {ORDER_COLUMNS}
            FROM catalog.store_order
            WHERE store_id = $1 AND id = $2
            "
        ))
        .bind(store_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(self.attach_items(vec![row]).await?.pop())
    }

    async fn update_order(
        &self,
        store_id: StoreId,
        id: OrderId,
        update: OrderUpdate,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r"
            UPDATE catalog.store_order
            SET phone = COALESCE($3, phone),
                address = COALESCE($4, address),
                is_paid = COALESCE($5, is_paid),
                updated_at = NOW()
            WHERE store_id = $1 AND id = $2
            RETURNING {ORDER_COLUMNS}
            "
        ))
        .bind(store_id)
        .bind(id)
        .bind(update.phone)
        .bind(update.address)
        .bind(update.is_paid)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete_order(
        &self,
        store_id: StoreId,
        id: OrderId,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r"
            DELETE FROM catalog.store_order
            WHERE store_id = $1 AND id = $2
            RETURNING {ORDER_COLUMNS}
            "
        ))
        .bind(store_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }
}
