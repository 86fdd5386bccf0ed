use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use catalog_admin_core::{
    BillboardId, CategoryId, ColorId, ProductId, ProductImageId, SizeId, StoreId,
};

use super::{PgCatalog, conflict_on_fk};
use crate::db::{ProductRepository, RepositoryError, conflict};
use crate::models::{
    Category, Color, Product, ProductDetails, ProductFields, ProductFilter, ProductImage, Size,
};

/// Product columns, qualified with the `p` alias.
pub(super) const PRODUCT_COLUMNS: &str = "p.id, p.store_id, p.category_id, p.size_id, \
     p.color_id, p.name, p.price, p.is_featured, p.is_archived, p.created_at, p.updated_at";

#[derive(Debug, sqlx::FromRow)]
pub(super) struct ProductRow {
    id: Uuid,
    store_id: Uuid,
    category_id: Uuid,
    size_id: Uuid,
    color_id: Uuid,
    name: String,
    price: Decimal,
    is_featured: bool,
    is_archived: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            store_id: StoreId::new(row.store_id),
            category_id: CategoryId::new(row.category_id),
            size_id: SizeId::new(row.size_id),
            color_id: ColorId::new(row.color_id),
            name: row.name,
            price: row.price,
            is_featured: row.is_featured,
            is_archived: row.is_archived,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Product joined with its category, size and color.
#[derive(Debug, sqlx::FromRow)]
struct ProductDetailsRow {
    #[sqlx(flatten)]
    product: ProductRow,
    category_billboard_id: Uuid,
    category_name: String,
    category_created_at: DateTime<Utc>,
    category_updated_at: DateTime<Utc>,
    size_name: String,
    size_value: String,
    size_created_at: DateTime<Utc>,
    size_updated_at: DateTime<Utc>,
    color_name: String,
    color_value: String,
    color_created_at: DateTime<Utc>,
    color_updated_at: DateTime<Utc>,
}

impl ProductDetailsRow {
    fn into_details(self, images: Vec<ProductImage>) -> ProductDetails {
        let product = Product::from(self.product);
        ProductDetails {
            category: Category {
                id: product.category_id,
                store_id: product.store_id,
                billboard_id: BillboardId::new(self.category_billboard_id),
                name: self.category_name,
                created_at: self.category_created_at,
                updated_at: self.category_updated_at,
            },
            size: Size {
                id: product.size_id,
                store_id: product.store_id,
                name: self.size_name,
                value: self.size_value,
                created_at: self.size_created_at,
                updated_at: self.size_updated_at,
            },
            color: Color {
                id: product.color_id,
                store_id: product.store_id,
                name: self.color_name,
                value: self.color_value,
                created_at: self.color_created_at,
                updated_at: self.color_updated_at,
            },
            images,
            product,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductImageRow {
    id: Uuid,
    product_id: Uuid,
    url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductImageRow> for ProductImage {
    fn from(row: ProductImageRow) -> Self {
        Self {
            id: ProductImageId::new(row.id),
            product_id: ProductId::new(row.product_id),
            url: row.url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn details_query(condition: &str) -> String {
    format!(
        r"
        SELECT {PRODUCT_COLUMNS},
               c.billboard_id AS category_billboard_id,
               c.name AS category_name,
               c.created_at AS category_created_at,
               c.updated_at AS category_updated_at,
               s.name AS size_name,
               s.value AS size_value,
               s.created_at AS size_created_at,
               s.updated_at AS size_updated_at,
               co.name AS color_name,
               co.value AS color_value,
               co.created_at AS color_created_at,
               co.updated_at AS color_updated_at
        FROM catalog.product p
        JOIN catalog.category c ON c.id = p.category_id
        JOIN catalog.size s ON s.id = p.size_id
        JOIN catalog.color co ON co.id = p.color_id
        WHERE {condition}
        ORDER BY p.created_at DESC
        "
    )
}

impl PgCatalog {
    /// Images for the given products, grouped by product in insertion order.
    async fn images_for(
        &self,
        product_ids: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<ProductImage>>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductImageRow>(
            r"
            SELECT id, product_id, url, created_at, updated_at
            FROM catalog.product_image
            WHERE product_id = ANY($1)
            ORDER BY product_id, position
            ",
        )
        .bind(product_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<ProductImage>> = HashMap::new();
        for row in rows {
            grouped.entry(row.product_id).or_default().push(row.into());
        }
        Ok(grouped)
    }

    async fn attach_images(
        &self,
        rows: Vec<ProductDetailsRow>,
    ) -> Result<Vec<ProductDetails>, RepositoryError> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.product.id).collect();
        let mut images = self.images_for(&ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let product_images = images.remove(&row.product.id).unwrap_or_default();
                row.into_details(product_images)
            })
            .collect())
    }
}

async fn insert_images(
    tx: &mut Transaction<'_, Postgres>,
    product_id: ProductId,
    urls: &[String],
) -> Result<(), RepositoryError> {
    sqlx::query(
        r"
        INSERT INTO catalog.product_image (product_id, url, position)
        SELECT $1, t.url, t.position
        FROM UNNEST($2::text[]) WITH ORDINALITY AS t(url, position)
        ",
    )
    .bind(product_id)
    .bind(urls)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

#[async_trait]
impl ProductRepository for PgCatalog {
    async fn create_product(
        &self,
        store_id: StoreId,
        fields: ProductFields,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            INSERT INTO catalog.product AS p
                (store_id, category_id, size_id, color_id, name, price, is_featured, is_archived)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(store_id)
        .bind(fields.category_id)
        .bind(fields.size_id)
        .bind(fields.color_id)
        .bind(&fields.name)
        .bind(fields.price)
        .bind(fields.is_featured)
        .bind(fields.is_archived)
        .fetch_one(&mut *tx)
        .await?;

        let product = Product::from(row);
        insert_images(&mut tx, product.id, &fields.images).await?;
        tx.commit().await?;

        Ok(product)
    }

    async fn list_products(
        &self,
        store_id: StoreId,
        filter: ProductFilter,
    ) -> Result<Vec<ProductDetails>, RepositoryError> {
        let sql = details_query(
            "p.store_id = $1
             AND ($2::uuid IS NULL OR p.category_id = $2)
             AND ($3::uuid IS NULL OR p.color_id = $3)
             AND ($4::uuid IS NULL OR p.size_id = $4)
             AND (NOT $5 OR p.is_featured)
             AND ($6 OR NOT p.is_archived)",
        );
        let rows = sqlx::query_as::<_, ProductDetailsRow>(&sql)
            .bind(store_id)
            .bind(filter.category_id)
            .bind(filter.color_id)
            .bind(filter.size_id)
            .bind(filter.featured_only)
            .bind(filter.include_archived)
            .fetch_all(&self.pool)
            .await?;

        self.attach_images(rows).await
    }

    async fn get_product(
        &self,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<Option<ProductDetails>, RepositoryError> {
        let sql = details_query("p.store_id = $1 AND p.id = $2");
        let row = sqlx::query_as::<_, ProductDetailsRow>(&sql)
            .bind(store_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(self.attach_images(vec![row]).await?.pop())
    }

    async fn update_product(
        &self,
        store_id: StoreId,
        id: ProductId,
        fields: ProductFields,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            UPDATE catalog.product AS p
            SET name = $3, price = $4, category_id = $5, color_id = $6, size_id = $7,
                is_featured = $8, is_archived = $9, updated_at = NOW()
            WHERE p.store_id = $1 AND p.id = $2
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(store_id)
        .bind(id)
        .bind(&fields.name)
        .bind(fields.price)
        .bind(fields.category_id)
        .bind(fields.color_id)
        .bind(fields.size_id)
        .bind(fields.is_featured)
        .bind(fields.is_archived)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query("DELETE FROM catalog.product_image WHERE product_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        insert_images(&mut tx, id, &fields.images).await?;
        tx.commit().await?;

        Ok(Some(row.into()))
    }

    async fn delete_product(
        &self,
        store_id: StoreId,
        id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            DELETE FROM catalog.product AS p
            WHERE p.store_id = $1 AND p.id = $2
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(store_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_fk(e, conflict::PRODUCT_IN_USE))?;

        Ok(row.map(Into::into))
    }
}
