use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use catalog_admin_core::{BillboardId, CategoryId, StoreId};

use super::{PgCatalog, conflict_on_fk};
use crate::db::{CategoryRepository, RepositoryError, conflict};
use crate::models::{Billboard, Category, CategoryFields, CategoryWithBillboard};

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    store_id: Uuid,
    billboard_id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            store_id: StoreId::new(row.store_id),
            billboard_id: BillboardId::new(row.billboard_id),
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Category joined with its billboard.
#[derive(Debug, sqlx::FromRow)]
struct CategoryWithBillboardRow {
    #[sqlx(flatten)]
    category: CategoryRow,
    billboard_label: String,
    billboard_image_url: String,
    billboard_created_at: DateTime<Utc>,
    billboard_updated_at: DateTime<Utc>,
}

impl From<CategoryWithBillboardRow> for CategoryWithBillboard {
    fn from(row: CategoryWithBillboardRow) -> Self {
        let category = Category::from(row.category);
        let billboard = Billboard {
            id: category.billboard_id,
            store_id: category.store_id,
            label: row.billboard_label,
            image_url: row.billboard_image_url,
            created_at: row.billboard_created_at,
            updated_at: row.billboard_updated_at,
        };
        Self {
            category,
            billboard,
        }
    }
}

const SELECT_WITH_BILLBOARD: &str = r"
    SELECT c.id, c.store_id, c.billboard_id, c.name, c.created_at, c.updated_at,
           b.label AS billboard_label,
           b.image_url AS billboard_image_url,
           b.created_at AS billboard_created_at,
           b.updated_at AS billboard_updated_at
    FROM catalog.category c
    JOIN catalog.billboard b ON b.id = c.billboard_id
";

#[async_trait]
impl CategoryRepository for PgCatalog {
    async fn create_category(
        &self,
        store_id: StoreId,
        fields: CategoryFields,
    ) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            INSERT INTO catalog.category (store_id, billboard_id, name)
            VALUES ($1, $2, $3)
            RETURNING id, store_id, billboard_id, name, created_at, updated_at
            ",
        )
        .bind(store_id)
        .bind(fields.billboard_id)
        .bind(&fields.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_categories(
        &self,
        store_id: StoreId,
    ) -> Result<Vec<CategoryWithBillboard>, RepositoryError> {
        let sql = format!("{SELECT_WITH_BILLBOARD} WHERE c.store_id = $1 ORDER BY c.created_at DESC");
        let rows = sqlx::query_as::<_, CategoryWithBillboardRow>(&sql)
            .bind(store_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Option<CategoryWithBillboard>, RepositoryError> {
        let sql = format!("{SELECT_WITH_BILLBOARD} WHERE c.store_id = $1 AND c.id = $2");
        let row = sqlx::query_as::<_, CategoryWithBillboardRow>(&sql)
            .bind(store_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    async fn update_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
        fields: CategoryFields,
    ) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            UPDATE catalog.category
            SET name = $3, billboard_id = $4, updated_at = NOW()
            WHERE store_id = $1 AND id = $2
            RETURNING id, store_id, billboard_id, name, created_at, updated_at
            ",
        )
        .bind(store_id)
        .bind(id)
        .bind(&fields.name)
        .bind(fields.billboard_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete_category(
        &self,
        store_id: StoreId,
        id: CategoryId,
    ) -> Result<Option<Category>, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r"
            DELETE FROM catalog.category
            WHERE store_id = $1 AND id = $2
            RETURNING id, store_id, billboard_id, name, created_at, updated_at
            ",
        )
        .bind(store_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_fk(e, conflict::CATEGORY_IN_USE))?;

        Ok(row.map(Into::into))
    }
}
