use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use catalog_admin_core::{SizeId, StoreId};

use super::{PgCatalog, conflict_on_fk};
use crate::db::{SizeRepository, RepositoryError, conflict};
use crate::models::{Size, SizeFields};

#[derive(Debug, sqlx::FromRow)]
struct SizeRow {
    id: Uuid,
    store_id: Uuid,
    name: String,
    value: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SizeRow> for Size {
    fn from(row: SizeRow) -> Self {
        Self {
            id: SizeId::new(row.id),
            store_id: StoreId::new(row.store_id),
            name: row.name,
            value: row.value,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl SizeRepository for PgCatalog {
    async fn create_size(
        &self,
        store_id: StoreId,
        fields: SizeFields,
    ) -> Result<Size, RepositoryError> {
        let row = sqlx::query_as::<_, SizeRow>(
            r"
            INSERT INTO catalog.size (store_id, name, value)
            VALUES ($1, $2, $3)
            RETURNING id, store_id, name, value, created_at, updated_at
            ",
        )
        .bind(store_id)
        .bind(&fields.name)
        .bind(&fields.value)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_sizes(&self, store_id: StoreId) -> Result<Vec<Size>, RepositoryError> {
        let rows = sqlx::query_as::<_, SizeRow>(
            r"
            SELECT id, store_id, name, value, created_at, updated_at
            FROM catalog.size
            WHERE store_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_size(
        &self,
        store_id: StoreId,
        id: SizeId,
    ) -> Result<Option<Size>, RepositoryError> {
        let row = sqlx::query_as::<_, SizeRow>(
            r"
            SELECT id, store_id, name, value, created_at, updated_at
            FROM catalog.size
            WHERE store_id = $1 AND id = $2
            ",
        )
        .bind(store_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn update_size(
        &self,
        store_id: StoreId,
        id: SizeId,
        fields: SizeFields,
    ) -> Result<Option<Size>, RepositoryError> {
        let row = sqlx::query_as::<_, SizeRow>(
            r"
            UPDATE catalog.size
            SET name = $3, value = $4, updated_at = NOW()
            WHERE store_id = $1 AND id = $2
            RETURNING id, store_id, name, value, created_at, updated_at
            ",
        )
        .bind(store_id)
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.value)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete_size(
        &self,
        store_id: StoreId,
        id: SizeId,
    ) -> Result<Option<Size>, RepositoryError> {
        let row = sqlx::query_as::<_, SizeRow>(
            r"
            DELETE FROM catalog.size
            WHERE store_id = $1 AND id = $2
            RETURNING id, store_id, name, value, created_at, updated_at
            ",
        )
        .bind(store_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_fk(e, conflict::SIZE_IN_USE))?;

        Ok(row.map(Into::into))
    }
}
