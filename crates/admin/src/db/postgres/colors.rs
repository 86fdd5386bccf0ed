use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use catalog_admin_core::{ColorId, StoreId};

use super::{PgCatalog, conflict_on_fk};
use crate::db::{ColorRepository, RepositoryError, conflict};
use crate::models::{Color, ColorFields};

#[derive(Debug, sqlx::FromRow)]
struct ColorRow {
    id: Uuid,
    store_id: Uuid,
    name: String,
    value: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ColorRow> for Color {
    fn from(row: ColorRow) -> Self {
        Self {
            id: ColorId::new(row.id),
            store_id: StoreId::new(row.store_id),
            name: row.name,
            value: row.value,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ColorRepository for PgCatalog {
    async fn create_color(
        &self,
        store_id: StoreId,
        fields: ColorFields,
    ) -> Result<Color, RepositoryError> {
        let row = sqlx::query_as::<_, ColorRow>(
            r"
            INSERT INTO catalog.color (store_id, name, value)
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

    async fn list_colors(&self, store_id: StoreId) -> Result<Vec<Color>, RepositoryError> {
        let rows = sqlx::query_as::<_, ColorRow>(
            r"
            SELECT id, store_id, name, value, created_at, updated_at
            FROM catalog.color
            WHERE store_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_color(
        &self,
        store_id: StoreId,
        id: ColorId,
    ) -> Result<Option<Color>, RepositoryError> {
        let row = sqlx::query_as::<_, ColorRow>(
            r"
            SELECT id, store_id, name, value, created_at, updated_at
            FROM catalog.color
            WHERE store_id = $1 AND id = $2
            ",
        )
        .bind(store_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn update_color(
        &self,
        store_id: StoreId,
        id: ColorId,
        fields: ColorFields,
    ) -> Result<Option<Color>, RepositoryError> {
        let row = sqlx::query_as::<_, ColorRow>(
            r"
            UPDATE catalog.color
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

    async fn delete_color(
        &self,
        store_id: StoreId,
        id: ColorId,
    ) -> Result<Option<Color>, RepositoryError> {
        let row = sqlx::query_as::<_, ColorRow>(
            r"
            DELETE FROM catalog.color
            WHERE store_id = $1 AND id = $2
            RETURNING id, store_id, name, value, created_at, updated_at
            ",
        )
        .bind(store_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_fk(e, conflict::COLOR_IN_USE))?;

        Ok(row.map(Into::into))
    }
}
