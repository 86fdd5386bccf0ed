use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use catalog_admin_core::{BillboardId, StoreId};

use super::{PgCatalog, conflict_on_fk};
use crate::db::{BillboardRepository, RepositoryError, conflict};
use crate::models::{Billboard, BillboardFields};

#[derive(Debug, sqlx::FromRow)]
struct BillboardRow {
    id: Uuid,
    store_id: Uuid,
    label: String,
    image_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BillboardRow> for Billboard {
    fn from(row: BillboardRow) -> Self {
        Self {
            id: BillboardId::new(row.id),
            store_id: StoreId::new(row.store_id),
            label: row.label,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl BillboardRepository for PgCatalog {
    async fn create_billboard(
        &self,
        store_id: StoreId,
        fields: BillboardFields,
    ) -> Result<Billboard, RepositoryError> {
        let row = sqlx::query_as::<_, BillboardRow>(
            r"
            INSERT INTO catalog.billboard (store_id, label, image_url)
            VALUES ($1, $2, $3)
            RETURNING id, store_id, label, image_url, created_at, updated_at
            ",
        )
        .bind(store_id)
        .bind(&fields.label)
        .bind(&fields.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_billboards(&self, store_id: StoreId) -> Result<Vec<Billboard>, RepositoryError> {
        let rows = sqlx::query_as::<_, BillboardRow>(
            r"
            SELECT id, store_id, label, image_url, created_at, updated_at
            FROM catalog.billboard
            WHERE store_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<Option<Billboard>, RepositoryError> {
        let row = sqlx::query_as::<_, BillboardRow>(
            r"
            SELECT id, store_id, label, image_url, created_at, updated_at
            FROM catalog.billboard
            WHERE store_id = $1 AND id = $2
            ",
        )
        .bind(store_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn update_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
        fields: BillboardFields,
    ) -> Result<Option<Billboard>, RepositoryError> {
        let row = sqlx::query_as::<_, BillboardRow>(
            r"
            UPDATE catalog.billboard
            SET label = $3, image_url = $4, updated_at = NOW()
            WHERE store_id = $1 AND id = $2
            RETURNING id, store_id, label, image_url, created_at, updated_at
            ",
        )
        .bind(store_id)
        .bind(id)
        .bind(&fields.label)
        .bind(&fields.image_url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete_billboard(
        &self,
        store_id: StoreId,
        id: BillboardId,
    ) -> Result<Option<Billboard>, RepositoryError> {
        let row = sqlx::query_as::<_, BillboardRow>(
            r"
            DELETE FROM catalog.billboard
            WHERE store_id = $1 AND id = $2
            RETURNING id, store_id, label, image_url, created_at, updated_at
            ",
        )
        .bind(store_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_fk(e, conflict::BILLBOARD_IN_USE))?;

        Ok(row.map(Into::into))
    }
}
