use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use catalog_admin_core::{StoreId, UserId};

use super::{PgCatalog, conflict_on_fk};
use crate::db::{RepositoryError, StoreRepository, conflict};
use crate::models::{Store, StoreFields};

#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    id: Uuid,
    name: String,
    user_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<StoreRow> for Store {
    type Error = RepositoryError;

    fn try_from(row: StoreRow) -> Result<Self, Self::Error> {
        let user_id = UserId::parse(&row.user_id).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid user id in database: {e}"))
        })?;

        Ok(Self {
            id: StoreId::new(row.id),
            name: row.name,
            user_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl StoreRepository for PgCatalog {
    async fn create_store(
        &self,
        user_id: &UserId,
        fields: StoreFields,
    ) -> Result<Store, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            INSERT INTO catalog.store (name, user_id)
            VALUES ($1, $2)
            RETURNING id, name, user_id, created_at, updated_at
            ",
        )
        .bind(&fields.name)
        .bind(user_id.as_str())
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn find_owned_store(
        &self,
        store_id: StoreId,
        user_id: &UserId,
    ) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, name, user_id, created_at, updated_at
            FROM catalog.store
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(store_id)
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn first_store(&self, user_id: &UserId) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, name, user_id, created_at, updated_at
            FROM catalog.store
            WHERE user_id = $1
            ORDER BY created_at ASC
            LIMIT 1
            ",
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list_stores(&self, user_id: &UserId) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, name, user_id, created_at, updated_at
            FROM catalog.store
            WHERE user_id = $1
            ORDER BY created_at ASC
            ",
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn update_store(
        &self,
        store_id: StoreId,
        fields: StoreFields,
    ) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            UPDATE catalog.store
            SET name = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, user_id, created_at, updated_at
            ",
        )
        .bind(store_id)
        .bind(&fields.name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn delete_store(&self, store_id: StoreId) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            DELETE FROM catalog.store
            WHERE id = $1
            RETURNING id, name, user_id, created_at, updated_at
            ",
        )
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_fk(e, conflict::STORE_IN_USE))?;

        row.map(TryInto::try_into).transpose()
    }
}
