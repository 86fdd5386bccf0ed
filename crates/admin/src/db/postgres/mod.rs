//! `PostgreSQL` catalog.
//!
//! Queries are runtime-checked (`sqlx::query_as`) against the `catalog`
//! schema. Each resource lives in its own module; all of them implement
//! their repository trait on [`PgCatalog`].

mod billboards;
mod categories;
mod colors;
mod orders;
mod products;
mod sizes;
mod stores;

use async_trait::async_trait;
use sqlx::PgPool;

use super::{CatalogStore, RepositoryError};

/// Catalog backed by a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    /// Wrap an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalog {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// Map a foreign key violation to [`RepositoryError::Conflict`] with the
/// given message; other errors pass through.
fn conflict_on_fk(err: sqlx::Error, message: &str) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            RepositoryError::Conflict(message.to_string())
        }
        _ => RepositoryError::Database(err),
    }
}
