//! PostgreSQL implementation of alias repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::repositories::{AliasRepository, StoreError};
use crate::utils::db_error::is_unique_violation_on_alias;

/// PostgreSQL repository for alias bindings.
///
/// Alias uniqueness is enforced by the `url_alias_key` unique constraint;
/// a violation is reported as [`StoreError::AliasExists`].
pub struct PgAliasRepository {
    pool: Arc<PgPool>,
}

impl PgAliasRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AliasRepository for PgAliasRepository {
    async fn save(&self, target_url: &str, alias: &str) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO url (url, alias)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(target_url)
        .bind(alias)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation_on_alias(&e) {
                StoreError::AliasExists
            } else {
                StoreError::Unavailable(e)
            }
        })
    }

    async fn resolve(&self, alias: &str) -> Result<String, StoreError> {
        sqlx::query_scalar::<_, String>("SELECT url FROM url WHERE alias = $1")
            .bind(alias)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, alias: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM url WHERE alias = $1")
            .bind(alias)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}
