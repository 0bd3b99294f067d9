//! Repository trait for alias binding storage.

use async_trait::async_trait;
use thiserror::Error;

/// Failures reported by an alias store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The alias is already bound to a record.
    #[error("alias already exists")]
    AliasExists,

    /// No live record has the requested alias.
    #[error("alias not found")]
    NotFound,

    /// Lower-level storage failure (connection, disk, corruption).
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}

/// Repository interface for alias → URL bindings.
///
/// Implementations must be safe for concurrent use and must enforce alias
/// uniqueness atomically: two concurrent `save` calls for the same alias
/// never both succeed, and an existing binding is never overwritten.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAliasRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryAliasRepository`] - in-process map
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_alias.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AliasRepository: Send + Sync {
    /// Binds `alias` to `target_url` and returns the new record id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AliasExists`] if the alias is already bound.
    /// Returns [`StoreError::Unavailable`] on storage errors.
    async fn save(&self, target_url: &str, alias: &str) -> Result<i64, StoreError>;

    /// Looks up the target URL bound to `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record has this alias.
    /// Returns [`StoreError::Unavailable`] on storage errors.
    async fn resolve(&self, alias: &str) -> Result<String, StoreError>;

    /// Physically deletes the record bound to `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record was deleted.
    /// Returns [`StoreError::Unavailable`] on storage errors.
    async fn delete(&self, alias: &str) -> Result<(), StoreError>;
}
