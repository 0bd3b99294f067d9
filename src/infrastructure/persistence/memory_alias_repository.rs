//! In-memory implementation of alias repository.
//!
//! Bindings live only as long as the process. Used when no database is
//! configured and by the HTTP tests.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::entities::AliasRecord;
use crate::domain::repositories::{AliasRepository, StoreError};

/// Map-backed alias store.
///
/// The write lock is held across the occupancy check and the insert, so two
/// concurrent saves for one alias serialize and the second sees the first.
#[derive(Debug, Default)]
pub struct MemoryAliasRepository {
    records: RwLock<HashMap<String, AliasRecord>>,
    last_id: AtomicI64,
}

impl MemoryAliasRepository {
    /// Creates an empty store. The first saved record gets id `1`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live bindings.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns true if no bindings are stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl AliasRepository for MemoryAliasRepository {
    async fn save(&self, target_url: &str, alias: &str) -> Result<i64, StoreError> {
        let mut records = self.records.write().await;

        match records.entry(alias.to_string()) {
            Entry::Occupied(_) => Err(StoreError::AliasExists),
            Entry::Vacant(slot) => {
                let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
                slot.insert(AliasRecord::new(
                    id,
                    alias.to_string(),
                    target_url.to_string(),
                    Utc::now(),
                ));
                Ok(id)
            }
        }
    }

    async fn resolve(&self, alias: &str) -> Result<String, StoreError> {
        self.records
            .read()
            .await
            .get(alias)
            .map(|record| record.target_url.clone())
            .ok_or(StoreError::NotFound)
    }

    async fn delete(&self, alias: &str) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .remove(alias)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_save_then_resolve() {
        let repo = MemoryAliasRepository::new();

        let id = repo.save("https://example.com", "aZ3xQ9").await.unwrap();
        assert_eq!(id, 1);

        let url = repo.resolve("aZ3xQ9").await.unwrap();
        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_ids_increase() {
        let repo = MemoryAliasRepository::new();

        let first = repo.save("https://a.com", "a").await.unwrap();
        let second = repo.save("https://b.com", "b").await.unwrap();

        assert!(second > first);
    }

    #[tokio::test]
    async fn test_duplicate_alias_keeps_existing_binding() {
        let repo = MemoryAliasRepository::new();

        repo.save("https://a.com", "dup").await.unwrap();
        let result = repo.save("https://b.com", "dup").await;

        assert!(matches!(result, Err(StoreError::AliasExists)));
        assert_eq!(repo.resolve("dup").await.unwrap(), "https://a.com");
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_alias_is_case_sensitive() {
        let repo = MemoryAliasRepository::new();

        repo.save("https://lower.com", "abc").await.unwrap();
        repo.save("https://upper.com", "ABC").await.unwrap();

        assert_eq!(repo.resolve("abc").await.unwrap(), "https://lower.com");
        assert_eq!(repo.resolve("ABC").await.unwrap(), "https://upper.com");
    }

    #[tokio::test]
    async fn test_resolve_unknown_alias() {
        let repo = MemoryAliasRepository::new();

        let result = repo.resolve("missing").await;

        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_then_resolve() {
        let repo = MemoryAliasRepository::new();
        repo.save("https://example.com", "gone").await.unwrap();

        repo.delete("gone").await.unwrap();

        assert!(matches!(
            repo.resolve("gone").await,
            Err(StoreError::NotFound)
        ));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_unknown_alias_is_not_found() {
        let repo = MemoryAliasRepository::new();

        let result = repo.delete("missing").await;

        assert!(matches!(result, Err(StoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_alias_can_be_reused_after_delete() {
        let repo = MemoryAliasRepository::new();
        repo.save("https://old.com", "again").await.unwrap();
        repo.delete("again").await.unwrap();

        repo.save("https://new.com", "again").await.unwrap();

        assert_eq!(repo.resolve("again").await.unwrap(), "https://new.com");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_single_winner() {
        const CALLERS: usize = 32;

        let repo = Arc::new(MemoryAliasRepository::new());

        let handles: Vec<_> = (0..CALLERS)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.save(&format!("https://example.com/{i}"), "race").await
                })
            })
            .collect();

        let mut successes = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(StoreError::AliasExists) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(conflicts, CALLERS - 1);
        assert_eq!(repo.len().await, 1);
    }
}
