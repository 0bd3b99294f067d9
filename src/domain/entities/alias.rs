//! Alias record entity representing a stored URL binding.

use chrono::{DateTime, Utc};

/// A persisted binding between an alias and its target URL.
///
/// Records are never mutated after creation; the only way to change a
/// binding is to delete it and save a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasRecord {
    pub id: i64,
    pub alias: String,
    pub target_url: String,
    pub created_at: DateTime<Utc>,
}

impl AliasRecord {
    /// Creates a new AliasRecord instance.
    pub fn new(id: i64, alias: String, target_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            alias,
            target_url,
            created_at,
        }
    }
}
