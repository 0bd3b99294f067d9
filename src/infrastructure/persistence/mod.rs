//! Alias repository implementations.
//!
//! # Repositories
//!
//! - [`PgAliasRepository`] - PostgreSQL storage, uniqueness via a unique index
//! - [`MemoryAliasRepository`] - in-process storage for development and tests

pub mod memory_alias_repository;
pub mod pg_alias_repository;

pub use memory_alias_repository::MemoryAliasRepository;
pub use pg_alias_repository::PgAliasRepository;
