//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are
//! auto-generated via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`AliasRepository`] - Alias binding save / resolve / delete

pub mod alias_repository;

pub use alias_repository::{AliasRepository, StoreError};

#[cfg(test)]
pub use alias_repository::MockAliasRepository;
