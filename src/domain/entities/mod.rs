//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`AliasRecord`] - A stored alias → URL binding

pub mod alias;

pub use alias::AliasRecord;
