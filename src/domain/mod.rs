//! Domain layer containing business entities and storage contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on the HTTP or infrastructure layers.
//! Repository traits define contracts implemented by the infrastructure layer,
//! and business rules live in [`crate::application::services`].

pub mod entities;
pub mod repositories;
