//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::alias_service::AliasService`] - Alias creation, resolution and deletion
//! - [`services::token_verifier::TokenVerifier`] - Bearer token verification

pub mod services;
