//! Business logic services for the application layer.

pub mod alias_service;
pub mod token_verifier;

pub use alias_service::{AliasService, CreatedAlias, ServiceError};
pub use token_verifier::{Claims, TokenError, TokenVerifier, verify_token};
