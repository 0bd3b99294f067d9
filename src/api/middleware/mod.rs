//! HTTP middleware for request processing.
//!
//! Provides bearer token identification, Basic credentials for the create
//! route, and request tracing.

pub mod auth;
pub mod basic_auth;
pub mod tracing;

pub use auth::AuthContext;
