//! Shared application state for Axum handlers.

use std::sync::Arc;

use crate::application::services::{AliasService, TokenVerifier};
use crate::config::{BasicCredentials, Config};
use crate::domain::repositories::AliasRepository;

/// Application state injected into all handlers and middleware.
///
/// Cheap to clone: services are shared behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub alias_service: Arc<AliasService>,
    pub token_verifier: Arc<TokenVerifier>,
    /// When set, `POST /url` requires these HTTP Basic credentials.
    pub basic_credentials: Option<Arc<BasicCredentials>>,
    /// When true, `DELETE /{alias}` requires a verified bearer token.
    pub delete_requires_auth: bool,
}

impl AppState {
    /// Creates state with optional protections disabled.
    pub fn new(alias_service: Arc<AliasService>, token_verifier: Arc<TokenVerifier>) -> Self {
        Self {
            alias_service,
            token_verifier,
            basic_credentials: None,
            delete_requires_auth: false,
        }
    }

    /// Builds state for `repository` from the loaded configuration.
    pub fn from_config(repository: Arc<dyn AliasRepository>, config: &Config) -> Self {
        let alias_service = AliasService::new(repository)
            .with_alias_policy(config.alias_length, config.alias_max_attempts);

        Self::new(
            Arc::new(alias_service),
            Arc::new(TokenVerifier::new(&config.app_secret)),
        )
        .with_basic_credentials(config.basic_credentials())
        .with_delete_requires_auth(config.delete_requires_auth)
    }

    pub fn with_basic_credentials(mut self, credentials: Option<BasicCredentials>) -> Self {
        self.basic_credentials = credentials.map(Arc::new);
        self
    }

    pub fn with_delete_requires_auth(mut self, required: bool) -> Self {
        self.delete_requires_auth = required;
        self
    }
}
