//! Alias creation, resolution and deletion service.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::debug;
use url::Url;

use crate::domain::repositories::{AliasRepository, StoreError};
use crate::utils::alias_generator::{DEFAULT_ALIAS_LENGTH, generate_alias, is_reserved_alias};

/// Default number of attempts when saving under a generated alias.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Pause between attempts after a generated alias collided.
const RETRY_DELAY: Duration = Duration::from_millis(5);

/// Failures of alias operations, classified for the HTTP boundary.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed input.
    #[error("{0}")]
    Validation(String),

    /// The requested alias is already bound.
    #[error("alias already exists")]
    AliasExists,

    /// No binding exists for the alias.
    #[error("alias not found")]
    NotFound,

    /// Every generated alias collided with an existing binding.
    #[error("no free alias found after {0} attempts")]
    AliasGenerationExhausted(usize),

    /// The store failed below the business-rule level.
    #[error(transparent)]
    Storage(StoreError),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::AliasExists => Self::AliasExists,
            StoreError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}

/// A binding created by [`AliasService::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedAlias {
    pub id: i64,
    pub alias: String,
}

/// Service for creating, resolving and deleting alias bindings.
///
/// Generic over the repository so tests can use mocks; the server uses
/// `AliasService<dyn AliasRepository>` to pick the backend at runtime.
pub struct AliasService<R: AliasRepository + ?Sized = dyn AliasRepository> {
    repository: Arc<R>,
    alias_length: usize,
    max_attempts: usize,
}

impl<R: AliasRepository + ?Sized> AliasService<R> {
    /// Creates a service generating 6-character aliases with up to 5 attempts.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            alias_length: DEFAULT_ALIAS_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides the generated alias length and the attempt bound.
    ///
    /// `max_attempts` is clamped to at least one attempt.
    pub fn with_alias_policy(mut self, alias_length: usize, max_attempts: usize) -> Self {
        self.alias_length = alias_length;
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Binds `target_url` to `alias`, or to a generated alias when `alias`
    /// is `None` or empty.
    ///
    /// A caller-supplied alias is tried exactly once. A generated alias is
    /// regenerated on conflict, up to the configured number of attempts.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Validation`] if the URL is not an absolute
    /// http(s) URL or the alias is reserved.
    /// Returns [`ServiceError::AliasExists`] if the supplied alias is taken.
    /// Returns [`ServiceError::AliasGenerationExhausted`] if every generated
    /// alias collided.
    /// Returns [`ServiceError::Storage`] on storage errors.
    pub async fn create(
        &self,
        target_url: &str,
        alias: Option<&str>,
    ) -> Result<CreatedAlias, ServiceError> {
        validate_target_url(target_url)?;

        match alias.filter(|a| !a.is_empty()) {
            Some(alias) => {
                if is_reserved_alias(alias) {
                    return Err(ServiceError::Validation(format!(
                        "alias '{alias}' is reserved"
                    )));
                }

                let id = self.repository.save(target_url, alias).await?;

                Ok(CreatedAlias {
                    id,
                    alias: alias.to_string(),
                })
            }
            None => self.create_with_generated_alias(target_url).await,
        }
    }

    /// Returns the target URL bound to `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the alias is empty or unbound.
    /// Returns [`ServiceError::Storage`] on storage errors.
    pub async fn resolve(&self, alias: &str) -> Result<String, ServiceError> {
        if alias.is_empty() {
            return Err(ServiceError::NotFound);
        }

        Ok(self.repository.resolve(alias).await?)
    }

    /// Deletes the binding for `alias`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the alias is empty or unbound.
    /// Returns [`ServiceError::Storage`] on storage errors.
    pub async fn delete(&self, alias: &str) -> Result<(), ServiceError> {
        if alias.is_empty() {
            return Err(ServiceError::NotFound);
        }

        Ok(self.repository.delete(alias).await?)
    }

    async fn create_with_generated_alias(
        &self,
        target_url: &str,
    ) -> Result<CreatedAlias, ServiceError> {
        let strategy = FixedInterval::new(RETRY_DELAY).take(self.max_attempts - 1);

        let repository = Arc::clone(&self.repository);
        let alias_length = self.alias_length;
        let target_url = target_url.to_string();

        let attempt = move || {
            let repository = Arc::clone(&repository);
            let target_url = target_url.clone();

            async move {
                let alias = generate_alias(alias_length);
                repository
                    .save(&target_url, &alias)
                    .await
                    .map(|id| CreatedAlias { id, alias })
            }
        };

        let collided = |e: &StoreError| {
            let collided = matches!(e, StoreError::AliasExists);
            if collided {
                debug!("generated alias collided, regenerating");
            }
            collided
        };

        RetryIf::spawn(strategy, attempt, collided)
            .await
            .map_err(|e| match e {
                StoreError::AliasExists => {
                    ServiceError::AliasGenerationExhausted(self.max_attempts)
                }
                other => other.into(),
            })
    }
}

/// Checks that `target_url` is an absolute http or https URL.
///
/// Control characters are rejected: the raw string is stored and later
/// sent back as the `Location` header.
fn validate_target_url(target_url: &str) -> Result<(), ServiceError> {
    if target_url.is_empty() {
        return Err(ServiceError::Validation(
            "field url is a required field".to_string(),
        ));
    }

    if target_url.chars().any(char::is_control) {
        return Err(ServiceError::Validation(
            "field url is not a valid URL".to_string(),
        ));
    }

    let parsed = Url::parse(target_url)
        .map_err(|_| ServiceError::Validation("field url is not a valid URL".to_string()))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ServiceError::Validation(
            "field url must use http or https".to_string(),
        ));
    }

    Ok(())
}
