#![allow(dead_code)]

use alias_shortener::application::services::{AliasService, TokenVerifier};
use alias_shortener::domain::repositories::{AliasRepository, StoreError};
use alias_shortener::infrastructure::persistence::MemoryAliasRepository;
use alias_shortener::routes::{RouterConfig, app_router};
use alias_shortener::state::AppState;
use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::Arc;

pub const TEST_SECRET: &str = "test-app-secret";

pub fn create_test_state() -> (AppState, Arc<MemoryAliasRepository>) {
    let repo = Arc::new(MemoryAliasRepository::new());
    let store: Arc<dyn AliasRepository> = repo.clone();

    let state = AppState::new(
        Arc::new(AliasService::new(store)),
        Arc::new(TokenVerifier::new(TEST_SECRET)),
    );

    (state, repo)
}

/// Store whose every operation fails.
///
/// With `collide` set, saves report the alias as taken instead of failing,
/// so every generated alias collides.
pub struct FailingAliasRepository {
    collide: bool,
}

impl FailingAliasRepository {
    pub fn unavailable() -> Self {
        Self { collide: false }
    }

    pub fn colliding() -> Self {
        Self { collide: true }
    }
}

#[async_trait]
impl AliasRepository for FailingAliasRepository {
    async fn save(&self, _target_url: &str, _alias: &str) -> Result<i64, StoreError> {
        if self.collide {
            Err(StoreError::AliasExists)
        } else {
            Err(StoreError::Unavailable(sqlx::Error::PoolClosed))
        }
    }

    async fn resolve(&self, _alias: &str) -> Result<String, StoreError> {
        Err(StoreError::Unavailable(sqlx::Error::PoolClosed))
    }

    async fn delete(&self, _alias: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(sqlx::Error::PoolClosed))
    }
}

pub fn create_state_with_store(store: Arc<dyn AliasRepository>) -> AppState {
    AppState::new(
        Arc::new(AliasService::new(store)),
        Arc::new(TokenVerifier::new(TEST_SECRET)),
    )
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(app_router(state, &RouterConfig::default())).unwrap()
}

pub async fn create_test_alias(repo: &MemoryAliasRepository, alias: &str, url: &str) -> i64 {
    repo.save(url, alias).await.unwrap()
}

pub fn issue_token(uid: i64) -> String {
    TokenVerifier::new(TEST_SECRET)
        .issue(uid, chrono::Duration::hours(1))
        .unwrap()
}
