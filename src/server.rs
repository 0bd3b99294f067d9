//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, database connections, migrations and the Axum
//! server lifecycle including graceful shutdown.

use crate::config::Config;
use crate::domain::repositories::AliasRepository;
use crate::infrastructure::persistence::{MemoryAliasRepository, PgAliasRepository};
use crate::routes::{RouterConfig, app_router};
use crate::shutdown;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;

/// Connects to PostgreSQL and applies pending migrations.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub async fn connect_pool(config: &Config, database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(pool)
}

/// Opens the alias store selected by the configuration.
///
/// Returns the PostgreSQL store (and its pool, for closing on shutdown)
/// when `DATABASE_URL` is set, the in-memory store otherwise.
///
/// # Errors
///
/// Returns an error if the database cannot be reached or migrated.
pub async fn open_store(config: &Config) -> Result<(Arc<dyn AliasRepository>, Option<PgPool>)> {
    match config.database_url {
        Some(ref database_url) => {
            let pool = connect_pool(config, database_url).await?;
            let repository = PgAliasRepository::new(Arc::new(pool.clone()));
            Ok((Arc::new(repository), Some(pool)))
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, aliases are kept in memory");
            Ok((Arc::new(MemoryAliasRepository::new()), None))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Alias store (PostgreSQL with migrations, or in-memory)
/// - Application state and router
/// - Axum HTTP server with graceful shutdown
///
/// After a shutdown signal, in-flight requests get `SHUTDOWN_TIMEOUT` to
/// finish before the server is dropped.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (repository, pool) = open_store(&config).await?;

    let state = AppState::from_config(repository, &config);
    let router = app_router(state, &RouterConfig::from(&config));
    let app = NormalizePathLayer::trim_trailing_slash().layer(router);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    let shutdown_requested = Arc::new(Notify::new());
    let notify = Arc::clone(&shutdown_requested);

    let server = axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(async move {
            shutdown::signal().await;
            notify.notify_one();
        })
        .into_future();

    let grace = config.shutdown_timeout();
    let deadline = async {
        shutdown_requested.notified().await;
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server => result.context("Server error")?,
        _ = deadline => {
            tracing::warn!(
                "Graceful shutdown timed out after {}s, dropping in-flight requests",
                grace.as_secs()
            );
        }
    }

    if let Some(pool) = pool {
        pool.close().await;
        tracing::info!("Database pool closed");
    }

    tracing::info!("Server stopped");

    Ok(())
}
