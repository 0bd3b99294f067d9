//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST   /url`      - Create an alias
//! - `GET    /{alias}`  - Redirect
//! - `DELETE /{alias}`  - Delete an alias
//!
//! # Middleware (outermost first)
//!
//! - **Request id** - `x-request-id` assigned when absent and echoed on the response
//! - **Tracing** - Structured request/response logging inside a request-id span
//! - **CORS** - Configured origins
//! - **Timeout** - 408 once the request timeout elapses
//! - **Authentication** - Bearer token identification (never rejects)

use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method, StatusCode, header};
use axum::{Router, middleware};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;

use crate::api;
use crate::api::middleware::tracing::REQUEST_ID_HEADER;
use crate::api::middleware::{auth, tracing};
use crate::config::{self, Config};
use crate::state::AppState;

/// HTTP-level settings applied around the routes.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    pub request_timeout: Duration,
    /// Allowed CORS origins; `"*"` allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(4),
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

impl From<&Config> for RouterConfig {
    fn from(config: &Config) -> Self {
        Self {
            request_timeout: config.request_timeout(),
            cors_allowed_origins: config.cors_allowed_origins.clone(),
        }
    }
}

/// Constructs the application router with all routes and middleware.
///
/// Trailing-slash normalization is applied by the server around this router.
pub fn app_router(state: AppState, config: &RouterConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    api::routes::alias_routes(&state)
        .layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(tracing::layer())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if config::allows_any_origin(origins) {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::ACCEPT, header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([header::LINK, HeaderName::from_static(REQUEST_ID_HEADER)])
        .max_age(Duration::from_secs(300))
}
