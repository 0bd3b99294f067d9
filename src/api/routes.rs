//! API route configuration.

use crate::api::handlers::{redirect_handler, remove_handler, save_handler};
use crate::api::middleware::basic_auth;
use crate::state::AppState;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// Alias routes.
///
/// # Endpoints
///
/// - `POST   /url`      - Bind a URL to an alias (Basic credentials if configured)
/// - `GET    /{alias}`  - Redirect to the bound URL
/// - `DELETE /{alias}`  - Remove the binding
pub fn alias_routes(state: &AppState) -> Router<AppState> {
    let create = Router::new()
        .route("/url", post(save_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            basic_auth::layer,
        ));

    Router::new()
        .merge(create)
        .route("/{alias}", get(redirect_handler).delete(remove_handler))
}
