//! Handler for alias redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::application::services::ServiceError;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its target URL.
///
/// # Endpoint
///
/// `GET /{alias}`
///
/// # Errors
///
/// Returns 404 `not found` if the alias is not bound.
/// Returns 500 `internal error` on storage failure or when the stored URL
/// cannot be sent as a `Location` header.
pub async fn redirect_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let target_url = state
        .alias_service
        .resolve(&alias)
        .await
        .map_err(|e| match e {
            ServiceError::NotFound => {
                info!(alias = %alias, "url not found");
                AppError::not_found()
            }
            other => {
                error!(alias = %alias, error = %other, "failed to get url");
                AppError::internal("internal error")
            }
        })?;

    let location = HeaderValue::from_str(&target_url).map_err(|e| {
        error!(alias = %alias, error = %e, "stored url is not a valid header value");
        AppError::internal("internal error")
    })?;

    info!(alias = %alias, url = %target_url, "got url");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
