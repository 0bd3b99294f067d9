//! Handler for alias deletion.

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use tracing::{error, info, warn};

use crate::api::middleware::AuthContext;
use crate::application::services::ServiceError;
use crate::error::AppError;
use crate::state::AppState;

/// Deletes the binding for an alias.
///
/// # Endpoint
///
/// `DELETE /{alias}`
///
/// # Errors
///
/// Returns 401 `unauthorized` if deletes require a verified token and the
/// request has none.
/// Returns 404 `not found` if the alias is not bound.
/// Returns 500 `internal error` on storage failure.
pub async fn remove_handler(
    Path(alias): Path<String>,
    State(state): State<AppState>,
    auth: AuthContext,
) -> Result<StatusCode, AppError> {
    if state.delete_requires_auth && !auth.is_authenticated() {
        warn!(alias = %alias, "delete rejected without a verified token");
        return Err(AppError::unauthorized());
    }

    state
        .alias_service
        .delete(&alias)
        .await
        .map_err(|e| match e {
            ServiceError::NotFound => {
                info!(alias = %alias, "url not found");
                AppError::not_found()
            }
            other => {
                error!(alias = %alias, error = %other, "failed to delete url");
                AppError::internal("internal error")
            }
        })?;

    info!(alias = %alias, uid = ?auth.uid(), "url deleted");

    Ok(StatusCode::NO_CONTENT)
}
