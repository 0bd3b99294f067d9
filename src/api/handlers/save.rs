//! Handler for the alias creation endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tracing::{debug, error, info};
use validator::Validate;

use crate::api::dto::{ApiResponse, SaveRequest};
use crate::api::middleware::AuthContext;
use crate::application::services::ServiceError;
use crate::error::AppError;
use crate::state::AppState;

/// Binds a URL to a caller-supplied or generated alias.
///
/// # Endpoint
///
/// `POST /url`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "alias": "my-link" }
/// ```
///
/// `alias` is optional; a random one is generated when omitted or empty.
///
/// # Response
///
/// ```json
/// { "status": "OK", "alias": "aZ3xQ9" }
/// ```
///
/// # Errors
///
/// - 400 `empty request` if the body is missing or not valid JSON
/// - 400 with the validation detail if a field is invalid
/// - 409 `url already exists` if the alias is already bound
/// - 500 `failed to add url` on storage failure or alias exhaustion
pub async fn save_handler(
    State(state): State<AppState>,
    auth: AuthContext,
    payload: Result<Json<SaveRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| {
        debug!(error = %e, "failed to decode request body");
        AppError::bad_request("empty request")
    })?;

    let payload = payload.normalized();
    payload.validate()?;

    let created = state
        .alias_service
        .create(&payload.url, payload.alias.as_deref())
        .await
        .map_err(|e| match e {
            ServiceError::Validation(message) => AppError::bad_request(message),
            ServiceError::AliasExists => {
                info!(url = %payload.url, "url already exists");
                AppError::conflict("url already exists")
            }
            other => {
                error!(error = %other, "failed to add url");
                AppError::internal("failed to add url")
            }
        })?;

    info!(id = created.id, alias = %created.alias, uid = ?auth.uid(), "url added");

    Ok(Json(ApiResponse::with_alias(created.alias)))
}
