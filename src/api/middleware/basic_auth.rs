//! HTTP Basic credentials guard for the create route.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_auth::AuthBasic;
use tracing::warn;

use crate::config::BasicCredentials;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the configured Basic credentials, if any.
///
/// Passes every request through when no credentials are configured.
/// Otherwise a missing or wrong `Authorization: Basic` header gets
/// `401 Unauthorized` with a `WWW-Authenticate: Basic` challenge.
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let Some(expected) = st.basic_credentials.clone() else {
        return next.run(req).await;
    };

    let (mut parts, body) = req.into_parts();

    let authorized = match AuthBasic::from_request_parts(&mut parts, &()).await {
        Ok(AuthBasic((user, password))) => {
            credentials_match(&expected, &user, password.as_deref())
        }
        Err(_) => false,
    };

    if !authorized {
        warn!("rejected request with missing or wrong basic credentials");
        return (
            [(header::WWW_AUTHENTICATE, r#"Basic realm="alias-shortener""#)],
            AppError::unauthorized(),
        )
            .into_response();
    }

    next.run(Request::from_parts(parts, body)).await
}

fn credentials_match(expected: &BasicCredentials, user: &str, password: Option<&str>) -> bool {
    expected.user == user && password == Some(expected.password.as_str())
}
