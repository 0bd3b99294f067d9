//! Bearer token identification middleware.
//!
//! Unlike a guard, this layer never rejects a request: it records who the
//! caller is (or that the presented token was bad) and lets handlers decide.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use tracing::{info, warn};

use crate::application::services::{TokenError, TokenVerifier};
use crate::state::AppState;

/// Outcome of bearer token verification for one request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthContext {
    /// No bearer credential was presented.
    #[default]
    Anonymous,
    /// The token verified; `uid` is its subject.
    Authenticated { uid: i64 },
    /// A token was presented but failed verification.
    Invalid(TokenError),
}

impl AuthContext {
    /// Verifies `token` and classifies the outcome.
    pub fn from_token(verifier: &TokenVerifier, token: &str) -> Self {
        match verifier.verify(token) {
            Ok(claims) => Self::Authenticated { uid: claims.uid },
            Err(e) => Self::Invalid(e),
        }
    }

    pub fn uid(&self) -> Option<i64> {
        match self {
            Self::Authenticated { uid } => Some(*uid),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

/// Attaches an [`AuthContext`] to every request.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// A missing header, or one with another scheme, yields
/// [`AuthContext::Anonymous`]. A bearer token that fails verification yields
/// [`AuthContext::Invalid`] and is logged at `warn`.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let app = Router::new()
///     .route("/{alias}", get(redirect_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let context = match AuthBearer::from_request_parts(&mut parts, &()).await {
        Ok(AuthBearer(token)) => AuthContext::from_token(&st.token_verifier, &token),
        Err(_) => AuthContext::Anonymous,
    };

    match &context {
        AuthContext::Authenticated { uid } => info!(uid, "user authorized"),
        AuthContext::Invalid(e) => warn!(error = %e, "failed to verify bearer token"),
        AuthContext::Anonymous => {}
    }

    parts.extensions.insert(context);

    next.run(Request::from_parts(parts, body)).await
}

/// Reads the context stored by [`layer`], defaulting to anonymous when the
/// layer is not installed.
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .unwrap_or_default())
    }
}
