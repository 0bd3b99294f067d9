//! Bearer token verification (HS256 JWT).

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Claims carried by a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user) identifier.
    pub uid: i64,

    /// Expiry as a unix timestamp in seconds.
    pub exp: i64,
}

/// Token verification failure.
///
/// The reason is kept for logging; it is never shown to API callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("invalid token: {0}")]
    InvalidToken(String),
}

/// Verifies bearer tokens against the shared application secret.
///
/// Only HS256 is accepted. Tokens signed with another algorithm (including
/// `none`) or another secret are rejected, as are expired tokens and tokens
/// whose `uid` claim is missing or not an integer.
#[derive(Clone)]
pub struct TokenVerifier {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Creates a verifier keyed by `secret`.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verifies `token` and returns its claims.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidToken`] if the token is malformed, the
    /// signature or algorithm does not match, the token is expired, or the
    /// claim set is incomplete.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| TokenError::InvalidToken(e.to_string()))
    }

    /// Signs a token for `uid` valid for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidToken`] if the expiry is out of range or
    /// the claims cannot be encoded.
    pub fn issue(&self, uid: i64, ttl: Duration) -> Result<String, TokenError> {
        let exp = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::InvalidToken("expiry out of range".to_string()))?;
        let claims = Claims {
            uid,
            exp: exp.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::InvalidToken(e.to_string()))
    }
}

/// Verifies `token` against `secret` without keeping a verifier around.
///
/// # Errors
///
/// See [`TokenVerifier::verify`].
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    TokenVerifier::new(secret).verify(token)
}
