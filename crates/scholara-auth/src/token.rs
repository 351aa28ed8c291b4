//! HS256 session tokens.
//!
//! Tokens are stateless: signing out is the client discarding its
//! token, and nothing is stored server-side.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// JWT claims embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: user profile ID (UUID string).
    pub sub: String,
    pub email_id: String,
    pub iss: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    pub jti: String,
}

/// Issue a signed HS256 session token for a user.
pub fn issue_session_token(
    user_id: Uuid,
    email_id: &str,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        sub: user_id.to_string(),
        email_id: email_id.to_string(),
        iss: config.jwt_issuer.clone(),
        iat: now,
        exp: now + config.token_lifetime_secs as i64,
        jti: Uuid::new_v4().to_string(),
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key)
        .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
}

/// Decode and verify a session token (signature, issuer, expiry).
pub fn decode_session_token(token: &str, config: &AuthConfig) -> Result<SessionClaims, AuthError> {
    let key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[&config.jwt_issuer]);
    validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

    jsonwebtoken::decode::<SessionClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::TokenInvalid(e.to_string()),
        })
}
