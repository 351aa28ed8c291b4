//! Authentication error types.

use scholara_core::error::ScholaraError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email and wrong password are deliberately the same error.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for ScholaraError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::TokenExpired
            | AuthError::TokenInvalid(_) => ScholaraError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => ScholaraError::Crypto(msg),
        }
    }
}
