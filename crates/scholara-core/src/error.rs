//! Error types for the Scholara system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScholaraError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Scholarship has expired: {id}")]
    Expired { id: String },

    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),
}

pub type ScholaraResult<T> = Result<T, ScholaraError>;
