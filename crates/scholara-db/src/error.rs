//! Database-specific error types and conversions.

use scholara_core::error::ScholaraError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Unique constraint violated on {entity}")]
    Conflict { entity: String },

    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl From<DbError> for ScholaraError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ScholaraError::NotFound { entity, id },
            DbError::Conflict { entity } => ScholaraError::AlreadyExists { entity },
            other => ScholaraError::Database(other.to_string()),
        }
    }
}
