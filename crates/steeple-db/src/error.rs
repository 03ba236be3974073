use thiserror::Error;

use steeple_core::collection::Collection;

/// Database and storage layer errors
#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] diesel::result::Error),

    #[error("Pool error: {0}")]
    PoolError(#[from] diesel_async::pooled_connection::bb8::RunError),

    #[error("Migration error: {0}")]
    MigrationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Document not found: {collection}/{id}")]
    NotFound {
        collection: Collection,
        id: uuid::Uuid,
    },

    #[error("Document already exists: {collection}/{id}")]
    AlreadyExists {
        collection: Collection,
        id: uuid::Uuid,
    },

    #[error(transparent)]
    CoreError(#[from] steeple_core::error::CoreError),
}

impl DbError {
    /// Whether the error means the backend could not be reached at all.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::PoolError(_))
    }
}

pub type DbResult<T> = std::result::Result<T, DbError>;
