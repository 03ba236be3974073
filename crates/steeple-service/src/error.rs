use thiserror::Error;

use steeple_core::error::CoreError;
use steeple_db::error::DbError;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    DatabaseError(#[from] DbError),

    #[error(transparent)]
    CoreError(#[from] CoreError),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Permission denied: {0}")]
    PermissionError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid recurring event definition: {0}")]
    InvalidDefinition(String),

    #[error("Backend unavailable: {0}")]
    NetworkError(String),

    #[error("Export failed: {0}")]
    ExportFailed(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Coarse classification used by the HTTP layer to pick a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Invalid,
    Unauthenticated,
    Forbidden,
    NotFound,
    Conflict,
    Unavailable,
    Internal,
}

impl ServiceError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationError(_) | Self::InvalidDefinition(_) => ErrorKind::Invalid,
            Self::NotAuthenticated => ErrorKind::Unauthenticated,
            Self::PermissionError(_) => ErrorKind::Forbidden,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::NetworkError(_) => ErrorKind::Unavailable,
            Self::CoreError(e) => core_kind(e),
            Self::DatabaseError(e) => db_kind(e),
            Self::ExportFailed(_) | Self::InvalidConfiguration(_) => ErrorKind::Internal,
        }
    }
}

#[must_use]
pub const fn core_kind(error: &CoreError) -> ErrorKind {
    match error {
        CoreError::ValidationError(_) | CoreError::InvalidInput(_) => ErrorKind::Invalid,
        CoreError::ConfigError(_) | CoreError::InvariantViolation(_) => ErrorKind::Internal,
    }
}

#[must_use]
pub const fn db_kind(error: &DbError) -> ErrorKind {
    match error {
        DbError::NotFound { .. } => ErrorKind::NotFound,
        DbError::AlreadyExists { .. } => ErrorKind::Conflict,
        DbError::CoreError(e) => core_kind(e),
        e if e.is_unavailable() => ErrorKind::Unavailable,
        _ => ErrorKind::Internal,
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
