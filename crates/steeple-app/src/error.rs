use salvo::http::StatusCode;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Writer, async_trait};
use serde::Serialize;
use thiserror::Error;

use steeple_service::error::{ErrorKind, core_kind, db_kind};

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] steeple_service::error::ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] steeple_db::error::DbError),

    #[error(transparent)]
    CoreError(#[from] steeple_core::error::CoreError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::ServiceError(e) => e.kind(),
            Self::DatabaseError(e) => db_kind(e),
            Self::CoreError(e) => core_kind(e),
            Self::BadRequest(_) => ErrorKind::Invalid,
        }
    }

    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Invalid => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// ## Summary
    /// Writes the status and `{ "error": ... }` body for this error.
    ///
    /// Internal failures are logged in full but answered with a generic message.
    pub fn render(&self, res: &mut Response) {
        let status = self.status_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = ?self, "Request failed");
            "Internal server error".to_string()
        } else {
            tracing::debug!(error = %self, %status, "Request rejected");
            self.to_string()
        };

        res.status_code(status);
        res.render(Json(ErrorResponse { error: message }));
    }
}

#[async_trait]
impl Writer for AppError {
    async fn write(self, _req: &mut Request, _depot: &mut Depot, res: &mut Response) {
        self.render(res);
    }
}

impl From<salvo::http::ParseError> for AppError {
    fn from(err: salvo::http::ParseError) -> Self {
        Self::BadRequest(format!("Invalid request body: {err}"))
    }
}
