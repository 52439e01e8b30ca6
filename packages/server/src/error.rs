use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;

/// Application-level error type.
///
/// Every variant is rendered as a `text/plain` body carrying the reason.
#[derive(Debug)]
pub enum AppError {
    /// Missing, blank, malformed or out-of-range input, or a catalog
    /// reference that does not resolve.
    Validation(String),
    NotFound(String),
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Validation(msg) | AppError::NotFound(msg) | AppError::Internal(msg) => msg,
        }
    }

    pub fn character_not_found() -> Self {
        AppError::NotFound("Character not found".into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(msg) => tracing::warn!("Rejected request: {}", msg),
            AppError::NotFound(msg) => tracing::debug!("Not found: {}", msg),
            AppError::Internal(detail) => tracing::error!("Internal error: {}", detail),
        }

        let status = self.status();
        let body = match self {
            AppError::Validation(msg) | AppError::NotFound(msg) | AppError::Internal(msg) => msg,
        };
        (status, body).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(format!("Database error: {err}"))
    }
}
