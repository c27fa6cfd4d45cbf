use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::SqlErr;
use thiserror::Error;

use crate::{lifecycle::Violation, response::ApiResponse};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("Payment amount does not match the trip total price")]
    AmountMismatch,

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    Conflict(String),

    /// A lifecycle rule refused the write; answered as a bad request.
    #[error("{0}")]
    StateConflict(String),

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("Database error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_)
            | AppError::InvalidState(_)
            | AppError::StateConflict(_)
            | AppError::AmountMismatch => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Maps a unique-index violation to `Conflict`, passing other database errors through.
    pub fn conflict_on_unique(err: sea_orm::DbErr, message: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(message.to_string()),
            _ => AppError::OrmError(err),
        }
    }

    /// Like [`AppError::conflict_on_unique`], for duplicates that break a lifecycle rule.
    pub fn state_conflict_on_unique(err: sea_orm::DbErr, message: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                AppError::StateConflict(message.to_string())
            }
            _ => AppError::OrmError(err),
        }
    }
}

impl From<Violation> for AppError {
    fn from(violation: Violation) -> Self {
        let message = violation.to_string();
        match violation {
            Violation::NotFound(_) => AppError::NotFound(message),
            Violation::InvalidRange(_) => AppError::BadRequest(message),
            Violation::InvalidState(_) => AppError::InvalidState(message),
            Violation::Conflict(_) => AppError::StateConflict(message),
            Violation::Forbidden(_) => AppError::Forbidden(message),
            Violation::AmountMismatch { .. } => AppError::AmountMismatch,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::DbError(err) => tracing::error!(error = %err, "database error"),
            AppError::OrmError(err) => tracing::error!(error = %err, "orm error"),
            AppError::Internal(err) => tracing::error!(error = ?err, "internal error"),
            _ => tracing::debug!(status = %status, message = %self, "request rejected"),
        }

        let body = ApiResponse::<()>::failure(self.to_string());
        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violations_map_to_expected_status_codes() {
        let cases = [
            (Violation::NotFound("Trip"), StatusCode::NOT_FOUND),
            (Violation::InvalidRange("bad range"), StatusCode::BAD_REQUEST),
            (Violation::InvalidState("bad state"), StatusCode::BAD_REQUEST),
            (Violation::Conflict("already paid"), StatusCode::BAD_REQUEST),
            (Violation::Forbidden("not yours"), StatusCode::FORBIDDEN),
            (
                Violation::AmountMismatch {
                    expected: 150,
                    actual: 100,
                },
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (violation, status) in cases {
            assert_eq!(AppError::from(violation).status(), status);
        }
    }

    #[test]
    fn duplicate_accounts_stay_409() {
        let err = AppError::Conflict("Email already exists".into());
        assert_eq!(err.status(), StatusCode::CONFLICT);
        let err = AppError::from(Violation::Conflict("Trip already has a payment"));
        assert!(matches!(err, AppError::StateConflict(_)));
        assert_eq!(err.to_string(), "Trip already has a payment");
    }

    #[test]
    fn not_found_message_names_the_entity() {
        let err = AppError::from(Violation::NotFound("Destination"));
        assert_eq!(err.to_string(), "Destination not found");
    }

    #[test]
    fn internal_errors_hide_the_cause() {
        let err = AppError::Internal(anyhow::anyhow!("connection reset by peer"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal Server Error");
    }
}
