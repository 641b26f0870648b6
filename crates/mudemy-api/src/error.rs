//! API error type and its JSON envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mudemy_auth::{JwtError, PasswordError};
use mudemy_core::{CodeError, PrerequisiteRef, UnknownVariant, ValidationError};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use tracing::{debug, error};

use crate::models::ErrorResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    InvalidId(#[from] CodeError),

    #[error("Prerequisites not met: {}", titles(.0))]
    PrerequisitesNotMet(Vec<PrerequisiteRef>),

    #[error("{0}")]
    MissingAuth(String),

    #[error("{0}")]
    InvalidToken(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(DbErr),

    #[error("{0}")]
    Internal(String),
}

fn titles(missing: &[PrerequisiteRef]) -> String {
    missing
        .iter()
        .map(|p| format!("{} ({})", p.title, p.course_id))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidId(_) | Self::PrerequisitesNotMet(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::MissingAuth(_) | Self::InvalidToken(_) | Self::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine readable code sent alongside the message
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidId(_) => "INVALID_ID",
            Self::PrerequisitesNotMet(_) => "PREREQUISITES_NOT_MET",
            Self::MissingAuth(_) => "MISSING_AUTH",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn not_found(what: &str, id: &str) -> Self {
        Self::NotFound(format!("{what} '{id}' not found"))
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => {
                debug!("Unique constraint violation: {}", detail);
                Self::Conflict("Resource already exists".to_string())
            }
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                debug!("Foreign key violation: {}", detail);
                Self::NotFound("Referenced resource does not exist".to_string())
            }
            _ => Self::Database(err),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<UnknownVariant> for ApiError {
    fn from(err: UnknownVariant) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("{}", self);
        } else {
            debug!("Request rejected ({}): {}", status, self);
        }

        // database internals are logged, not returned
        let message = match &self {
            Self::Database(_) => "Database error".to_string(),
            other => other.to_string(),
        };

        let body = ErrorResponse {
            error: message,
            code: Some(self.code().to_string()),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_bad_requests() {
        let err: ApiError = ValidationError::TitleLength.into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn prerequisite_error_lists_titles() {
        let err = ApiError::PrerequisitesNotMet(vec![PrerequisiteRef {
            course_id: "CRS00002".into(),
            title: "Linear Algebra".into(),
        }]);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Prerequisites not met: Linear Algebra (CRS00002)");
    }

    #[test]
    fn generic_db_errors_are_internal() {
        let err: ApiError = DbErr::Custom("boom".into()).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "DATABASE_ERROR");
    }
}
