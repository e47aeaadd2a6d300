//! Error taxonomy shared by the store, the services and the HTTP layer.
//!
//! Persistence writes report rejections through [`StoreError::Rejected`],
//! carrying a [`ValidationFailure`] whose [`FailureKind`] tells the HTTP layer
//! how to render it. Everything the store did not anticipate travels as
//! [`StoreError::Unexpected`] and ends up as a generic 500.
//!
//! [`AppError`] is what handlers return; its [`IntoResponse`] impl is the
//! single place where failures become status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

/// Client-facing message for every authentication failure.
pub const ACCESS_DENIED: &str = "Access denied.";

/// Client-facing message for failures that were not handled locally.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

/// Category of a rejected write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// A required field was absent or empty.
    FieldRequired,
    /// A field was present but malformed (e.g. not an email address).
    FieldInvalid,
    /// A field constrained to be unique collided with an existing row.
    UniqueViolation,
}

/// One violated rule on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// Field name as the client sees it (camelCase JSON name).
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A write rejected because of field rules or constraints.
///
/// Violations keep the order in which they were detected; for field
/// validation that is the declaration order of the request fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind:?} ({} violation(s))", .violations.len())]
pub struct ValidationFailure {
    pub kind: FailureKind,
    pub violations: Vec<FieldViolation>,
}

impl ValidationFailure {
    pub fn new(kind: FailureKind, violations: Vec<FieldViolation>) -> Self {
        Self { kind, violations }
    }

    /// Uniqueness failure on a single field.
    pub fn unique(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            FailureKind::UniqueViolation,
            vec![FieldViolation::new(field, message)],
        )
    }

    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.message.clone()).collect()
    }
}

/// Result of a failed call into the persistence collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("write rejected: {0}")]
    Rejected(ValidationFailure),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl From<ValidationFailure> for StoreError {
    fn from(failure: ValidationFailure) -> Self {
        StoreError::Rejected(failure)
    }
}

/// Body of every message-only error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

/// Body of a field-validation failure.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: Vec<String>,
}

/// Body of a uniqueness failure.
#[derive(Debug, Serialize, ToSchema)]
pub struct UniqueErrorResponse {
    pub message: String,
    pub field: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("authentication failed")]
    Unauthorized,
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Validation(#[from] ValidationFailure),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Internal(err.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Rejected(failure) => AppError::Validation(failure),
            StoreError::Unexpected(err) => AppError::Internal(err),
        }
    }
}

fn message(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            message: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::Unauthorized => message(status, ACCESS_DENIED),
            AppError::Forbidden(msg) | AppError::NotFound(msg) | AppError::BadRequest(msg) => {
                message(status, msg)
            }
            AppError::Validation(failure) => match (failure.kind, failure.violations.first()) {
                (FailureKind::UniqueViolation, Some(violation)) => (
                    status,
                    Json(UniqueErrorResponse {
                        message: violation.message.clone(),
                        field: violation.field.clone(),
                    }),
                )
                    .into_response(),
                _ => (
                    status,
                    Json(ValidationErrorResponse {
                        errors: failure.messages(),
                    }),
                )
                    .into_response(),
            },
            AppError::Internal(err) => {
                error!(error = ?err, "unhandled error");
                message(status, UNEXPECTED_ERROR)
            }
        }
    }
}
