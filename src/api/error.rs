//! HTTP error mapping.
//!
//! Every failure a handler can produce collapses into one of three transport
//! classes: bad input (400), missing bookmark (404) and storage failure (500).
//! Extractor rejections count as bad input.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::db::DbError;
use crate::normalize::ValidationError;

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    #[schema(example = "Bookmark '42' not found")]
    pub error: String,
    /// Machine-readable error class
    #[schema(example = "NOT_FOUND")]
    pub code: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Malformed request: {message}")]
    MalformedRequest { message: String },

    #[error("Bookmark '{id}' not found")]
    NotFound { id: String },

    #[error("Internal server error")]
    Storage(DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedRequest { .. } => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) | ApiError::MalformedRequest { .. } => "VALIDATION_ERROR",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Storage(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { id, .. } => ApiError::NotFound { id },
            // The row disappeared between lookup and write.
            DbError::NoRowsAffected { id, .. } => ApiError::NotFound { id },
            other => ApiError::Storage(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::MalformedRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::MalformedRequest {
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(e) => warn!(error = %e, "Rejected request"),
            ApiError::MalformedRequest { message } => warn!(error = %message, "Malformed request"),
            ApiError::Storage(e) => error!(error = %e, "Storage failure"),
            ApiError::NotFound { .. } => {}
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: self.code().to_string(),
        });

        (self.status(), body).into_response()
    }
}
