//! API error handling
//!
//! Maps application errors to HTTP statuses and JSON bodies. Internal error
//! detail is logged, never echoed to the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ct_core::error::ValidationErrors;
use ct_db::RepositoryError;
use serde::Serialize;
use std::collections::HashMap;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    NotFound { resource: &'static str, id: String },
    Validation(ValidationErrors),
    Unauthorized(String),
    Forbidden(String),
    Internal(String),
}

impl ApiError {
    pub fn not_found(resource: &'static str, id: impl std::fmt::Display) -> Self {
        ApiError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ApiError::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        ApiError::Forbidden(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::Internal(msg.into())
    }

    /// Map a store error for a specific resource
    pub fn from_repository(resource: &'static str, id: i64, err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => ApiError::not_found(resource, id),
            other => ApiError::internal(other.to_string()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convert `validator` derive output to our field-keyed errors
pub fn payload_errors(errors: validator::ValidationErrors) -> ValidationErrors {
    let mut result = ValidationErrors::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("is invalid ({})", error.code));
            result.add(field.to_string(), message);
        }
    }
    result
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<HashMap<String, Vec<String>>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            ApiError::NotFound { resource, id } => ErrorBody {
                error: "not_found",
                message: format!("{} with id {} not found", resource, id),
                fields: None,
            },
            ApiError::Validation(errors) => ErrorBody {
                error: "validation_failed",
                message: errors.full_messages().join(", "),
                fields: Some(errors.errors),
            },
            ApiError::Unauthorized(msg) => ErrorBody {
                error: "unauthorized",
                message: msg,
                fields: None,
            },
            ApiError::Forbidden(msg) => ErrorBody {
                error: "forbidden",
                message: msg,
                fields: None,
            },
            ApiError::Internal(detail) => {
                tracing::error!(detail = %detail, "request failed");
                ErrorBody {
                    error: "internal_error",
                    message: "An internal error occurred".into(),
                    fields: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
