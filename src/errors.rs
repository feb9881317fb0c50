//! # Error Handling
//!
//! Every handler returns `Result<_, ApiError>`. The enum maps each failure
//! class of the listing API onto an HTTP status and a sanitized JSON body:
//!
//! | Case | Variant | Status |
//! |------|---------|--------|
//! | entity missing, or owned by someone else | `NotFound` | 404 |
//! | identity header missing or malformed | `Unauthorized` | 401 |
//! | locked account, admin-only endpoint | `Forbidden` | 403 |
//! | lifecycle conflict, duplicate name | `Conflict` | 409 |
//! | payload or strict-query validation | `ValidationFailed` | 422 |
//! | store failure | `Database` | 500 |
//!
//! Ownership mismatches are deliberately reported as `NotFound` so a caller
//! cannot discover listings it does not own.
//!
//! Database errors are logged through `tracing` with full detail and never
//! reach the client; the client only sees a generic message.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use std::fmt;

use crate::validation::ValidationErrors;

#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found
    NotFound {
        /// Resource type (e.g., "Property", "Amenity")
        resource: String,
        id: Option<String>,
    },

    /// 401 Unauthorized
    Unauthorized { message: String },

    /// 403 Forbidden
    Forbidden { message: String },

    /// 409 Conflict
    Conflict { message: String },

    /// 422 Unprocessable Entity
    ValidationFailed { errors: ValidationErrors },

    /// 500 Internal Server Error - Database error (details logged, not exposed)
    Database {
        message: String,
        /// Internal error (logged, not sent to user)
        internal: DbErr,
    },
}

impl ApiError {
    pub fn not_found(resource: impl Into<String>, id: Option<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            id,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn validation_failed(errors: ValidationErrors) -> Self {
        Self::ValidationFailed { errors }
    }

    /// Wrap a store failure. The details are logged when the response is
    /// rendered but never sent to the user.
    #[must_use]
    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: "A database error occurred".to_string(),
            internal: err,
        }
    }

    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { resource, id } => match id {
                Some(id) => format!("{resource} with ID '{id}' not found"),
                None => format!("{resource} not found"),
            },
            Self::ValidationFailed { errors } => match errors.errors() {
                [single] => single.to_string(),
                _ => "Validation failed".to_string(),
            },
            Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::Conflict { message }
            | Self::Database { message, .. } => message.clone(),
        }
    }

    fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "API error"
                );
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let body = match &self {
            Self::ValidationFailed { errors } => ErrorResponse {
                error: "Validation failed".to_string(),
                details: Some(errors.errors().iter().map(ToString::to_string).collect()),
            },
            _ => ErrorResponse {
                error: self.user_message(),
                details: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        if let DbErr::RecordNotFound(msg) = &err {
            let resource = msg.split_whitespace().next().unwrap_or("Resource");
            return Self::not_found(resource, None);
        }
        if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
            return Self::conflict("Duplicate entry");
        }
        Self::database(err)
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation_failed(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_with_id() {
        let err = ApiError::not_found("Property", Some("123".to_string()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.user_message(), "Property with ID '123' not found");
    }

    #[test]
    fn test_database_error_is_sanitized() {
        let err = ApiError::database(DbErr::Custom("connection refused at 10.0.0.3".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.user_message().contains("10.0.0.3"));
    }

    #[test]
    fn test_record_not_found_maps_to_404() {
        let err = ApiError::from(DbErr::RecordNotFound("Property not found".into()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.user_message(), "Property not found");
    }

    #[test]
    fn test_other_db_errors_map_to_500() {
        let err = ApiError::from(DbErr::Custom("boom".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_single_validation_error_message() {
        let mut errors = ValidationErrors::new();
        errors.push("limit", "must be a positive integer");
        let err = ApiError::from(errors);
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.user_message(), "limit: must be a positive integer");
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        let cases = [
            (ApiError::unauthorized("Missing identity"), StatusCode::UNAUTHORIZED),
            (ApiError::forbidden("Account is locked"), StatusCode::FORBIDDEN),
            (ApiError::conflict("Duplicate entry"), StatusCode::CONFLICT),
        ];
        for (err, status) in cases {
            assert_eq!(err.status_code(), status);
            assert!(!err.user_message().is_empty());
        }
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::conflict("Property is already published").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
