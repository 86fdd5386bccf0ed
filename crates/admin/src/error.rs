//! Unified error handling for the catalog API.
//!
//! Every error renders as
//! `{"error": {"code": "...", "message": "...", "field": "..."}}`
//! with one status per error kind.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::ValidationError;

/// Application-level error type for the catalog API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Storage operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// No valid session token.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Authenticated, but the store belongs to someone else.
    #[error("Unauthorized")]
    Forbidden,

    /// A request body field is missing or malformed.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// Resource not found (e.g. `Billboard`).
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Request could not be parsed.
    #[error("{0}")]
    BadRequest(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    code: &'static str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Database(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Validation { .. } | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    /// Stable machine-readable code for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Database(RepositoryError::Conflict(_)) => "CONFLICT",
            Self::Database(_) => "INTERNAL_ERROR",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "UNAUTHORIZED",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::NotFound(_) => "NOT_FOUND",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Catalog request error"
            );
        } else {
            tracing::warn!(
                status = status.as_u16(),
                code = self.code(),
                error = %self,
                "Catalog request rejected"
            );
        }

        // Don't expose storage details to clients
        let message = match &self {
            _ if status.is_server_error() => "Internal error".to_string(),
            Self::Database(conflict) => conflict.to_string(),
            other => other.to_string(),
        };
        let field = match &self {
            Self::Validation { field, .. } => Some(*field),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code(),
                message: &message,
                field,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Set the Sentry user context from an identity provider user id.
pub fn set_sentry_user(user_id: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use http_body_util::BodyExt;

    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_app_error_display() {
        assert_eq!(AppError::NotFound("Billboard").to_string(), "Billboard not found");
        assert_eq!(AppError::Forbidden.to_string(), "Unauthorized");
        assert_eq!(AppError::Unauthenticated.to_string(), "Unauthenticated");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(get_status(AppError::NotFound("Size")), StatusCode::NOT_FOUND);
        assert_eq!(get_status(AppError::Unauthenticated), StatusCode::UNAUTHORIZED);
        assert_eq!(get_status(AppError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            get_status(AppError::BadRequest("bad json".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::Conflict(
                "in use".to_string()
            ))),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Database(RepositoryError::DataCorruption(
                "dangling row".to_string()
            ))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_validation_body_names_field() {
        let err = AppError::from(ValidationError::required("imageUrl", "Image URL"));
        let (status, json) = body_json(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(json["error"]["message"], "Image URL is required");
        assert_eq!(json["error"]["field"], "imageUrl");
    }

    #[tokio::test]
    async fn test_conflict_message_is_passed_through() {
        let err = AppError::Database(RepositoryError::Conflict(
            "Remove all categories using this billboard first".to_string(),
        ));
        let (status, json) = body_json(err).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            json["error"]["message"],
            "Remove all categories using this billboard first"
        );
    }

    #[tokio::test]
    async fn test_storage_errors_hide_details() {
        let err = AppError::Database(RepositoryError::DataCorruption(
            "secret table detail".to_string(),
        ));
        let (status, json) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
        assert_eq!(json["error"]["message"], "Internal error");
        assert!(json["error"].get("field").is_none());
    }
}
