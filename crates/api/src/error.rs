use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use shelflife_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `shelflife-core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// The handler-determined parts of an error envelope.
///
/// [`AppError::into_response`] attaches this as a response extension; the
/// `stamp_error_body` middleware reads it back to build the final body,
/// which needs the request path that `IntoResponse` cannot see.
#[derive(Debug, Clone)]
pub struct ErrorPayload {
    pub message: String,
    pub fields: Option<BTreeMap<String, String>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, fields) = match self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    format!("{entity} with id {id} not found"),
                    None,
                ),
                CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
                CoreError::FieldValidation(map) => (
                    StatusCode::BAD_REQUEST,
                    "Validation failed".to_string(),
                    Some(map),
                ),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
                CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Unexpected error".to_string(),
                        None,
                    )
                }
            },

            AppError::Database(err) => classify_sqlx_error(&err),

            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unexpected error".to_string(),
                    None,
                )
            }
        };

        // Fallback body for anything that bypasses the stamping middleware
        // (unit tests, for instance). The middleware rebuilds it with the
        // request path included.
        let body = json!({
            "timestamp": chrono::Utc::now(),
            "status": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": message,
        });

        let mut response = (status, axum::Json(body)).into_response();
        response.extensions_mut().insert(ErrorPayload { message, fields });
        response
    }
}

/// Classify a sqlx error into an HTTP status and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map
///   to 409, with a constraint-specific message.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String, Option<BTreeMap<String, String>>) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "Resource not found".to_string(),
            None,
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (StatusCode::CONFLICT, conflict_message(constraint), None);
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unexpected error".to_string(),
                None,
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unexpected error".to_string(),
                None,
            )
        }
    }
}

/// Human-readable message for a known unique-constraint violation.
///
/// The service layer checks uniqueness before writing; this is the backstop
/// for races between that check and the insert.
fn conflict_message(constraint: &str) -> String {
    match constraint {
        "uq_users_username" => "Username already taken".to_string(),
        "uq_users_email" => "Email already registered".to_string(),
        "uq_reviews_user_work" => "A review for this work already exists".to_string(),
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err = AppError::Core(CoreError::NotFound {
            entity: "Work",
            id: 3,
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let payload = response.extensions().get::<ErrorPayload>().unwrap();
        assert_eq!(payload.message, "Work with id 3 not found");
        assert!(payload.fields.is_none());
    }

    #[test]
    fn test_field_validation_maps_to_400_with_fields() {
        let mut map = BTreeMap::new();
        map.insert("rating".to_string(), "Rating must be between 1 and 5".to_string());
        let err = AppError::Core(CoreError::FieldValidation(map));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let payload = response.extensions().get::<ErrorPayload>().unwrap();
        assert_eq!(payload.message, "Validation failed");
        assert!(payload.fields.as_ref().unwrap().contains_key("rating"));
    }

    #[test]
    fn test_row_not_found_maps_to_404() {
        let err = AppError::Database(sqlx::Error::RowNotFound);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_conflict_messages_are_domain_specific() {
        assert_eq!(conflict_message("uq_users_username"), "Username already taken");
        assert_eq!(conflict_message("uq_users_email"), "Email already registered");
        assert!(conflict_message("uq_other").contains("uq_other"));
    }
}
