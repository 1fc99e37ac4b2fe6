//! Stamps error responses with the standard envelope.
//!
//! All non-2xx bodies follow `{timestamp, status, error, message, path}`
//! (plus `errors` for per-field validation messages). The `path` component
//! is only known here, where the request is still in scope, so
//! [`AppError`](crate::error::AppError) leaves an [`ErrorPayload`] extension
//! on the response and this middleware renders the final body.

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::ErrorPayload;

/// Rebuild error bodies with the request path and a fresh timestamp.
/// Responses without an [`ErrorPayload`] extension pass through untouched.
pub async fn stamp_error_body(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let mut response = next.run(req).await;

    let Some(payload) = response.extensions_mut().remove::<ErrorPayload>() else {
        return response;
    };

    let status = response.status();
    let mut body = json!({
        "timestamp": chrono::Utc::now(),
        "status": status.as_u16(),
        "error": status.canonical_reason().unwrap_or("Error"),
        "message": payload.message,
        "path": path,
    });
    if let Some(fields) = payload.fields {
        body["errors"] = json!(fields);
    }

    (status, axum::Json(body)).into_response()
}
