//! Application error type mapping to HTTP responses.
//!
//! A well-formed chat request never sees a 5xx: internal failures answer
//! with HTTP 200 and the generic technical-difficulties reply.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use oncochat_core::chat::replies::TECHNICAL_DIFFICULTIES;
use oncochat_types::error::ChatError;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Client sent an unusable request (400).
    Validation(String),
    /// Anything else; logged and answered with a generic reply.
    Internal(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        match &e {
            ChatError::MissingMessage => AppError::Validation(e.to_string()),
            _ => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            AppError::Internal(message) => {
                tracing::error!(error = %message, "Request failed");
                technical_difficulties()
            }
        }
    }
}

/// HTTP 200 with the generic technical-difficulties reply.
pub fn technical_difficulties() -> Response {
    (
        StatusCode::OK,
        Json(json!({ "reply": TECHNICAL_DIFFICULTIES })),
    )
        .into_response()
}

/// Response for a handler panic caught by `CatchPanicLayer`.
pub fn panic_response(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = detail, "Handler panicked");
    technical_difficulties()
}
