//! HTTP error responses for the chat route
//!
//! Every failure is a 500 with a `{"error": "..."}` body. Causes are logged,
//! never echoed to the caller.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::chat::ErrorBody;

pub const NOT_CONFIGURED_MESSAGE: &str = "OpenAI API key not configured";
pub const PROCESSING_FAILED_MESSAGE: &str = "Failed to process message";

/// Errors surfaced by `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The completion credential is missing
    NotConfigured,
    /// Unreadable request or any failure inside the turn
    ProcessingFailed,
}

impl ApiError {
    pub fn message(&self) -> &'static str {
        match self {
            ApiError::NotConfigured => NOT_CONFIGURED_MESSAGE,
            ApiError::ProcessingFailed => PROCESSING_FAILED_MESSAGE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message().to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
