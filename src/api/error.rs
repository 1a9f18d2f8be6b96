//! Error responses for the JSON API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::time::Duration;

use crate::llm::LlmError;
use crate::upload::UploadError;

/// Errors returned by API handlers.
///
/// Extraction problems never show up here: they are folded into the reply.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request is missing something or is malformed.
    #[error("{0}")]
    BadRequest(String),

    /// The uploaded file or body is over the size limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// The completion service failed.
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// The request did not finish within the configured time.
    #[error("Request did not complete within {}s", .0.as_secs())]
    Timeout(Duration),

    /// Anything else. `expose` controls whether `message` reaches the client.
    #[error("{message}")]
    Internal { message: String, expose: bool },
}

impl ApiError {
    /// Classify an upload failure. I/O errors are internal.
    pub fn from_upload(err: UploadError, expose: bool) -> Self {
        match err {
            UploadError::TooLarge { .. } => Self::PayloadTooLarge(err.to_string()),
            UploadError::Multipart(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                Self::PayloadTooLarge(e.body_text())
            }
            UploadError::Multipart(e) => Self::BadRequest(e.body_text()),
            UploadError::Io(_) => Self::Internal {
                message: err.to_string(),
                expose,
            },
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            Self::Llm(_) | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "Request rejected");
        }

        let body = match &self {
            Self::BadRequest(message) => json!({ "error": message }),
            Self::PayloadTooLarge(message) => json!({
                "error": "File too large",
                "message": message,
            }),
            Self::Timeout(_) => json!({
                "error": "Request timed out",
                "message": self.to_string(),
            }),
            Self::Llm(e) => json!({
                "error": "API error",
                "message": e.to_string(),
            }),
            Self::Internal { message, expose } => json!({
                "error": "Something went wrong",
                "message": if *expose { message.as_str() } else { "Internal server error" },
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from_upload(UploadError::TooLarge { limit: 10 }, false).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        let io = std::io::Error::other("disk full");
        assert_eq!(
            ApiError::from_upload(UploadError::Io(io), false).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_message_hidden_unless_exposed() {
        let hidden = ApiError::Internal {
            message: "disk full".into(),
            expose: false,
        }
        .into_response();
        assert_eq!(hidden.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_timeout_is_408() {
        let err = ApiError::Timeout(Duration::from_secs(60));
        assert_eq!(err.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(err.to_string(), "Request did not complete within 60s");
    }
}
