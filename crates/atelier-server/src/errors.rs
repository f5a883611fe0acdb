//! Request-scoped error mapping.
//!
//! Every failure becomes a JSON error body for that single request; nothing
//! here aborts the server.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use atelier_history::HistoryError;
use atelier_media::MediaError;
use atelier_openai::OpenAiError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request rejected before any network or storage work.
    #[error("{0}")]
    Validation(String),

    /// The `stream` flag is accepted on the wire but not implemented.
    #[error("streaming output is not implemented")]
    StreamingNotImplemented,

    /// No `OPENAI_API_KEY` was configured at startup for this surface.
    #[error("OPENAI_API_KEY is not configured; generation is disabled")]
    MissingApiKey,

    /// Unknown record id, or stored media missing from disk.
    #[error("record not found")]
    NotFound,

    #[error(transparent)]
    Generation(#[from] OpenAiError),

    #[error(transparent)]
    Media(#[from] MediaError),

    #[error(transparent)]
    History(#[from] HistoryError),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::StreamingNotImplemented => StatusCode::NOT_IMPLEMENTED,
            Self::MissingApiKey | Self::Generation(OpenAiError::MissingApiKey) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::NotFound | Self::History(HistoryError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::Generation(_) | Self::Media(_) => StatusCode::BAD_GATEWAY,
            Self::History(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::StreamingNotImplemented => "notImplemented",
            Self::MissingApiKey | Self::Generation(OpenAiError::MissingApiKey) => "missingApiKey",
            Self::NotFound | Self::History(HistoryError::NotFound(_)) => "notFound",
            Self::Generation(_) => "upstream",
            Self::Media(_) => "media",
            Self::History(_) => "storage",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.code(), error = %self, "request rejected");
        }
        let body = ErrorBody {
            code: self.code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
