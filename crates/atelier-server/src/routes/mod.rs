pub mod health;
pub mod images;
pub mod speech;
pub mod vision;

use crate::errors::ApiError;
use crate::state::AppState;
use atelier_openai::{ImagesClient, SpeechClient, VisionClient};

/// Non-empty after trimming, or a 422 naming the field.
fn require_text<'a>(value: &'a str, field: &str) -> Result<&'a str, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed)
}

/// Reject the accepted-but-unimplemented `stream` flag up front.
fn reject_streaming(stream: bool) -> Result<(), ApiError> {
    if stream {
        return Err(ApiError::StreamingNotImplemented);
    }
    Ok(())
}

fn images_client(state: &AppState) -> Result<&ImagesClient, ApiError> {
    state
        .clients
        .as_ref()
        .map(|clients| &clients.images)
        .ok_or(ApiError::MissingApiKey)
}

fn speech_client(state: &AppState) -> Result<&SpeechClient, ApiError> {
    state
        .clients
        .as_ref()
        .map(|clients| &clients.speech)
        .ok_or(ApiError::MissingApiKey)
}

fn vision_client(state: &AppState) -> Result<&VisionClient, ApiError> {
    state
        .clients
        .as_ref()
        .map(|clients| &clients.vision)
        .ok_or(ApiError::MissingApiKey)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
