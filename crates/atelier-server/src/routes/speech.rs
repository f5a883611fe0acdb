//! Text-to-speech routes.
//!
//! Synthesized audio lands on disk under `{voice}_{timestamp}.mp3`; the
//! history row stores the path. File write and row insert are separate
//! steps, so a crash between them orphans the file.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tracing::{info, instrument};

use atelier_history::NewSpeechRecord;
use atelier_media::{audio_output_path, write_audio};

use crate::dto::{SpeechGenerationRequest, SpeechRecord};
use crate::errors::ApiError;
use crate::routes::{reject_streaming, require_text, speech_client};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/speech/generations", get(list).post(create))
        .route("/speech/generations/{id}/content", get(content))
}

#[instrument(skip(state, request))]
async fn create(
    State(state): State<AppState>,
    Json(request): Json<SpeechGenerationRequest>,
) -> Result<(StatusCode, Json<SpeechRecord>), ApiError> {
    reject_streaming(request.stream)?;
    let input = require_text(&request.input, "input")?;
    let client = speech_client(&state)?;

    let audio = client.synthesize(input, request.voice, request.model).await?;

    let now = chrono::Utc::now().naive_utc();
    let path = audio_output_path(&state.audio_dir, request.voice.as_str(), now);
    write_audio(&path, &audio)?;

    let row = state.store.record_speech(&NewSpeechRecord {
        prompt: input,
        voice: request.voice.as_str(),
        model: request.model.as_str(),
        file_path: &path.to_string_lossy(),
    })?;
    info!(id = %row.id, path = %path.display(), bytes = audio.len(), "speech synthesis recorded");

    Ok((
        StatusCode::CREATED,
        Json(SpeechRecord::from_row(&row, state.display_tz)),
    ))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<SpeechRecord>>, ApiError> {
    let rows = state.store.list_speech()?;
    let records = rows
        .iter()
        .map(|row| SpeechRecord::from_row(row, state.display_tz))
        .collect();
    Ok(Json(records))
}

async fn content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let row = state.store.get_speech(&id)?.ok_or(ApiError::NotFound)?;
    let bytes = tokio::fs::read(&row.file_path)
        .await
        .map_err(|_| ApiError::NotFound)?;
    Ok(([(header::CONTENT_TYPE, "audio/mpeg")], bytes).into_response())
}
