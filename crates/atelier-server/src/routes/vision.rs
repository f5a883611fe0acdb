//! Vision query routes.
//!
//! The uploaded image is decoded once, flattened, then used twice: JPEG
//! base64 goes to the remote endpoint, and a JPEG copy is saved under the
//! uploads dir for history playback.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{info, instrument};

use atelier_history::NewVisionRecord;
use atelier_media::{decode_image, encode_jpeg_base64, save_upload};

use crate::dto::{VisionQueryRequest, VisionRecord};
use crate::errors::ApiError;
use crate::routes::{require_text, vision_client};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/vision/queries", get(list).post(create))
        .route("/vision/queries/{id}/content", get(content))
}

#[instrument(skip(state, request))]
async fn create(
    State(state): State<AppState>,
    Json(request): Json<VisionQueryRequest>,
) -> Result<(StatusCode, Json<VisionRecord>), ApiError> {
    let question = require_text(&request.question, "question")?;
    if request.image_base64.trim().is_empty() {
        return Err(ApiError::Validation("imageBase64 must not be empty".into()));
    }
    let client = vision_client(&state)?;

    let upload_bytes = BASE64
        .decode(request.image_base64.trim())
        .map_err(|err| ApiError::Validation(format!("imageBase64 is not valid base64: {err}")))?;
    let decoded = decode_image(&upload_bytes)
        .map_err(|err| ApiError::Validation(format!("uploaded image cannot be decoded: {err}")))?;
    let outbound = encode_jpeg_base64(&decoded)?;

    let answer = client.ask(question, &outbound).await?;

    let upload_path = save_upload(&state.uploads_dir, &upload_bytes)?;
    let row = state.store.record_vision(&NewVisionRecord {
        prompt: question,
        response: &answer,
        image_path: &upload_path.to_string_lossy(),
    })?;
    info!(id = %row.id, upload = %upload_path.display(), "vision query recorded");

    Ok((
        StatusCode::CREATED,
        Json(VisionRecord::from_row(&row, state.display_tz)),
    ))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<VisionRecord>>, ApiError> {
    let rows = state.store.list_vision()?;
    let records = rows
        .iter()
        .map(|row| VisionRecord::from_row(row, state.display_tz))
        .collect();
    Ok(Json(records))
}

async fn content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let row = state.store.get_vision(&id)?.ok_or(ApiError::NotFound)?;
    let bytes = tokio::fs::read(&row.image_path)
        .await
        .map_err(|_| ApiError::NotFound)?;
    Ok(([(header::CONTENT_TYPE, "image/jpeg")], bytes).into_response())
}
