//! Image generation routes.
//!
//! Create generates via the remote endpoint, materializes the short-lived
//! URL into PNG bytes, and appends a history row. The listing is the whole
//! gallery, newest first.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tracing::{info, instrument};

use atelier_history::NewImageRecord;
use atelier_media::materialize_image;

use crate::dto::{ImageGenerationRequest, ImageRecord};
use crate::errors::ApiError;
use crate::routes::{images_client, reject_streaming, require_text};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/images/generations", get(list).post(create))
        .route("/images/generations/{id}/content", get(content))
}

#[instrument(skip(state, request))]
async fn create(
    State(state): State<AppState>,
    Json(request): Json<ImageGenerationRequest>,
) -> Result<(StatusCode, Json<ImageRecord>), ApiError> {
    reject_streaming(request.stream)?;
    let prompt = require_text(&request.prompt, "prompt")?;
    let client = images_client(&state)?;

    let generation = client.generate(prompt, request.size, request.quality).await?;
    let png = materialize_image(&state.http, &generation.url).await?;

    let row = state.store.record_image(&NewImageRecord {
        prompt,
        revised_prompt: Some(&generation.revised_prompt),
        image: &png,
        source_url: Some(&generation.url),
        size: request.size.as_str(),
        quality: request.quality.as_str(),
    })?;
    info!(id = %row.id, bytes = png.len(), "image generation recorded");

    Ok((
        StatusCode::CREATED,
        Json(ImageRecord::from_row(&row, state.display_tz)),
    ))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<ImageRecord>>, ApiError> {
    let rows = state.store.list_images()?;
    let records = rows
        .iter()
        .map(|row| ImageRecord::from_row(row, state.display_tz))
        .collect();
    Ok(Json(records))
}

async fn content(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let row = state.store.get_image(&id)?.ok_or(ApiError::NotFound)?;
    if row.image.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(([(header::CONTENT_TYPE, "image/png")], row.image).into_response())
}
