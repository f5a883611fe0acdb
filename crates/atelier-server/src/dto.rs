//! Wire types for the HTTP surface, camelCase on the wire.

use serde::{Deserialize, Serialize};

use atelier_core::time;
use atelier_history::{ImageRow, SpeechRow, VisionRow};
use atelier_openai::{ImageQuality, ImageSize, SpeechModel, Voice};
use chrono_tz::Tz;

// ─────────────────────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageGenerationRequest {
    pub prompt: String,
    #[serde(default)]
    pub size: ImageSize,
    #[serde(default)]
    pub quality: ImageQuality,
    #[serde(default)]
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechGenerationRequest {
    pub input: String,
    #[serde(default)]
    pub voice: Voice,
    #[serde(default)]
    pub model: SpeechModel,
    #[serde(default)]
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionQueryRequest {
    pub question: String,
    pub image_base64: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Responses
// ─────────────────────────────────────────────────────────────────────────────

/// One image history entry. The PNG itself is served by the content route.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub id: String,
    pub prompt: String,
    pub revised_prompt: Option<String>,
    pub size: String,
    pub quality: String,
    pub created_at: String,
    pub content_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechRecord {
    pub id: String,
    pub input: String,
    pub voice: String,
    pub model: String,
    pub file_name: String,
    pub created_at: String,
    pub content_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionRecord {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub created_at: String,
    pub content_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_error: Option<String>,
}

/// Localize a stored timestamp, degrading to the raw string on bad data.
///
/// Listings must render even when one row carries a corrupt timestamp; the
/// row reports the problem inline instead of failing the whole response.
fn localized(stored: &str, tz: Tz, media_error: &mut Option<String>) -> String {
    match time::localize(stored, tz) {
        Ok(local) => local,
        Err(err) => {
            *media_error = Some(err.to_string());
            stored.to_string()
        }
    }
}

impl ImageRecord {
    pub fn from_row(row: &ImageRow, tz: Tz) -> Self {
        let mut media_error = None;
        if row.image.is_empty() {
            media_error = Some("stored image has no bytes".to_string());
        }
        let created_at = localized(&row.created_at, tz, &mut media_error);
        Self {
            id: row.id.clone(),
            prompt: row.prompt.clone(),
            revised_prompt: row.revised_prompt.clone(),
            size: row.size.clone(),
            quality: row.quality.clone(),
            created_at,
            content_url: format!("/api/images/generations/{}/content", row.id),
            media_error,
        }
    }
}

impl SpeechRecord {
    pub fn from_row(row: &SpeechRow, tz: Tz) -> Self {
        let mut media_error = None;
        if !std::path::Path::new(&row.file_path).is_file() {
            media_error = Some(format!("audio file missing: {}", row.file_path));
        }
        let created_at = localized(&row.created_at, tz, &mut media_error);
        let file_name = std::path::Path::new(&row.file_path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| row.file_path.clone());
        Self {
            id: row.id.clone(),
            input: row.prompt.clone(),
            voice: row.voice.clone(),
            model: row.model.clone(),
            file_name,
            created_at,
            content_url: format!("/api/speech/generations/{}/content", row.id),
            media_error,
        }
    }
}

impl VisionRecord {
    pub fn from_row(row: &VisionRow, tz: Tz) -> Self {
        let mut media_error = None;
        if !std::path::Path::new(&row.image_path).is_file() {
            media_error = Some(format!("upload missing: {}", row.image_path));
        }
        let created_at = localized(&row.created_at, tz, &mut media_error);
        Self {
            id: row.id.clone(),
            question: row.prompt.clone(),
            answer: row.response.clone(),
            created_at,
            content_url: format!("/api/vision/queries/{}/content", row.id),
            media_error,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::time::DEFAULT_DISPLAY_TZ;

    fn image_row(created_at: &str, image: Vec<u8>) -> ImageRow {
        ImageRow {
            id: "img_test".into(),
            prompt: "a lighthouse".into(),
            revised_prompt: Some("a tall lighthouse at dusk".into()),
            image,
            source_url: None,
            size: "1024x1024".into(),
            quality: "standard".into(),
            created_at: created_at.into(),
        }
    }

    #[test]
    fn image_record_localizes_created_at() {
        let record = ImageRecord::from_row(
            &image_row("2024-01-01 12:00:00", vec![1]),
            DEFAULT_DISPLAY_TZ,
        );
        assert_eq!(record.created_at, "2024-01-01 17:30:00");
        assert!(record.media_error.is_none());
        assert_eq!(record.content_url, "/api/images/generations/img_test/content");
    }

    #[test]
    fn corrupt_timestamp_degrades_per_row() {
        let record = ImageRecord::from_row(&image_row("not a date", vec![1]), DEFAULT_DISPLAY_TZ);
        assert_eq!(record.created_at, "not a date");
        assert!(record.media_error.is_some());
    }

    #[test]
    fn empty_image_bytes_reported_inline() {
        let record =
            ImageRecord::from_row(&image_row("2024-01-01 12:00:00", vec![]), DEFAULT_DISPLAY_TZ);
        assert_eq!(record.media_error.as_deref(), Some("stored image has no bytes"));
    }

    #[test]
    fn speech_record_reports_missing_file() {
        let row = SpeechRow {
            id: "spch_test".into(),
            prompt: "hello".into(),
            voice: "nova".into(),
            model: "tts-1".into(),
            file_path: "/nonexistent/nova_20240101000000.mp3".into(),
            created_at: "2024-01-01 12:00:00".into(),
        };
        let record = SpeechRecord::from_row(&row, DEFAULT_DISPLAY_TZ);
        assert!(record.media_error.is_some());
        assert_eq!(record.file_name, "nova_20240101000000.mp3");
        assert_eq!(record.created_at, "2024-01-01 17:30:00");
    }

    #[test]
    fn request_defaults_fill_size_and_quality() {
        let req: ImageGenerationRequest =
            serde_json::from_str(r#"{"prompt": "a fox"}"#).unwrap();
        assert_eq!(req.size, ImageSize::Square1024);
        assert_eq!(req.quality, ImageQuality::Standard);
        assert!(!req.stream);
    }
}
