//! Row structs mirroring the history tables.
//!
//! `created_at` is the naive UTC string format defined by
//! [`atelier_core::time::STORED_FORMAT`].

/// One logged image generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRow {
    /// `img_`-prefixed UUIDv7.
    pub id: String,
    /// User prompt.
    pub prompt: String,
    /// Model-revised prompt, when the API returned one.
    pub revised_prompt: Option<String>,
    /// Materialized PNG bytes.
    pub image: Vec<u8>,
    /// Upstream URL the bytes were fetched from (provenance only).
    pub source_url: Option<String>,
    /// Requested size, e.g. `1024x1024`.
    pub size: String,
    /// Requested quality, e.g. `standard`.
    pub quality: String,
    /// Write-time UTC timestamp.
    pub created_at: String,
}

/// One logged speech generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRow {
    /// `spch_`-prefixed UUIDv7.
    pub id: String,
    /// Input text.
    pub prompt: String,
    /// Voice used.
    pub voice: String,
    /// TTS model used.
    pub model: String,
    /// Path of the written audio file.
    pub file_path: String,
    /// Write-time UTC timestamp.
    pub created_at: String,
}

/// One logged vision query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisionRow {
    /// `vis_`-prefixed UUIDv7.
    pub id: String,
    /// Question asked about the image.
    pub prompt: String,
    /// Model response text.
    pub response: String,
    /// Path of the persisted upload.
    pub image_path: String,
    /// Write-time UTC timestamp.
    pub created_at: String,
}
