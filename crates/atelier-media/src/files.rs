//! On-disk layout for audio outputs and vision uploads.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::Result;
use crate::raster::{decode_image, encode_jpeg};

/// Audio files are named `{voice}_{timestamp}.mp3` with second granularity.
/// Two syntheses with the same voice in the same second collide and the
/// later write wins.
pub fn audio_output_path(dir: &Path, voice: &str, now: NaiveDateTime) -> PathBuf {
    dir.join(format!("{voice}_{}.mp3", now.format("%Y%m%d%H%M%S")))
}

/// Create the parent directory if needed and write the audio bytes.
#[instrument(skip(bytes), fields(path = %path.display(), bytes = bytes.len()))]
pub fn write_audio(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)?;
    Ok(())
}

/// Persist an uploaded image as a flattened JPEG under `upload_{uuid}.jpeg`.
///
/// This copy is for history playback; the base64 sent to the vision endpoint
/// is encoded separately from the same decoded pixels.
#[instrument(skip(bytes), fields(dir = %dir.display(), bytes = bytes.len()))]
pub fn save_upload(dir: &Path, bytes: &[u8]) -> Result<PathBuf> {
    let decoded = decode_image(bytes)?;
    let jpeg = encode_jpeg(&decoded)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("upload_{}.jpeg", Uuid::now_v7()));
    fs::write(&path, jpeg)?;
    Ok(path)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
