//! Downloads generated images and canonicalizes them to PNG bytes.

use tracing::instrument;

use crate::errors::{MediaError, Result};
use crate::raster::{decode_image, encode_png};

/// Fetch a generated image URL and return its bytes re-encoded as PNG.
///
/// History rows store these bytes rather than the URL; remote URLs expire
/// within hours and a stored link would rot.
#[instrument(skip(http, url))]
pub async fn materialize_image(http: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = http.get(url).send().await?;
    if !response.status().is_success() {
        return Err(MediaError::DownloadStatus {
            status: response.status().as_u16(),
        });
    }
    let bytes = response.bytes().await?;
    let decoded = decode_image(&bytes)?;
    encode_png(&decoded)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
