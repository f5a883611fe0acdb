use thiserror::Error;

/// Failures while materializing or persisting media.
#[derive(Debug, Error)]
pub enum MediaError {
    /// Fetching the remote media URL failed at the transport level.
    #[error("media download failed: {0}")]
    Download(#[from] reqwest::Error),

    /// The media URL responded with a non-success status.
    #[error("media url returned status {status}")]
    DownloadStatus { status: u16 },

    /// Decoding or encoding raster data failed.
    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),

    /// A filesystem read or write failed.
    #[error("media file io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = MediaError> = std::result::Result<T, E>;
