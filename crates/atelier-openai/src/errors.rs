//! Client error taxonomy.

/// Convenience alias for client results.
pub type Result<T> = std::result::Result<T, OpenAiError>;

/// Errors from the generation clients.
#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    /// No API key configured.
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    /// The endpoint returned a non-success status.
    #[error("upstream returned {status}: {body}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Response body text (may be truncated by the caller for display).
        body: String,
    },

    /// The endpoint returned success but the payload was missing expected fields.
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),

    /// Connection-level failure before a status was received.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
