//! History store error types.

/// Convenience alias for history results.
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Errors from the history store.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    /// Underlying SQLite failure.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool exhausted or unavailable.
    #[error("connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Record lookup by id found nothing.
    #[error("record not found: {0}")]
    NotFound(String),
}
