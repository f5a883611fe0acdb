//! Stored timestamp format and display-timezone conversion.
//!
//! History rows carry a naive `"%Y-%m-%d %H:%M:%S"` string captured from the
//! UTC clock at write time. The renderer re-interprets that string as UTC and
//! converts it to one fixed display timezone.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Format of `created_at` values as stored in the history tables.
pub const STORED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Display timezone used when none is configured.
pub const DEFAULT_DISPLAY_TZ: Tz = chrono_tz::Asia::Colombo;

/// Errors from timestamp parsing and conversion.
#[derive(Debug, thiserror::Error)]
pub enum TimeError {
    /// Stored string does not match [`STORED_FORMAT`].
    #[error("invalid stored timestamp '{value}': {reason}")]
    InvalidTimestamp {
        /// The offending stored string.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },
}

/// Current UTC time rendered in the stored format.
pub fn now_stored() -> String {
    Utc::now().format(STORED_FORMAT).to_string()
}

/// Parse a stored timestamp string as a UTC instant.
pub fn parse_stored(stored: &str) -> Result<DateTime<Utc>, TimeError> {
    let naive = NaiveDateTime::parse_from_str(stored, STORED_FORMAT).map_err(|e| {
        TimeError::InvalidTimestamp {
            value: stored.to_string(),
            reason: e.to_string(),
        }
    })?;
    Ok(Utc.from_utc_datetime(&naive))
}

/// Re-interpret a stored timestamp as UTC and render it in `tz`.
///
/// Output uses the same `"%Y-%m-%d %H:%M:%S"` layout as the stored value.
pub fn localize(stored: &str, tz: Tz) -> Result<String, TimeError> {
    let utc = parse_stored(stored)?;
    Ok(utc.with_timezone(&tz).format(STORED_FORMAT).to_string())
}

/// Resolve a timezone name, falling back to [`DEFAULT_DISPLAY_TZ`] when the
/// name is unknown.
pub fn resolve_timezone(name: &str) -> Tz {
    name.parse().unwrap_or(DEFAULT_DISPLAY_TZ)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
