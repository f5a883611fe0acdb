//! Speech generation repository.

use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use crate::errors::Result;
use crate::row_types::SpeechRow;

/// Fields for a new speech record.
pub struct NewSpeechRecord<'a> {
    /// Input text (non-empty, enforced at the surface).
    pub prompt: &'a str,
    /// Voice used.
    pub voice: &'a str,
    /// TTS model used.
    pub model: &'a str,
    /// Path of the written audio file.
    pub file_path: &'a str,
}

/// Speech repository — stateless, every method takes `&Connection`.
pub struct SpeechRepo;

impl SpeechRepo {
    /// Insert a record with a fresh id and write-time timestamp.
    pub fn insert(conn: &Connection, record: &NewSpeechRecord<'_>) -> Result<SpeechRow> {
        let id = format!("spch_{}", Uuid::now_v7());
        let created_at = atelier_core::time::now_stored();

        let _ = conn.execute(
            "INSERT INTO speech_generations (id, prompt, voice, model, file_path, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![id, record.prompt, record.voice, record.model, record.file_path, created_at],
        )?;

        Ok(SpeechRow {
            id,
            prompt: record.prompt.to_string(),
            voice: record.voice.to_string(),
            model: record.model.to_string(),
            file_path: record.file_path.to_string(),
            created_at,
        })
    }

    /// Fetch one record by id.
    pub fn get_by_id(conn: &Connection, id: &str) -> Result<Option<SpeechRow>> {
        let row = conn
            .query_row(
                "SELECT id, prompt, voice, model, file_path, created_at
                 FROM speech_generations WHERE id = ?1",
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(row)
    }

    /// All records, newest first.
    pub fn list_all(conn: &Connection) -> Result<Vec<SpeechRow>> {
        let mut stmt = conn.prepare(
            "SELECT id, prompt, voice, model, file_path, created_at
             FROM speech_generations ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt
            .query_map([], Self::map_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Total record count.
    pub fn count(conn: &Connection) -> Result<i64> {
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM speech_generations", [], |row| row.get(0))?;
        Ok(count)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<SpeechRow> {
        Ok(SpeechRow {
            id: row.get(0)?,
            prompt: row.get(1)?,
            voice: row.get(2)?,
            model: row.get(3)?,
            file_path: row.get(4)?,
            created_at: row.get(5)?,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
