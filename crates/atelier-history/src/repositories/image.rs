//! Image generation repository.
//!
//! Append-only: inserts and reads, no update or delete. Listing is
//! newest-first with the id as tie-break so two inserts within the same
//! clock second still come back in insertion order (ids are UUIDv7).

use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use crate::errors::Result;
use crate::row_types::ImageRow;

/// Fields for a new image record.
pub struct NewImageRecord<'a> {
    /// User prompt (non-empty, enforced at the surface).
    pub prompt: &'a str,
    /// Model-revised prompt, when present.
    pub revised_prompt: Option<&'a str>,
    /// Materialized PNG bytes.
    pub image: &'a [u8],
    /// Upstream URL the bytes came from.
    pub source_url: Option<&'a str>,
    /// Requested size.
    pub size: &'a str,
    /// Requested quality.
    pub quality: &'a str,
}

/// Image repository — stateless, every method takes `&Connection`.
pub struct ImageRepo;

impl ImageRepo {
    /// Insert a record with a fresh id and write-time timestamp.
    pub fn insert(conn: &Connection, record: &NewImageRecord<'_>) -> Result<ImageRow> {
        let id = format!("img_{}", Uuid::now_v7());
        let created_at = atelier_core::time::now_stored();

        let _ = conn.execute(
            "INSERT INTO image_generations
                (id, prompt, revised_prompt, image, source_url, size, quality, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                id,
                record.prompt,
                record.revised_prompt,
                record.image,
                record.source_url,
                record.size,
                record.quality,
                created_at
            ],
        )?;

        Ok(ImageRow {
            id,
            prompt: record.prompt.to_string(),
            revised_prompt: record.revised_prompt.map(str::to_string),
            image: record.image.to_vec(),
            source_url: record.source_url.map(str::to_string),
            size: record.size.to_string(),
            quality: record.quality.to_string(),
            created_at,
        })
    }

    /// Fetch one record by id.
    pub fn get_by_id(conn: &Connection, id: &str) -> Result<Option<ImageRow>> {
        let row = conn
            .query_row(
                "SELECT id, prompt, revised_prompt, image, source_url, size, quality, created_at
                 FROM image_generations WHERE id = ?1",
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(row)
    }

    /// All records, newest first.
    pub fn list_all(conn: &Connection) -> Result<Vec<ImageRow>> {
        let mut stmt = conn.prepare(
            "SELECT id, prompt, revised_prompt, image, source_url, size, quality, created_at
             FROM image_generations ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt
            .query_map([], Self::map_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Total record count.
    pub fn count(conn: &Connection) -> Result<i64> {
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM image_generations", [], |row| row.get(0))?;
        Ok(count)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ImageRow> {
        Ok(ImageRow {
            id: row.get(0)?,
            prompt: row.get(1)?,
            revised_prompt: row.get(2)?,
            image: row.get(3)?,
            source_url: row.get(4)?,
            size: row.get(5)?,
            quality: row.get(6)?,
            created_at: row.get(7)?,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
