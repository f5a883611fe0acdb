//! Vision query repository.

use rusqlite::{Connection, OptionalExtension, params};
use uuid::Uuid;

use crate::errors::Result;
use crate::row_types::VisionRow;

/// Fields for a new vision record.
pub struct NewVisionRecord<'a> {
    /// Question asked about the image (non-empty, enforced at the surface).
    pub prompt: &'a str,
    /// Model response text.
    pub response: &'a str,
    /// Path of the persisted upload.
    pub image_path: &'a str,
}

/// Vision repository — stateless, every method takes `&Connection`.
pub struct VisionRepo;

impl VisionRepo {
    /// Insert a record with a fresh id and write-time timestamp.
    pub fn insert(conn: &Connection, record: &NewVisionRecord<'_>) -> Result<VisionRow> {
        let id = format!("vis_{}", Uuid::now_v7());
        let created_at = atelier_core::time::now_stored();

        let _ = conn.execute(
            "INSERT INTO vision_generations (id, prompt, response, image_path, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![id, record.prompt, record.response, record.image_path, created_at],
        )?;

        Ok(VisionRow {
            id,
            prompt: record.prompt.to_string(),
            response: record.response.to_string(),
            image_path: record.image_path.to_string(),
            created_at,
        })
    }

    /// Fetch one record by id.
    pub fn get_by_id(conn: &Connection, id: &str) -> Result<Option<VisionRow>> {
        let row = conn
            .query_row(
                "SELECT id, prompt, response, image_path, created_at
                 FROM vision_generations WHERE id = ?1",
                params![id],
                Self::map_row,
            )
            .optional()?;
        Ok(row)
    }

    /// All records, newest first.
    pub fn list_all(conn: &Connection) -> Result<Vec<VisionRow>> {
        let mut stmt = conn.prepare(
            "SELECT id, prompt, response, image_path, created_at
             FROM vision_generations ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt
            .query_map([], Self::map_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Total record count.
    pub fn count(conn: &Connection) -> Result<i64> {
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM vision_generations", [], |row| row.get(0))?;
        Ok(count)
    }

    fn map_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<VisionRow> {
        Ok(VisionRow {
            id: row.get(0)?,
            prompt: row.get(1)?,
            response: row.get(2)?,
            image_path: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
