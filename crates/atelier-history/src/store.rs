//! High-level `HistoryStore` facade.
//!
//! Owns the connection pool; every operation checks a connection out, runs a
//! single statement, and releases it on all exit paths (checkout guard drops
//! on return and on error alike). The store is append-only — there are no
//! update or delete operations.

use std::path::Path;

use tracing::{debug, instrument};

use crate::connection::{self, ConnectionConfig, ConnectionPool, PooledConnection};
use crate::errors::Result;
use crate::migrations::run_migrations;
use crate::repositories::image::{ImageRepo, NewImageRecord};
use crate::repositories::speech::{NewSpeechRecord, SpeechRepo};
use crate::repositories::vision::{NewVisionRecord, VisionRepo};
use crate::row_types::{ImageRow, SpeechRow, VisionRow};

/// Pool-owning history store over the three generation tables.
pub struct HistoryStore {
    pool: ConnectionPool,
}

impl HistoryStore {
    /// Open a store over a database file and bring the schema up to date.
    ///
    /// Migration failure here is fatal to startup by contract — callers
    /// propagate it rather than degrade.
    pub fn open(path: &Path, config: &ConnectionConfig) -> Result<Self> {
        let pool = connection::new_pool(path, config)?;
        let store = Self { pool };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Open an in-memory store (tests).
    pub fn open_in_memory() -> Result<Self> {
        let pool = connection::new_in_memory(&ConnectionConfig::default())?;
        let store = Self { pool };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Run pending schema migrations. Idempotent.
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        run_migrations(&conn)
    }

    /// Get a connection from the pool.
    fn conn(&self) -> Result<PooledConnection> {
        Ok(self.pool.get()?)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Images
    // ─────────────────────────────────────────────────────────────────────

    /// Record a completed image generation.
    #[instrument(skip(self, record), fields(prompt = atelier_core::text::truncate_str(record.prompt, 64)))]
    pub fn record_image(&self, record: &NewImageRecord<'_>) -> Result<ImageRow> {
        let conn = self.conn()?;
        let row = ImageRepo::insert(&conn, record)?;
        debug!(id = %row.id, "image generation recorded");
        Ok(row)
    }

    /// All image generations, newest first.
    pub fn list_images(&self) -> Result<Vec<ImageRow>> {
        let conn = self.conn()?;
        ImageRepo::list_all(&conn)
    }

    /// One image generation by id.
    pub fn get_image(&self, id: &str) -> Result<Option<ImageRow>> {
        let conn = self.conn()?;
        ImageRepo::get_by_id(&conn, id)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Speech
    // ─────────────────────────────────────────────────────────────────────

    /// Record a completed speech generation.
    #[instrument(skip(self, record), fields(voice = record.voice, model = record.model))]
    pub fn record_speech(&self, record: &NewSpeechRecord<'_>) -> Result<SpeechRow> {
        let conn = self.conn()?;
        let row = SpeechRepo::insert(&conn, record)?;
        debug!(id = %row.id, file = %row.file_path, "speech generation recorded");
        Ok(row)
    }

    /// All speech generations, newest first.
    pub fn list_speech(&self) -> Result<Vec<SpeechRow>> {
        let conn = self.conn()?;
        SpeechRepo::list_all(&conn)
    }

    /// One speech generation by id.
    pub fn get_speech(&self, id: &str) -> Result<Option<SpeechRow>> {
        let conn = self.conn()?;
        SpeechRepo::get_by_id(&conn, id)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Vision
    // ─────────────────────────────────────────────────────────────────────

    /// Record a completed vision query.
    #[instrument(skip(self, record), fields(prompt = atelier_core::text::truncate_str(record.prompt, 64)))]
    pub fn record_vision(&self, record: &NewVisionRecord<'_>) -> Result<VisionRow> {
        let conn = self.conn()?;
        let row = VisionRepo::insert(&conn, record)?;
        debug!(id = %row.id, "vision query recorded");
        Ok(row)
    }

    /// All vision queries, newest first.
    pub fn list_vision(&self) -> Result<Vec<VisionRow>> {
        let conn = self.conn()?;
        VisionRepo::list_all(&conn)
    }

    /// One vision query by id.
    pub fn get_vision(&self, id: &str) -> Result<Option<VisionRow>> {
        let conn = self.conn()?;
        VisionRepo::get_by_id(&conn, id)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
