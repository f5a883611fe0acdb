//! Versioned schema migrations.
//!
//! `PRAGMA user_version` records how many migrations have run. `ensure_schema`
//! replays only the missing tail, so it is idempotent: running it against an
//! up-to-date database executes no DDL at all. Any migration failure is
//! surfaced to the caller, which treats it as fatal at startup.

use rusqlite::Connection;
use tracing::info;

use crate::errors::Result;

/// Ordered migration scripts. `user_version` N means the first N have run.
const MIGRATIONS: &[&str] = &[
    // v1: one table per app variant, newest-first listing index on each.
    "
    CREATE TABLE image_generations (
        id          TEXT PRIMARY KEY,
        prompt      TEXT NOT NULL,
        revised_prompt TEXT,
        image       BLOB NOT NULL,
        size        TEXT NOT NULL,
        quality     TEXT NOT NULL,
        created_at  TEXT NOT NULL
    );
    CREATE INDEX idx_image_generations_created_at
        ON image_generations (created_at DESC, id DESC);

    CREATE TABLE speech_generations (
        id          TEXT PRIMARY KEY,
        prompt      TEXT NOT NULL,
        voice       TEXT NOT NULL,
        model       TEXT NOT NULL,
        file_path   TEXT NOT NULL,
        created_at  TEXT NOT NULL
    );
    CREATE INDEX idx_speech_generations_created_at
        ON speech_generations (created_at DESC, id DESC);

    CREATE TABLE vision_generations (
        id          TEXT PRIMARY KEY,
        prompt      TEXT NOT NULL,
        response    TEXT NOT NULL,
        image_path  TEXT NOT NULL,
        created_at  TEXT NOT NULL
    );
    CREATE INDEX idx_vision_generations_created_at
        ON vision_generations (created_at DESC, id DESC);
    ",
    // v2: keep the upstream URL as provenance next to the materialized bytes.
    "
    ALTER TABLE image_generations ADD COLUMN source_url TEXT;
    ",
];

/// Run all migrations not yet recorded in `user_version`.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current = schema_version(conn)?;
    let target = MIGRATIONS.len() as i64;

    if current >= target {
        return Ok(());
    }

    for (index, script) in MIGRATIONS.iter().enumerate().skip(current as usize) {
        let version = index as i64 + 1;
        conn.execute_batch(script)?;
        conn.pragma_update(None, "user_version", version)?;
        info!(version, "applied history schema migration");
    }

    Ok(())
}

/// Read the current schema version.
pub fn schema_version(conn: &Connection) -> Result<i64> {
    let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    Ok(version)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
