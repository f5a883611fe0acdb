//! SQLite connection pool setup.
//!
//! One pool per process owns the database file; connections are acquired and
//! released per operation. Every connection gets the same pragma batch on
//! checkout init (WAL, foreign keys, busy timeout).

use std::path::Path;

use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use uuid::Uuid;

use crate::errors::Result;

/// Pool of SQLite connections.
pub type ConnectionPool = r2d2::Pool<SqliteConnectionManager>;

/// A connection checked out from the pool.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Pragmas applied to every new connection.
const INIT_PRAGMAS: &str = "
    PRAGMA journal_mode = WAL;
    PRAGMA foreign_keys = ON;
    PRAGMA busy_timeout = 5000;
";

/// Pool configuration.
#[derive(Clone, Debug)]
pub struct ConnectionConfig {
    /// Maximum number of pooled connections.
    pub max_size: u32,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self { max_size: 8 }
    }
}

/// Open a pool over a database file, creating the file if absent.
pub fn new_pool(path: &Path, config: &ConnectionConfig) -> Result<ConnectionPool> {
    let manager = SqliteConnectionManager::file(path)
        .with_init(|conn| conn.execute_batch(INIT_PRAGMAS));
    let pool = r2d2::Pool::builder()
        .max_size(config.max_size)
        .build(manager)?;
    Ok(pool)
}

/// Open a pool over a private in-memory database (tests).
///
/// Uses a shared-cache URI so all pooled connections see the same database;
/// plain `:memory:` would give each connection its own empty copy.
pub fn new_in_memory(config: &ConnectionConfig) -> Result<ConnectionPool> {
    let uri = format!("file:atelier_mem_{}?mode=memory&cache=shared", Uuid::now_v7());
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let manager = SqliteConnectionManager::file(uri)
        .with_flags(flags)
        .with_init(|conn| conn.execute_batch(INIT_PRAGMAS));
    let pool = r2d2::Pool::builder()
        .max_size(config.max_size)
        .build(manager)?;
    Ok(pool)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[allow(unused_results)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_pool_shares_one_database() {
        let pool = new_in_memory(&ConnectionConfig::default()).unwrap();
        {
            let conn = pool.get().unwrap();
            conn.execute("CREATE TABLE t (x INTEGER)", []).unwrap();
            conn.execute("INSERT INTO t (x) VALUES (1)", []).unwrap();
        }
        // A second checkout must see the same table
        let conn = pool.get().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM t", [], |r| r.get(0)).unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn two_in_memory_pools_are_isolated() {
        let a = new_in_memory(&ConnectionConfig::default()).unwrap();
        let b = new_in_memory(&ConnectionConfig::default()).unwrap();
        a.get().unwrap().execute("CREATE TABLE only_a (x INTEGER)", []).unwrap();

        let result: std::result::Result<i64, _> =
            b.get().unwrap().query_row("SELECT COUNT(*) FROM only_a", [], |r| r.get(0));
        assert!(result.is_err(), "pool b must not see pool a's tables");
    }

    #[test]
    fn file_pool_creates_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.db");
        let pool = new_pool(&path, &ConnectionConfig::default()).unwrap();
        drop(pool.get().unwrap());
        assert!(path.exists());
    }

    #[test]
    fn pragmas_applied() {
        let dir = tempfile::tempdir().unwrap();
        let pool = new_pool(&dir.path().join("p.db"), &ConnectionConfig::default()).unwrap();
        let conn = pool.get().unwrap();
        let fk: i64 = conn.query_row("PRAGMA foreign_keys", [], |r| r.get(0)).unwrap();
        assert_eq!(fk, 1);
        let mode: String = conn.query_row("PRAGMA journal_mode", [], |r| r.get(0)).unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }
}
