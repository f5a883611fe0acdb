//! # atelier-history
//!
//! Append-only SQLite history of generation events: one table per app
//! variant (images, speech, vision), each holding prompt, derived output,
//! media reference, and write-time timestamp.
//!
//! Records are created exactly once at generation time and never updated or
//! deleted. Listing is always newest-first. Schema setup is an explicit
//! versioned migration run (`PRAGMA user_version`), idempotent and fatal on
//! failure.
//!
//! ## Crate Position
//!
//! Depends on: atelier-core.
//! Depended on by: atelier-server.

#![deny(unsafe_code)]

pub mod connection;
pub mod errors;
pub mod migrations;
pub mod repositories;
pub mod row_types;
pub mod store;

pub use connection::{ConnectionConfig, ConnectionPool, PooledConnection};
pub use errors::{HistoryError, Result};
pub use repositories::image::NewImageRecord;
pub use repositories::speech::NewSpeechRecord;
pub use repositories::vision::NewVisionRecord;
pub use row_types::{ImageRow, SpeechRow, VisionRow};
pub use store::HistoryStore;
