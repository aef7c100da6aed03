//! # nook-db
//!
//! Storage gateway for the Nook notes store.
//! Owns the single SQLite database at `$NOOK_DATA_DIR/nook.db`.
//!
//! ## Schema
//!
//! - WAL mode, foreign keys enforced
//! - All timestamps are Unix epoch milliseconds
//! - Schema version stored in `PRAGMA user_version`
//!
//! Callers never touch a connection directly; every read and write goes
//! through [`transaction::run_transaction`], which scopes access to the
//! declared tables and commits only when the handler succeeds.

pub mod migrations;
pub mod queries;
pub mod schema;
pub mod transaction;

use rusqlite::Connection;
use std::path::Path;

pub use transaction::{run_transaction, Table, TxMode, TxScope};

/// Current schema version.
pub const SCHEMA_VERSION: u32 = 1;

/// Default busy timeout applied to every connection.
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5000;

/// Database error types.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("migration failed: {0}")]
    Migration(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("table '{0}' is not part of this transaction")]
    TableNotInScope(&'static str),

    #[error("write to '{0}' in a read-only transaction")]
    ReadOnly(&'static str),
}

impl From<serde_json::Error> for DbError {
    fn from(e: serde_json::Error) -> Self {
        DbError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DbError>;

/// Open or create the notes database at the given path.
///
/// Configures WAL mode, foreign keys, and runs any pending migrations.
pub fn open(path: &Path, busy_timeout_ms: u32) -> Result<Connection> {
    let conn = Connection::open(path)?;
    configure(&conn, busy_timeout_ms)?;
    migrations::run(&conn)?;
    Ok(conn)
}

/// Open an in-memory database (for testing).
pub fn open_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure(&conn, DEFAULT_BUSY_TIMEOUT_MS)?;
    migrations::run(&conn)?;
    Ok(conn)
}

/// Configure SQLite pragmas.
fn configure(conn: &Connection, busy_timeout_ms: u32) -> Result<()> {
    conn.execute_batch(
        "PRAGMA journal_mode = WAL;
         PRAGMA foreign_keys = ON;
         PRAGMA synchronous = NORMAL;",
    )?;
    conn.busy_timeout(std::time::Duration::from_millis(u64::from(busy_timeout_ms)))?;
    Ok(())
}
