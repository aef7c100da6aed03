//! Singleton key/value rows.

use rusqlite::{Connection, OptionalExtension};

use crate::{DbError, Result};

/// Device identifier, generated once and never changed.
pub const DEVICE_ID: &str = "device_id";

/// Last oplog sequence number handed out.
pub const OPLOG_SEQ: &str = "oplog_seq";

/// Get a value by key.
pub fn get(conn: &Connection, key: &str) -> Result<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM meta WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(value)
}

/// Set a value.
pub fn set(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO meta (key, value) VALUES (?1, ?2)",
        rusqlite::params![key, value],
    )?;
    Ok(())
}

/// Get a value as u64, defaulting to `default` if not found.
pub fn get_u64(conn: &Connection, key: &str, default: u64) -> Result<u64> {
    match get(conn, key)? {
        Some(v) => v
            .parse()
            .map_err(|e: std::num::ParseIntError| DbError::Serialization(e.to_string())),
        None => Ok(default),
    }
}

/// Increment the oplog counter and return the new value.
///
/// Read-modify-write: callers run this inside the transaction that appends
/// the entry so the sequence stays gap-free and monotonic.
pub fn next_oplog_seq(conn: &Connection) -> Result<u64> {
    let next = get_u64(conn, OPLOG_SEQ, 0)? + 1;
    set(conn, OPLOG_SEQ, &next.to_string())?;
    Ok(next)
}
