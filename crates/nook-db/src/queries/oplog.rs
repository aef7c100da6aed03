//! Operation log query functions.
//!
//! Entries are appended by the notes service and never rewritten, except
//! for `state`, which downstream consumers advance.

use nook_types::{OpType, OplogEntry, OplogState};
use rusqlite::Connection;

use crate::{DbError, Result};

/// Append an entry. `seq` must come from [`super::meta::next_oplog_seq`].
pub fn append(conn: &Connection, entry: &OplogEntry) -> Result<()> {
    conn.execute(
        "INSERT INTO oplog (seq, op_id, device_id, ts, op_type, payload, state)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            entry.seq as i64,
            entry.op_id,
            entry.device_id,
            entry.ts as i64,
            entry.op_type.as_str(),
            serde_json::to_string(&entry.payload)?,
            entry.state.as_str(),
        ],
    )?;
    Ok(())
}

/// Entries with `seq > after_seq`, oldest first, at most `limit`.
pub fn list_since(conn: &Connection, after_seq: u64, limit: u32) -> Result<Vec<OplogEntry>> {
    let mut stmt = conn.prepare(
        "SELECT seq, op_id, device_id, ts, op_type, payload, state
         FROM oplog WHERE seq > ?1 ORDER BY seq ASC LIMIT ?2",
    )?;
    let rows = stmt
        .query_map(rusqlite::params![after_seq as i64, limit], |row| {
            Ok((
                row.get::<_, i64>(0)? as u64,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i64>(3)? as u64,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    rows.into_iter()
        .map(|(seq, op_id, device_id, ts, op_type, payload, state)| {
            Ok(OplogEntry {
                seq,
                op_id,
                device_id,
                ts,
                op_type: OpType::parse(&op_type).ok_or_else(|| {
                    DbError::Serialization(format!("unknown op type '{op_type}'"))
                })?,
                payload: serde_json::from_str(&payload)?,
                state: OplogState::parse(&state).ok_or_else(|| {
                    DbError::Serialization(format!("unknown oplog state '{state}'"))
                })?,
            })
        })
        .collect()
}

/// Advance an entry's state. Returns false if no such entry.
pub fn set_state(conn: &Connection, seq: u64, state: OplogState) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE oplog SET state = ?1 WHERE seq = ?2",
        rusqlite::params![state.as_str(), seq as i64],
    )?;
    Ok(changed > 0)
}

/// Number of entries still waiting for the indexer.
pub fn count_pending(conn: &Connection) -> Result<u64> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM oplog WHERE state = ?1",
        [OplogState::PendingIndex.as_str()],
        |row| row.get(0),
    )?;
    Ok(n as u64)
}
