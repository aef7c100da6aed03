//! Note (node) query functions.
//!
//! `source`, `tags` and `flags` are stored as JSON text.

use nook_types::Note;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::Result;

const COLUMNS: &str = "id, tab_id, parent_id, order_key, kind, title, preview, \
                       source, tags, flags, created_at, updated_at, rev";

/// Raw row before the JSON columns are parsed.
struct NodeRow {
    note: Note,
    source: String,
    tags: String,
    flags: String,
}

fn from_row(row: &Row<'_>) -> rusqlite::Result<NodeRow> {
    Ok(NodeRow {
        note: Note {
            id: row.get(0)?,
            tab_id: row.get(1)?,
            parent_id: row.get(2)?,
            order_key: row.get(3)?,
            kind: row.get(4)?,
            title: row.get(5)?,
            preview: row.get(6)?,
            source: Default::default(),
            tags: Default::default(),
            flags: Default::default(),
            created_at: row.get::<_, i64>(10)? as u64,
            updated_at: row.get::<_, i64>(11)? as u64,
            rev: row.get::<_, i64>(12)? as u64,
        },
        source: row.get(7)?,
        tags: row.get(8)?,
        flags: row.get(9)?,
    })
}

fn decode(raw: NodeRow) -> Result<Note> {
    let mut note = raw.note;
    note.source = serde_json::from_str(&raw.source)?;
    note.tags = serde_json::from_str(&raw.tags)?;
    note.flags = serde_json::from_str(&raw.flags)?;
    Ok(note)
}

fn query_notes(conn: &Connection, sql: &str, params: impl rusqlite::Params) -> Result<Vec<Note>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    rows.into_iter().map(decode).collect()
}

/// Insert a note.
pub fn insert(conn: &Connection, note: &Note) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO nodes ({COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
        ),
        rusqlite::params![
            note.id,
            note.tab_id,
            note.parent_id,
            note.order_key,
            note.kind,
            note.title,
            note.preview,
            serde_json::to_string(&note.source)?,
            serde_json::to_string(&note.tags)?,
            serde_json::to_string(&note.flags)?,
            note.created_at as i64,
            note.updated_at as i64,
            note.rev as i64,
        ],
    )?;
    Ok(())
}

/// Get a note by id.
pub fn get(conn: &Connection, id: &str) -> Result<Option<Note>> {
    let row = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM nodes WHERE id = ?1"),
            [id],
            from_row,
        )
        .optional()?;
    row.map(decode).transpose()
}

/// Overwrite every mutable column of an existing note.
///
/// `id`, `tab_id` and `created_at` are never rewritten.
pub fn update(conn: &Connection, note: &Note) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE nodes SET parent_id = ?1, order_key = ?2, kind = ?3, title = ?4,
                preview = ?5, source = ?6, tags = ?7, flags = ?8, updated_at = ?9, rev = ?10
         WHERE id = ?11",
        rusqlite::params![
            note.parent_id,
            note.order_key,
            note.kind,
            note.title,
            note.preview,
            serde_json::to_string(&note.source)?,
            serde_json::to_string(&note.tags)?,
            serde_json::to_string(&note.flags)?,
            note.updated_at as i64,
            note.rev as i64,
            note.id,
        ],
    )?;
    Ok(changed > 0)
}

/// Rewrite only the order key (used when rebalancing siblings).
pub fn set_order_key(conn: &Connection, id: &str, order_key: &str) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE nodes SET order_key = ?1 WHERE id = ?2",
        rusqlite::params![order_key, id],
    )?;
    Ok(changed > 0)
}

/// Delete a note row. Its chunks must already be gone.
pub fn delete(conn: &Connection, id: &str) -> Result<bool> {
    let changed = conn.execute("DELETE FROM nodes WHERE id = ?1", [id])?;
    Ok(changed > 0)
}

/// Children of a non-root parent, via the `(tab_id, parent_id, order_key)`
/// index. Already sorted by order key.
pub fn list_children_indexed(conn: &Connection, tab_id: &str, parent_id: &str) -> Result<Vec<Note>> {
    query_notes(
        conn,
        &format!(
            "SELECT {COLUMNS} FROM nodes
             WHERE tab_id = ?1 AND parent_id = ?2
             ORDER BY order_key ASC"
        ),
        rusqlite::params![tab_id, parent_id],
    )
}

/// Every note in a tab, via the `(tab_id, created_at)` index.
pub fn list_by_tab(conn: &Connection, tab_id: &str) -> Result<Vec<Note>> {
    query_notes(
        conn,
        &format!(
            "SELECT {COLUMNS} FROM nodes
             WHERE tab_id = ?1
             ORDER BY created_at ASC, rowid ASC"
        ),
        [tab_id],
    )
}

/// Children of `parent_id` (`None` = top level), sorted by order key.
///
/// `parent_id = ?` never matches NULL, so top-level listing scans the tab
/// and filters in memory. Both paths return the same shape and order.
pub fn list_children(conn: &Connection, tab_id: &str, parent_id: Option<&str>) -> Result<Vec<Note>> {
    match parent_id {
        Some(parent) => list_children_indexed(conn, tab_id, parent),
        None => {
            let mut roots: Vec<Note> = list_by_tab(conn, tab_id)?
                .into_iter()
                .filter(|n| n.parent_id.is_none())
                .collect();
            roots.sort_by(|a, b| a.order_key.cmp(&b.order_key));
            Ok(roots)
        }
    }
}

/// Ids of the direct children of `parent_id` within a tab.
pub fn child_ids(conn: &Connection, tab_id: &str, parent_id: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT id FROM nodes WHERE tab_id = ?1 AND parent_id = ?2 ORDER BY order_key ASC",
    )?;
    let ids = stmt
        .query_map(rusqlite::params![tab_id, parent_id], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;
    Ok(ids)
}

/// Ids of every note in a tab.
pub fn ids_by_tab(conn: &Connection, tab_id: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT id FROM nodes WHERE tab_id = ?1 ORDER BY created_at ASC, rowid ASC",
    )?;
    let ids = stmt
        .query_map([tab_id], |row| row.get(0))?
        .collect::<std::result::Result<Vec<String>, _>>()?;
    Ok(ids)
}

/// Notes of one kind in a tab, via the `(tab_id, kind)` index.
pub fn list_by_kind(conn: &Connection, tab_id: &str, kind: &str) -> Result<Vec<Note>> {
    query_notes(
        conn,
        &format!(
            "SELECT {COLUMNS} FROM nodes
             WHERE tab_id = ?1 AND kind = ?2
             ORDER BY created_at ASC, rowid ASC"
        ),
        rusqlite::params![tab_id, kind],
    )
}
