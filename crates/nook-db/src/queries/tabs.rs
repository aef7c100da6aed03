//! Tab query functions.

use nook_types::Tab;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::{DbError, Result};

const COLUMNS: &str = "tab_id, name, created_at, updated_at, rev, ui_prefs";

fn from_row(row: &Row<'_>) -> rusqlite::Result<(Tab, String)> {
    Ok((
        Tab {
            tab_id: row.get(0)?,
            name: row.get(1)?,
            created_at: row.get::<_, i64>(2)? as u64,
            updated_at: row.get::<_, i64>(3)? as u64,
            rev: row.get::<_, i64>(4)? as u64,
            ui_prefs: serde_json::Map::new(),
        },
        row.get(5)?,
    ))
}

fn decode((mut tab, prefs): (Tab, String)) -> Result<Tab> {
    tab.ui_prefs = serde_json::from_str(&prefs)?;
    Ok(tab)
}

/// Insert a new tab.
pub fn insert(conn: &Connection, tab: &Tab) -> Result<()> {
    conn.execute(
        "INSERT INTO tabs (tab_id, name, created_at, updated_at, rev, ui_prefs)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![
            tab.tab_id,
            tab.name,
            tab.created_at as i64,
            tab.updated_at as i64,
            tab.rev as i64,
            serde_json::to_string(&tab.ui_prefs)?,
        ],
    )?;
    Ok(())
}

/// Get a tab by id.
pub fn get(conn: &Connection, tab_id: &str) -> Result<Option<Tab>> {
    let row = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM tabs WHERE tab_id = ?1"),
            [tab_id],
            from_row,
        )
        .optional()?;
    row.map(decode).transpose()
}

/// All tabs, oldest first.
pub fn list(conn: &Connection) -> Result<Vec<Tab>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM tabs ORDER BY created_at ASC, rowid ASC"
    ))?;
    let rows = stmt
        .query_map([], from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    rows.into_iter().map(decode).collect()
}

/// Oldest tab, if any.
pub fn oldest(conn: &Connection) -> Result<Option<Tab>> {
    let row = conn
        .query_row(
            &format!("SELECT {COLUMNS} FROM tabs ORDER BY created_at ASC, rowid ASC LIMIT 1"),
            [],
            from_row,
        )
        .optional()?;
    row.map(decode).transpose()
}

/// Number of tabs.
pub fn count(conn: &Connection) -> Result<u64> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM tabs", [], |row| row.get(0))?;
    Ok(n as u64)
}

/// Rename a tab. Returns false if it does not exist.
pub fn rename(conn: &Connection, tab_id: &str, name: &str, updated_at: u64) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE tabs SET name = ?1, updated_at = ?2 WHERE tab_id = ?3",
        rusqlite::params![name, updated_at as i64, tab_id],
    )?;
    Ok(changed > 0)
}

/// Replace a tab's UI preferences. Returns false if it does not exist.
pub fn set_ui_prefs(
    conn: &Connection,
    tab_id: &str,
    prefs: &serde_json::Map<String, serde_json::Value>,
    updated_at: u64,
) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE tabs SET ui_prefs = ?1, updated_at = ?2 WHERE tab_id = ?3",
        rusqlite::params![serde_json::to_string(prefs)?, updated_at as i64, tab_id],
    )?;
    Ok(changed > 0)
}

/// Increment a tab's revision and return the new value.
pub fn bump_rev(conn: &Connection, tab_id: &str) -> Result<u64> {
    let rev: Option<i64> = conn
        .query_row(
            "UPDATE tabs SET rev = rev + 1 WHERE tab_id = ?1 RETURNING rev",
            [tab_id],
            |row| row.get(0),
        )
        .optional()?;
    rev.map(|r| r as u64)
        .ok_or_else(|| DbError::NotFound(format!("tab '{tab_id}'")))
}

/// Delete a tab row. Notes must already be gone.
pub fn delete(conn: &Connection, tab_id: &str) -> Result<bool> {
    let changed = conn.execute("DELETE FROM tabs WHERE tab_id = ?1", [tab_id])?;
    Ok(changed > 0)
}
