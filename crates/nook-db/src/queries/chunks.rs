//! Content chunk query functions.

use nook_types::Chunk;
use rusqlite::Connection;

use crate::Result;

/// Insert every chunk for a note.
pub fn insert_all(conn: &Connection, note_id: &str, chunks: &[Chunk]) -> Result<()> {
    let mut stmt = conn.prepare("INSERT INTO chunks (note_id, idx, data) VALUES (?1, ?2, ?3)")?;
    for chunk in chunks {
        stmt.execute(rusqlite::params![note_id, chunk.idx, chunk.data])?;
    }
    Ok(())
}

/// All chunks of a note, in index order.
pub fn list(conn: &Connection, note_id: &str) -> Result<Vec<Chunk>> {
    let mut stmt = conn.prepare("SELECT idx, data FROM chunks WHERE note_id = ?1 ORDER BY idx")?;
    let rows = stmt
        .query_map([note_id], |row| {
            Ok(Chunk {
                idx: row.get(0)?,
                data: row.get(1)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Delete every chunk of a note. Returns the number removed.
pub fn delete_for_note(conn: &Connection, note_id: &str) -> Result<usize> {
    let removed = conn.execute("DELETE FROM chunks WHERE note_id = ?1", [note_id])?;
    Ok(removed)
}

/// Replace a note's chunks wholesale: delete all, then insert.
pub fn replace(conn: &Connection, note_id: &str, chunks: &[Chunk]) -> Result<()> {
    delete_for_note(conn, note_id)?;
    insert_all(conn, note_id, chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::{nodes, tabs};
    use nook_types::{Note, Tab};

    fn test_db() -> Connection {
        let conn = crate::open_memory().expect("open test db");
        tabs::insert(
            &conn,
            &Tab {
                tab_id: "t".to_string(),
                name: "t".to_string(),
                created_at: 1,
                updated_at: 1,
                rev: 0,
                ui_prefs: Default::default(),
            },
        )
        .expect("insert tab");
        nodes::insert(
            &conn,
            &Note {
                id: "n".to_string(),
                tab_id: "t".to_string(),
                parent_id: None,
                order_key: "0000000000rr".to_string(),
                kind: nook_types::KIND_CUSTOM.to_string(),
                title: String::new(),
                preview: String::new(),
                source: Default::default(),
                tags: Default::default(),
                flags: Default::default(),
                created_at: 1,
                updated_at: 1,
                rev: 1,
            },
        )
        .expect("insert note");
        conn
    }

    fn chunk(idx: u32, data: &str) -> Chunk {
        Chunk {
            idx,
            data: data.to_string(),
        }
    }

    #[test]
    fn test_insert_and_list_ordered() {
        let conn = test_db();
        insert_all(&conn, "n", &[chunk(1, "b"), chunk(0, "a")]).expect("insert");
        assert_eq!(list(&conn, "n").expect("list"), vec![chunk(0, "a"), chunk(1, "b")]);
    }

    #[test]
    fn test_replace_drops_stale_chunks() {
        let conn = test_db();
        insert_all(&conn, "n", &[chunk(0, "a"), chunk(1, "b"), chunk(2, "c")]).expect("insert");
        replace(&conn, "n", &[chunk(0, "z")]).expect("replace");
        assert_eq!(list(&conn, "n").expect("list"), vec![chunk(0, "z")]);
    }

    #[test]
    fn test_delete_for_note() {
        let conn = test_db();
        insert_all(&conn, "n", &[chunk(0, "a"), chunk(1, "b")]).expect("insert");
        assert_eq!(delete_for_note(&conn, "n").expect("delete"), 2);
        assert!(list(&conn, "n").expect("list").is_empty());
    }

    #[test]
    fn test_chunks_require_note() {
        let conn = test_db();
        assert!(insert_all(&conn, "ghost", &[chunk(0, "a")]).is_err());
    }
}
