//! SQL schema definitions.

/// Complete schema for the v1 notes database.
pub const SCHEMA_V1: &str = r#"
-- ============================================================
-- Process-wide singletons (device id, oplog sequence)
-- ============================================================

CREATE TABLE IF NOT EXISTS meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

-- ============================================================
-- Tabs
-- ============================================================

CREATE TABLE IF NOT EXISTS tabs (
    tab_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    rev INTEGER NOT NULL DEFAULT 0,
    ui_prefs TEXT NOT NULL DEFAULT '{}'
);

CREATE INDEX IF NOT EXISTS idx_tabs_created ON tabs(created_at);

-- ============================================================
-- Notes and content chunks
-- ============================================================

CREATE TABLE IF NOT EXISTS nodes (
    id TEXT PRIMARY KEY,
    tab_id TEXT NOT NULL REFERENCES tabs(tab_id),
    parent_id TEXT,
    order_key TEXT NOT NULL,
    kind TEXT NOT NULL,
    title TEXT NOT NULL,
    preview TEXT NOT NULL,
    source TEXT NOT NULL DEFAULT '{}',
    tags TEXT NOT NULL DEFAULT '[]',
    flags TEXT NOT NULL DEFAULT '{}',
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL,
    rev INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS idx_nodes_children ON nodes(tab_id, parent_id, order_key);
CREATE INDEX IF NOT EXISTS idx_nodes_tab_created ON nodes(tab_id, created_at);
CREATE INDEX IF NOT EXISTS idx_nodes_tab_kind ON nodes(tab_id, kind);

CREATE TABLE IF NOT EXISTS chunks (
    note_id TEXT NOT NULL REFERENCES nodes(id),
    idx INTEGER NOT NULL,
    data TEXT NOT NULL,
    PRIMARY KEY (note_id, idx)
);

CREATE INDEX IF NOT EXISTS idx_chunks_note ON chunks(note_id);

-- ============================================================
-- Operation log
-- ============================================================

CREATE TABLE IF NOT EXISTS oplog (
    seq INTEGER PRIMARY KEY,
    op_id TEXT NOT NULL UNIQUE,
    device_id TEXT NOT NULL,
    ts INTEGER NOT NULL,
    op_type TEXT NOT NULL,
    payload TEXT NOT NULL,
    state TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_oplog_state ON oplog(state);

-- ============================================================
-- Downstream consumers (indexer, backup)
-- ============================================================

CREATE TABLE IF NOT EXISTS tasks (
    id TEXT PRIMARY KEY,
    kind TEXT NOT NULL,
    payload TEXT NOT NULL,
    state TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS backups (
    id TEXT PRIMARY KEY,
    created_at INTEGER NOT NULL,
    payload TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS search_index (
    note_id TEXT NOT NULL,
    term TEXT NOT NULL,
    PRIMARY KEY (note_id, term)
);
"#;
