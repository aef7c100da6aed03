//! Tabs, notes and content chunks.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{NoteId, TabId, FLAG_HTML};

/// A named workspace that owns a forest of notes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ts_rs::TS)]
#[serde(rename_all = "camelCase")]
pub struct Tab {
    pub tab_id: TabId,
    pub name: String,
    pub created_at: u64,
    pub updated_at: u64,
    /// Bumped by exactly one on every mutation inside the tab.
    pub rev: u64,
    #[serde(default)]
    #[ts(type = "Record<string, unknown>")]
    pub ui_prefs: serde_json::Map<String, serde_json::Value>,
}

/// Where a note came from. Scratch notes are looked up by this pair.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
pub struct NoteSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl NoteSource {
    pub fn new(origin: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            origin: Some(origin.into()),
            key: Some(key.into()),
        }
    }

    pub fn matches(&self, origin: &str, key: &str) -> bool {
        self.origin.as_deref() == Some(origin) && self.key.as_deref() == Some(key)
    }
}

/// A single node in a tab's note hierarchy.
///
/// The body text is not stored here; it lives in [`Chunk`] records keyed by
/// `(id, idx)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ts_rs::TS)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    /// Fixed at creation; moves never change it.
    pub tab_id: TabId,
    /// `None` for top-level notes.
    pub parent_id: Option<NoteId>,
    /// 12-digit base-36 fractional key, unique among siblings.
    pub order_key: String,
    pub kind: String,
    pub title: String,
    pub preview: String,
    #[serde(default)]
    pub source: NoteSource,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    #[ts(type = "Record<string, unknown>")]
    pub flags: serde_json::Map<String, serde_json::Value>,
    pub created_at: u64,
    pub updated_at: u64,
    pub rev: u64,
}

impl Note {
    /// Rendered HTML snapshot stored in `flags`, if any.
    pub fn html(&self) -> Option<&str> {
        self.flags.get(FLAG_HTML).and_then(|v| v.as_str())
    }

    /// Replace (`Some`) or clear (`None`) the HTML snapshot.
    pub fn set_html(&mut self, html: Option<String>) {
        match html {
            Some(html) => {
                self.flags
                    .insert(FLAG_HTML.to_string(), serde_json::Value::String(html));
            }
            None => {
                self.flags.remove(FLAG_HTML);
            }
        }
    }
}

/// One fixed-size slice of a note body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
pub struct Chunk {
    pub idx: u32,
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note() -> Note {
        Note {
            id: "n1".to_string(),
            tab_id: "t1".to_string(),
            parent_id: None,
            order_key: "0000000000rr".to_string(),
            kind: crate::KIND_CUSTOM.to_string(),
            title: "Hello".to_string(),
            preview: "Hello".to_string(),
            source: NoteSource::default(),
            tags: BTreeSet::new(),
            flags: serde_json::Map::new(),
            created_at: 1,
            updated_at: 1,
            rev: 1,
        }
    }

    #[test]
    fn test_note_serializes_camel_case() {
        let json = serde_json::to_value(note()).expect("serialize");
        assert_eq!(json["tabId"], "t1");
        assert_eq!(json["orderKey"], "0000000000rr");
        assert!(json["parentId"].is_null());
    }

    #[test]
    fn test_html_snapshot_set_and_clear() {
        let mut n = note();
        assert_eq!(n.html(), None);
        n.set_html(Some("<p>hi</p>".to_string()));
        assert_eq!(n.html(), Some("<p>hi</p>"));
        n.set_html(None);
        assert_eq!(n.html(), None);
        assert!(n.flags.is_empty());
    }

    #[test]
    fn test_source_matches() {
        let source = NoteSource::new("chat", "thread-1");
        assert!(source.matches("chat", "thread-1"));
        assert!(!source.matches("chat", "thread-2"));
        assert!(!NoteSource::default().matches("chat", "thread-1"));
    }
}
