//! Typed commands, their results, and the request/response envelope.
//!
//! A request on the wire is `{"command": "<name>", "payload": {...}}` and is
//! parsed straight into [`Command`]. Every answer is a [`Response`]:
//! `{"ok": true, "result": ...}` or `{"ok": false, "error": "..."}`.

use std::collections::BTreeSet;

use nook_types::{Note, NoteSource};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", content = "payload", rename_all = "snake_case")]
pub enum Command {
    Init,
    ListTabs,
    CreateTab(CreateTabParams),
    RenameTab(RenameTabParams),
    UpdateTabPrefs(UpdateTabPrefsParams),
    DeleteTab(TabRef),
    CreateNote(CreateNoteParams),
    GetNote(NoteRef),
    ListChildren(ListChildrenParams),
    UpdateNoteText(UpdateNoteTextParams),
    MoveNote(MoveNoteParams),
    DeleteNote(NoteRef),
    GetOrCreateScratch(ScratchParams),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::ListTabs => "list_tabs",
            Self::CreateTab(_) => "create_tab",
            Self::RenameTab(_) => "rename_tab",
            Self::UpdateTabPrefs(_) => "update_tab_prefs",
            Self::DeleteTab(_) => "delete_tab",
            Self::CreateNote(_) => "create_note",
            Self::GetNote(_) => "get_note",
            Self::ListChildren(_) => "list_children",
            Self::UpdateNoteText(_) => "update_note_text",
            Self::MoveNote(_) => "move_note",
            Self::DeleteNote(_) => "delete_note",
            Self::GetOrCreateScratch(_) => "get_or_create_scratch",
        }
    }

    /// Parse a raw `{command, payload}` request.
    ///
    /// Commands without arguments also accept `payload: {}`.
    pub fn from_request(mut request: Value) -> serde_json::Result<Self> {
        if let Some(fields) = request.as_object_mut() {
            let unit = matches!(
                fields.get("command").and_then(Value::as_str),
                Some("init" | "list_tabs")
            );
            let empty = fields
                .get("payload")
                .and_then(Value::as_object)
                .is_some_and(|payload| payload.is_empty());
            if unit && empty {
                fields.remove("payload");
            }
        }
        serde_json::from_value(request)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabRef {
    pub tab_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRef {
    pub note_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTabParams {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameTabParams {
    pub tab_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTabPrefsParams {
    pub tab_id: String,
    pub ui_prefs: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteParams {
    /// Owning tab. Defaults to the parent's tab, then the default tab.
    #[serde(default)]
    pub tab_id: Option<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Defaults to `"custom"`.
    #[serde(default)]
    pub kind: Option<String>,
    /// Overrides the title derived from `text`.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub source: NoteSource,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListChildrenParams {
    pub tab_id: String,
    /// `None` lists top-level notes.
    #[serde(default)]
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteTextParams {
    pub note_id: String,
    pub text: String,
    /// Absent keeps the snapshot, `null` clears it, a string replaces it.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub html: Option<Option<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveNoteParams {
    pub note_id: String,
    /// New parent; `None` moves to the top level of the note's tab.
    #[serde(default)]
    pub parent_id: Option<String>,
    /// Place immediately before this sibling.
    #[serde(default)]
    pub before_id: Option<String>,
    /// Place immediately after this sibling (used when `before_id` does
    /// not resolve).
    #[serde(default)]
    pub after_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScratchParams {
    pub origin: String,
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitResult {
    pub device_id: String,
    pub default_tab_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedNote {
    pub note_id: String,
    pub tab_id: String,
    pub order_key: String,
}

/// A note together with its reassembled body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteWithText {
    pub note: Note,
    pub text: String,
    pub html: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedNote {
    pub note_id: String,
    pub rev: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovedNote {
    pub note_id: String,
    pub parent_id: Option<String>,
    pub order_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedNotes {
    /// Every removed note id, root first.
    pub deleted: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedTab {
    pub tab_id: String,
    pub deleted_notes: usize,
}

/// Response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    /// Create a success response.
    pub fn success(result: serde_json::Value) -> Self {
        Self {
            ok: true,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            error: Some(error.into()),
        }
    }
}
