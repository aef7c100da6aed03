//! Append-only operation log records.

use serde::{Deserialize, Serialize};

/// Mutation recorded by an oplog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[serde(rename_all = "snake_case")]
pub enum OpType {
    CreateTab,
    RenameTab,
    UpdateTabPrefs,
    DeleteTab,
    CreateNote,
    UpdateText,
    MoveNote,
    DeleteNote,
}

impl OpType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreateTab => "create_tab",
            Self::RenameTab => "rename_tab",
            Self::UpdateTabPrefs => "update_tab_prefs",
            Self::DeleteTab => "delete_tab",
            Self::CreateNote => "create_note",
            Self::UpdateText => "update_text",
            Self::MoveNote => "move_note",
            Self::DeleteNote => "delete_note",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "create_tab" => Self::CreateTab,
            "rename_tab" => Self::RenameTab,
            "update_tab_prefs" => Self::UpdateTabPrefs,
            "delete_tab" => Self::DeleteTab,
            "create_note" => Self::CreateNote,
            "update_text" => Self::UpdateText,
            "move_note" => Self::MoveNote,
            "delete_note" => Self::DeleteNote,
            _ => return None,
        })
    }
}

/// Processing state owned by downstream consumers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[serde(rename_all = "snake_case")]
pub enum OplogState {
    PendingIndex,
    Indexed,
}

impl OplogState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PendingIndex => "pending_index",
            Self::Indexed => "indexed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending_index" => Some(Self::PendingIndex),
            "indexed" => Some(Self::Indexed),
            _ => None,
        }
    }
}

/// One committed mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ts_rs::TS)]
#[serde(rename_all = "camelCase")]
pub struct OplogEntry {
    pub seq: u64,
    pub op_id: String,
    pub device_id: String,
    pub ts: u64,
    #[serde(rename = "type")]
    pub op_type: OpType,
    #[ts(type = "unknown")]
    pub payload: serde_json::Value,
    pub state: OplogState,
}
