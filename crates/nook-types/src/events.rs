//! Change notifications broadcast after a command commits.
//!
//! Events carry no note content. Listeners filter by `tabId` and re-fetch.

use serde::{Deserialize, Serialize};

use crate::TabId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ts_rs::TS)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum NotesEvent {
    /// Something inside the tab changed; `rev` is its new revision.
    #[serde(rename_all = "camelCase")]
    RevisionBump { tab_id: TabId, rev: u64 },
    /// A tab was created or deleted.
    TabsChanged,
}

impl NotesEvent {
    pub fn tab_id(&self) -> Option<&str> {
        match self {
            Self::RevisionBump { tab_id, .. } => Some(tab_id),
            Self::TabsChanged => None,
        }
    }
}

/// Wire form: `{"type":"event","event":"revision-bump","tabId":..,"rev":..}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub event: NotesEvent,
}

impl From<NotesEvent> for EventMessage {
    fn from(event: NotesEvent) -> Self {
        Self {
            kind: "event".to_string(),
            event,
        }
    }
}
