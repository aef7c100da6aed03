//! Event broadcast to every listener.
//!
//! Each subscriber has an independent buffer. A slow subscriber that falls
//! more than `capacity` events behind skips ahead; since events only say
//! "re-fetch", skipping is harmless.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use nook_types::NotesEvent;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

/// Filter for event subscriptions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventFilter {
    /// Only revision bumps for these tabs. `None` accepts every tab.
    pub tab_ids: Option<Vec<String>>,
    /// Pass `tabs-changed` events.
    #[serde(default = "default_true")]
    pub tabs_changed: bool,
}

fn default_true() -> bool {
    true
}

/// Event bus for broadcasting events to subscribers.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<NotesEvent>,
    sequence: Arc<AtomicU64>,
}

impl EventBus {
    /// Create a new event bus with the given buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Emit an event to all subscribers. Returns its sequence number.
    pub fn emit(&self, event: NotesEvent) -> u64 {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(seq, ?event, "emitting event");
        // Ignore send errors (no subscribers)
        let _ = self.sender.send(event);
        seq
    }

    /// Subscribe to events. Returns a receiver.
    pub fn subscribe(&self) -> broadcast::Receiver<NotesEvent> {
        self.sender.subscribe()
    }
}

impl EventFilter {
    pub fn for_tab(tab_id: impl Into<String>) -> Self {
        Self {
            tab_ids: Some(vec![tab_id.into()]),
            tabs_changed: false,
        }
    }

    /// Check if an event matches this filter.
    pub fn matches(&self, event: &NotesEvent) -> bool {
        match event {
            NotesEvent::RevisionBump { tab_id, .. } => match self.tab_ids {
                Some(ref ids) => ids.iter().any(|id| id == tab_id),
                None => true,
            },
            NotesEvent::TabsChanged => self.tabs_changed,
        }
    }
}
