//! # nook-types
//!
//! Shared record types for the Nook notes store.
//!
//! Field names serialize in camelCase because the same records travel over
//! the command channel to the UI layer unchanged.

pub mod events;
pub mod note;
pub mod oplog;

pub use events::{EventMessage, NotesEvent};
pub use note::{Chunk, Note, NoteSource, Tab};
pub use oplog::{OpType, OplogEntry, OplogState};

pub type TabId = String;
pub type NoteId = String;

/// Note kind for ordinary user notes.
pub const KIND_CUSTOM: &str = "custom";

/// Note kind for scratch buffers keyed by origin + key.
pub const KIND_SCRATCH: &str = "scratch";

/// Key inside [`Note::flags`] holding the rendered HTML snapshot.
pub const FLAG_HTML: &str = "html";
