//! Error taxonomy for notes commands.

use nook_db::DbError;
use nook_order::OrderKeyError;
use nook_text::TextError;

#[derive(Debug, thiserror::Error)]
pub enum NotesError {
    /// Referenced tab, note or parent does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The command would break a structural invariant.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// No key fits between two siblings. Resolved by rebalancing; only
    /// escapes if a full-range rebalance cannot fit the sibling list.
    #[error("order keyspace exhausted")]
    KeyspaceExhausted,

    /// Malformed command payload.
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// The storage transaction failed or was aborted.
    #[error("storage failure: {0}")]
    Storage(#[from] DbError),

    /// A stored order key does not decode.
    #[error("corrupt order key: {0}")]
    CorruptOrderKey(#[from] OrderKeyError),

    #[error("text error: {0}")]
    Text(#[from] TextError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NotesError {
    pub(crate) fn note_not_found(id: &str) -> Self {
        Self::NotFound(format!("note '{id}'"))
    }

    pub(crate) fn tab_not_found(id: &str) -> Self {
        Self::NotFound(format!("tab '{id}'"))
    }
}

pub type Result<T> = std::result::Result<T, NotesError>;
