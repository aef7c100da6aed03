//! # nook-text
//!
//! Conversion between a note body and its stored chunk sequence, plus the
//! short strings shown in listings.
//!
//! ## Modules
//!
//! - [`chunker`]: fixed-size character chunking and reassembly.
//! - [`summary`]: title and preview derivation.

pub mod chunker;
pub mod summary;

pub use chunker::{join_chunks, split_text, DEFAULT_CHUNK_SIZE};
pub use summary::{build_preview, build_title};

/// Error types for text operations.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// Chunk size must hold at least one character.
    #[error("chunk size must be at least 1")]
    ZeroChunkSize,
}

/// Convenience result type for text operations.
pub type Result<T> = std::result::Result<T, TextError>;
