//! Fixed-size chunk splitting and reassembly.
//!
//! Sizes count Unicode scalar values, not bytes, so a chunk boundary never
//! falls inside a character. Chunk size only matters when writing: readers
//! concatenate whatever chunks exist in index order.

use nook_types::Chunk;

use crate::{Result, TextError};

/// Chunk size: 64 Ki characters.
pub const DEFAULT_CHUNK_SIZE: usize = 65536;

/// Split `text` into consecutive chunks of at most `chunk_size` characters.
///
/// Indices start at 0. Empty text still yields one empty chunk so every
/// stored note has at least one chunk record.
pub fn split_text(text: &str, chunk_size: usize) -> Result<Vec<Chunk>> {
    if chunk_size == 0 {
        return Err(TextError::ZeroChunkSize);
    }

    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;
    for (offset, _) in text.char_indices() {
        if count == chunk_size {
            chunks.push(Chunk {
                idx: chunks.len() as u32,
                data: text[start..offset].to_string(),
            });
            start = offset;
            count = 0;
        }
        count += 1;
    }

    if count > 0 || chunks.is_empty() {
        chunks.push(Chunk {
            idx: chunks.len() as u32,
            data: text[start..].to_string(),
        });
    }

    Ok(chunks)
}

/// Concatenate chunks in ascending index order.
///
/// Storage order is not trusted, so the input is sorted first.
pub fn join_chunks(chunks: &[Chunk]) -> String {
    let mut ordered: Vec<&Chunk> = chunks.iter().collect();
    ordered.sort_by_key(|c| c.idx);

    let mut text = String::with_capacity(ordered.iter().map(|c| c.data.len()).sum());
    for chunk in ordered {
        text.push_str(&chunk.data);
    }
    text
}
