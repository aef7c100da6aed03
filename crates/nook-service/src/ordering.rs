//! Sibling placement on top of fractional keys.
//!
//! A new key is taken from the gap at the requested slot. When the gap is
//! used up every sibling is laid out again across the full keyspace, in
//! the same relative order, leaving one free slot at the insertion point.

use nook_order::{allocate_between, key_for_slot};
use tracing::warn;

use crate::{NotesError, Result};

/// Outcome of placing one key among ordered siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Placement {
    pub key: String,
    /// Replacement keys for every sibling, in order, when a rebalance ran.
    pub relaid: Option<Vec<String>>,
}

/// Key for slot `index` among `siblings` (sorted keys, without the note
/// being placed). `index == siblings.len()` appends.
pub(crate) fn place(siblings: &[&str], index: usize) -> Result<Placement> {
    let index = index.min(siblings.len());
    let left = index.checked_sub(1).map(|i| siblings[i]);
    let right = siblings.get(index).copied();

    if let Some(key) = key_for_slot(left, right)? {
        return Ok(Placement { key, relaid: None });
    }

    warn!(siblings = siblings.len(), index, "order keyspace exhausted, rebalancing");
    let mut slots = allocate_between(None, None, siblings.len() + 1)?
        .ok_or(NotesError::KeyspaceExhausted)?;
    let key = slots.remove(index);
    Ok(Placement {
        key,
        relaid: Some(slots),
    })
}

/// Slot index for a note placed relative to sibling hints.
///
/// `before_id` wins over `after_id`. A hint that names no sibling is
/// ignored, and with no usable hint the note goes last.
pub(crate) fn resolve_index(
    sibling_ids: &[&str],
    before_id: Option<&str>,
    after_id: Option<&str>,
) -> usize {
    let position = |id: Option<&str>| id.and_then(|id| sibling_ids.iter().position(|s| *s == id));
    if let Some(i) = position(before_id) {
        return i;
    }
    if let Some(i) = position(after_id) {
        return i + 1;
    }
    sibling_ids.len()
}
