//! # nook-order
//!
//! Fractional sort keys for ordering sibling notes.
//!
//! A key is a fixed-width, 12-digit, lowercase base-36 string. Because every
//! key has the same width, lexicographic order equals numeric order, so the
//! storage layer can sort on the raw string.
//!
//! Insertion leaves a gap of [`STEP`] after or before a neighbour, and
//! inserting between two keys takes their midpoint. When no integer fits
//! between two neighbours the generators return `Ok(None)` and the caller
//! must rebalance the sibling list with [`allocate_between`].
//!
//! A stored key that does not decode is corrupt data. It is reported as an
//! error and never clamped.

pub mod fractional;

pub use fractional::{
    allocate_between, decode, encode, generate_key_after, generate_key_before,
    generate_key_between, key_for_slot,
};

/// Number of base-36 digits in every key.
pub const KEY_LEN: usize = 12;

/// Gap left by append/prepend so later inserts rarely need a rebalance.
pub const STEP: u128 = 1000;

/// Largest value a key can hold: `36^12 - 1`.
pub const MAX_VALUE: u128 = pow36(KEY_LEN as u32) - 1;

const fn pow36(exp: u32) -> u128 {
    let mut acc: u128 = 1;
    let mut i = 0;
    while i < exp {
        acc *= 36;
        i += 1;
    }
    acc
}

/// Error types for order key operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderKeyError {
    /// Key does not have exactly [`KEY_LEN`] digits.
    #[error("invalid order key {key:?}: expected {expected} digits, got {actual}")]
    InvalidLength {
        key: String,
        expected: usize,
        actual: usize,
    },

    /// Key contains a character outside `0-9a-z`.
    #[error("invalid order key {key:?}: {digit:?} is not a base-36 digit")]
    InvalidDigit { key: String, digit: char },

    /// Value does not fit in [`KEY_LEN`] digits.
    #[error("order key value {0} exceeds the keyspace")]
    OutOfRange(u128),
}

/// Convenience result type for order key operations.
pub type Result<T> = std::result::Result<T, OrderKeyError>;
