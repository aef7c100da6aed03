//! Key generation and bulk allocation.

use crate::{OrderKeyError, Result, KEY_LEN, MAX_VALUE, STEP};

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Decode a stored key into its integer value.
pub fn decode(key: &str) -> Result<u128> {
    let actual = key.chars().count();
    if actual != KEY_LEN {
        return Err(OrderKeyError::InvalidLength {
            key: key.to_string(),
            expected: KEY_LEN,
            actual,
        });
    }

    let mut value: u128 = 0;
    for c in key.chars() {
        let digit = c
            .to_digit(36)
            .filter(|_| !c.is_ascii_uppercase())
            .ok_or_else(|| OrderKeyError::InvalidDigit {
                key: key.to_string(),
                digit: c,
            })?;
        value = value * 36 + u128::from(digit);
    }
    Ok(value)
}

/// Encode an integer as a zero-padded 12-digit key.
pub fn encode(value: u128) -> Result<String> {
    if value > MAX_VALUE {
        return Err(OrderKeyError::OutOfRange(value));
    }

    let mut digits = [b'0'; KEY_LEN];
    let mut rest = value;
    for slot in digits.iter_mut().rev() {
        *slot = ALPHABET[(rest % 36) as usize];
        rest /= 36;
    }
    // Every byte comes from ALPHABET.
    Ok(digits.iter().map(|&b| b as char).collect())
}

/// Exclusive lower bound of the open interval after `left`.
fn lower_bound(left: Option<&str>) -> Result<i128> {
    match left {
        Some(key) => Ok(decode(key)? as i128),
        None => Ok(-1),
    }
}

/// Exclusive upper bound of the open interval before `right`.
fn upper_bound(right: Option<&str>) -> Result<i128> {
    match right {
        Some(key) => Ok(decode(key)? as i128),
        None => Ok(MAX_VALUE as i128 + 1),
    }
}

fn encode_signed(value: i128) -> Result<String> {
    encode(value as u128)
}

/// Key [`STEP`] past `left`, or `None` when that leaves the keyspace.
///
/// With no left neighbour the first key is `STEP - 1`.
pub fn generate_key_after(left: Option<&str>) -> Result<Option<String>> {
    let next = lower_bound(left)? + STEP as i128;
    if next > MAX_VALUE as i128 {
        return Ok(None);
    }
    encode_signed(next).map(Some)
}

/// Key [`STEP`] before `right`, or `None` when that would go below zero.
pub fn generate_key_before(right: Option<&str>) -> Result<Option<String>> {
    let prev = upper_bound(right)? - STEP as i128;
    if prev < 0 {
        return Ok(None);
    }
    encode_signed(prev).map(Some)
}

/// Midpoint between two keys, or `None` when no integer lies strictly
/// between them (including `right <= left`).
pub fn generate_key_between(left: &str, right: &str) -> Result<Option<String>> {
    let lo = decode(left)?;
    let hi = decode(right)?;
    if hi <= lo + 1 {
        return Ok(None);
    }

    let mid = lo + (hi - lo) / 2;
    if mid <= lo || mid >= hi {
        return Ok(None);
    }
    encode(mid).map(Some)
}

/// Key for the slot between two optional neighbours.
///
/// Picks between/after/before depending on which neighbours exist and
/// appends after nothing when the slot is the only one.
pub fn key_for_slot(left: Option<&str>, right: Option<&str>) -> Result<Option<String>> {
    match (left, right) {
        (Some(l), Some(r)) => generate_key_between(l, r),
        (Some(_), None) => generate_key_after(left),
        (None, Some(_)) => generate_key_before(right),
        (None, None) => generate_key_after(None),
    }
}

/// `count` evenly spaced keys strictly inside `(left, right)`.
///
/// Missing bounds extend to the ends of the keyspace. Returns `None` when
/// the interval cannot hold `count` distinct values.
pub fn allocate_between(
    left: Option<&str>,
    right: Option<&str>,
    count: usize,
) -> Result<Option<Vec<String>>> {
    let lo = lower_bound(left)?;
    let hi = upper_bound(right)?;
    if count == 0 {
        return Ok(Some(Vec::new()));
    }

    let gap = hi - lo;
    let step = gap / (count as i128 + 1);
    if step < 1 {
        return Ok(None);
    }

    let mut keys = Vec::with_capacity(count);
    for i in 1..=count as i128 {
        keys.push(encode_signed(lo + step * i)?);
    }
    Ok(Some(keys))
}
