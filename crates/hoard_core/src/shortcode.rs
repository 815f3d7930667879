//! Content hashing and the Crockford base-32 code alphabet.
//!
//! `hash_full_b32` is the identity function of the whole system:
//! identical bytes always produce the same 24-symbol string, and every
//! short code is a prefix of one. The alphabet excludes the visually
//! confusable I/L/O/U; `canonicalize_code` maps user-typed lookalikes
//! back onto alphabet members before lookup.

use blake2::digest::consts::U15;
use blake2::{Blake2b, Digest};
use hoard_error::{ValidationError, ValidationErrorKind};

/// 120-bit BLAKE2b, the digest behind every hash_full.
type Blake2b120 = Blake2b<U15>;

/// The Crockford base-32 alphabet: 0-9 then A-Z minus I, L, O, U.
pub const CROCKFORD32: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Length of an encoded full hash: ceil(120 / 5) symbols.
pub const HASH_FULL_LEN: usize = 24;

/// Encode bytes as Crockford base-32, big-endian, most significant
/// symbol first. Output length is ceil(bits / 5).
pub fn encode_crockford_b32(data: &[u8]) -> String {
    let bit_len = data.len() * 8;
    let char_count = bit_len.div_ceil(5);
    let mut out = String::with_capacity(char_count);
    for group in (0..char_count).rev() {
        let index = five_bits_at(data, group * 5);
        out.push(CROCKFORD32[index as usize] as char);
    }
    out
}

/// Extract the 5-bit group starting `offset` bits above the least
/// significant bit of `data` interpreted as a big-endian integer.
fn five_bits_at(data: &[u8], offset: usize) -> u8 {
    let mut value = 0u8;
    for bit in 0..5 {
        let pos = offset + bit;
        let byte_idx = pos / 8;
        if byte_idx >= data.len() {
            break;
        }
        let byte = data[data.len() - 1 - byte_idx];
        value |= ((byte >> (pos % 8)) & 1) << bit;
    }
    value
}

/// Compute the full content hash: BLAKE2b truncated to a 120-bit
/// digest, encoded as exactly [`HASH_FULL_LEN`] Crockford symbols.
///
/// # Examples
///
/// ```
/// use hoard_core::hash_full_b32;
///
/// assert_eq!(hash_full_b32(b"Hello, World!"), "D7GS0E632ZGYMQAVRXHYZ315");
/// ```
pub fn hash_full_b32(data: &[u8]) -> String {
    let mut hasher = Blake2b120::new();
    hasher.update(data);
    encode_crockford_b32(&hasher.finalize())
}

/// Canonicalize a user-supplied code for lookup.
///
/// Trims, uppercases, strips hyphens and spaces, then maps the
/// ambiguous O/I/L/U onto their canonical alphabet members (0/1/1/V).
///
/// # Errors
///
/// Returns a validation error if the normalized result is empty or
/// still contains a character outside the alphabet.
///
/// # Examples
///
/// ```
/// use hoard_core::canonicalize_code;
///
/// assert_eq!(canonicalize_code("oil1u").unwrap(), "0111V");
/// ```
pub fn canonicalize_code(code: &str) -> Result<String, ValidationError> {
    let mut out = String::with_capacity(code.len());
    for ch in code.trim().chars() {
        let ch = ch.to_ascii_uppercase();
        let ch = match ch {
            '-' | ' ' => continue,
            'O' => '0',
            'I' | 'L' => '1',
            'U' => 'V',
            other => other,
        };
        if !ch.is_ascii() || !CROCKFORD32.contains(&(ch as u8)) {
            return Err(ValidationError::new(ValidationErrorKind::InvalidCodeChar(
                ch,
            )));
        }
        out.push(ch);
    }
    if out.is_empty() {
        return Err(ValidationError::new(ValidationErrorKind::EmptyCode));
    }
    Ok(out)
}
