//! Session id generation.
//!
//! Ids are short strings over a 36-character alphabet (lowercase ASCII
//! letters and digits), each character drawn independently from a
//! [`RandomSource`].

use super::entropy::RandomSource;
use crate::errors::domain::DomainError;

const ALPHABET: &[u8; 36] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of session ids handed out by the registry.
pub const SESSION_ID_LEN: usize = 6;

/// Generate an id of `length` characters.
///
/// Fails with a `RandomSource` error as soon as any draw fails; no partial
/// id is returned.
pub fn generate_id(length: usize, rng: &dyn RandomSource) -> Result<String, DomainError> {
    let mut s = String::with_capacity(length);
    for _ in 0..length {
        s.push(ALPHABET[rng.index(ALPHABET.len())?] as char);
    }
    Ok(s)
}

/// True if `id` could have been produced by [`generate_id`] with the registry's length.
pub fn is_well_formed(id: &str) -> bool {
    id.len() == SESSION_ID_LEN && id.bytes().all(|b| ALPHABET.contains(&b))
}
