//! Hashing utilities for API key verification.

use sha2::{Digest, Sha256};

/// Computes SHA-256 hash of the input and returns it as a hex string.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Checks a presented key against a stored SHA-256 hex digest.
///
/// The comparison runs over the full digest length regardless of where the
/// first mismatch occurs. An empty stored hash never matches.
pub fn verify_key_hash(presented: &str, stored_hash: &str) -> bool {
    if stored_hash.is_empty() {
        return false;
    }

    let computed = sha256_hex(presented);
    let stored = stored_hash.trim().to_ascii_lowercase();
    if computed.len() != stored.len() {
        return false;
    }

    computed
        .bytes()
        .zip(stored.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
