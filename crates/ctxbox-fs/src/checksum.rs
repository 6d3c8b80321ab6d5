//! Short SHA-256 checksums
//!
//! Container and image names embed a 64-bit checksum: the first 16 hex digits
//! of the SHA-256 digest of the input.

use sha2::{Digest, Sha256};

/// Number of hex digits kept from the full digest
const SHORT_LEN: usize = 16;

/// Compute the short checksum of string content.
pub fn short_checksum(content: &str) -> String {
    short_checksum_bytes(content.as_bytes())
}

/// Compute the short checksum of raw bytes.
pub fn short_checksum_bytes(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let mut hex = format!("{:x}", hasher.finalize());
    hex.truncate(SHORT_LEN);
    hex
}
