//! Content-based fingerprint of a bundle file.

use sha2::{Digest, Sha256};

/// Hex SHA-256 of the raw bundle bytes.
pub fn fingerprint(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// First 12 hex digits, for display.
pub fn short_fingerprint(full: &str) -> &str {
    full.get(..12).unwrap_or(full)
}
