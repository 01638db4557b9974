//! Content hashing for change detection.
//!
//! Exported files are compared by SHA256 digest so that an unchanged
//! document is never rewritten.

use sha2::{Digest, Sha256};

/// Hex SHA256 digest of `content`.
#[must_use]
pub fn content_hash(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{:x}", hasher.finalize())
}

/// Check whether `current_hash` differs from a previously stored hash.
///
/// Returns `true` when there is no stored hash.
#[must_use]
pub fn has_changed(current_hash: &str, stored_hash: Option<&str>) -> bool {
    stored_hash.is_none_or(|h| h != current_hash)
}
