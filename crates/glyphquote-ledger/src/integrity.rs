// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Upload fingerprints: SHA-256 content ids for stored files.

use glyphquote_core::error::{QuoteError, Result};
use sha2::{Digest, Sha256};

/// Length of a hex-encoded SHA-256 digest.
pub const CONTENT_ID_LEN: usize = 64;

/// SHA-256 of `data` as a lowercase hex string.
pub fn hash_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

/// Whether `id` has the shape of a content id (64 lowercase hex digits).
pub fn is_content_id(id: &str) -> bool {
    id.len() == CONTENT_ID_LEN && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Check stored bytes against the id they were filed under.
pub fn verify_content(data: &[u8], id: &str) -> Result<()> {
    let actual = hash_bytes(data);
    if actual == id {
        Ok(())
    } else {
        Err(QuoteError::Storage(format!(
            "stored blob {id} is corrupt (content hashes to {actual})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn hash_known_values() {
        assert_eq!(hash_bytes(b""), EMPTY_SHA256);
        assert_eq!(
            hash_bytes(b"hello"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn content_id_shape() {
        assert!(is_content_id(EMPTY_SHA256));
        assert!(!is_content_id("../../etc/passwd"));
        assert!(!is_content_id(&EMPTY_SHA256.to_uppercase()));
        assert!(!is_content_id(&EMPTY_SHA256[..63]));
    }

    #[test]
    fn verify_detects_corruption() {
        assert!(verify_content(b"", EMPTY_SHA256).is_ok());
        assert!(matches!(
            verify_content(b"tampered", EMPTY_SHA256),
            Err(QuoteError::Storage(_))
        ));
    }
}
