//! Hashing System - MD5 for Content-Addressed Archives
//!
//! The archive name carries a short digest of its contents, so identical
//! pack trees always produce identically named archives.

use md5::{Digest, Md5};

/// Number of hex characters kept for the filename suffix.
pub const SHORT_DIGEST_LEN: usize = 8;

/// Compute MD5 of bytes, return lowercase hex string
pub fn md5_hex(data: &[u8]) -> String {
    let mut hasher = Md5::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Incremental digest over a sequence of archive entries.
#[derive(Default)]
pub struct ContentHasher {
    inner: Md5,
}

impl ContentHasher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Full lowercase hex digest.
    pub fn finalize_hex(self) -> String {
        hex::encode(self.inner.finalize())
    }
}

/// Leading characters of a hex digest used in filenames.
pub fn short_digest(hex_digest: &str) -> &str {
    hex_digest.get(..SHORT_DIGEST_LEN).unwrap_or(hex_digest)
}
