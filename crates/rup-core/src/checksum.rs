//! Chunk payload checksums (SHA-256, hex-encoded).
//!
//! Stamped on every chunk request so a receiver can verify integrity before
//! assembling the file. Never consulted for retry decisions.

use sha2::{Digest, Sha256};

/// Computes SHA-256 of `data` and returns the hex-encoded digest.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
