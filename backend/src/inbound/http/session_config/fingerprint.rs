//! Session key fingerprinting for operational visibility.
//!
//! Emits a truncated SHA-256 fingerprint of the session signing key so
//! operators can tell which key is active without exposing the key material.
//! The fingerprint is logged once at startup.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Length of the fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Generate a truncated SHA-256 fingerprint of the key's signing material.
///
/// Returns the first 8 bytes of the SHA-256 hash as a 16-character lowercase
/// hex string, enough for visual distinction in logs without being
/// security-sensitive.
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.signing());
    let digest = hasher.finalize();
    hex::encode(&digest[..FINGERPRINT_BYTES])
}
