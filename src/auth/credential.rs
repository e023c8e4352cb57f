// src/auth/credential.rs
use sha2::{Digest, Sha256};

/// SHA-256 digest, used for both the admin password and session tokens.
pub fn digest(value: &str) -> [u8; 32] {
    let out = Sha256::digest(value.as_bytes());
    let mut arr = [0u8; 32];
    arr.copy_from_slice(&out);
    arr
}

/// Compares without short-circuiting on the first differing byte.
pub fn digests_equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Checks a submitted password against the single shared admin credential.
/// Both sides are hashed first so the comparison is length-independent.
pub fn verify_admin_password(submitted: &str, configured: &str) -> bool {
    if configured.is_empty() {
        return false;
    }
    digests_equal(&digest(submitted), &digest(configured))
}
