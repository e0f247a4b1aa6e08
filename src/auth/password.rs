//! Salted password digests.

use sha2::{Digest, Sha256};

/// Fresh random salt for a new account.
pub fn generate_salt() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Hex-encoded SHA-256 of `salt || password`.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check `password` against a stored digest without early exit on mismatch.
pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    let actual = hash_password(password, salt);
    if actual.len() != expected_hash.len() {
        return false;
    }
    actual
        .bytes()
        .zip(expected_hash.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
