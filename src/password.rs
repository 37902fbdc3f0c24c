// Copyright 2023 Remi Bernotavicius

use sha2::{Digest as _, Sha256};

/// One-way hash of a password, as a fixed-length lowercase hex string. Only this value is ever
/// stored or compared.
pub fn hash_password(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    hash_password(password) == stored_hash
}

#[test]
fn hash_is_fixed_length_hex() {
    let hash = hash_password("password123");
    assert_eq!(hash.len(), 64);
    assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(hash, "password123");
    assert_eq!(hash, hash_password("password123"));
}

#[test]
fn verify() {
    let hash = hash_password("cookmaster");
    assert!(verify_password("cookmaster", &hash));
    assert!(!verify_password("Cookmaster", &hash));
}
