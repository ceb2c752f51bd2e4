//! tests/common.rs
//! Common constants and utilities shared across test files

#![allow(dead_code)] // Each test binary uses a different subset

use serde::Deserialize;

/// Cheap round count for tests - performance testing is in benches/
pub const TEST_ROUNDS: u32 = 5;

/// Canonical known-answer record: ("password", "examplesalt", 1000 rounds).
pub const KNOWN_RECORD: &str =
    "$pbkdf2-hmac-md5$1000$6578616d706c6573616c74$a2370305230da383868c1e1b9ee86012";

pub const KNOWN_PASSWORD: &[u8] = b"password";

/// Small dictionary of wrong guesses.
pub const DECOYS: &[&str] = &["123456", "qwerty", "letmein", "admin", "root", "hunter2"];

/// One known-answer vector from `tests/test_data/pbkdf2_md5_vectors.json`.
#[derive(Debug, Deserialize)]
pub struct KdfVector {
    pub password: String,
    pub salt_hex: String,
    pub rounds: u32,
    pub digest_hex: String,
    pub record: String,
}

// Shared JSON loader
pub fn load_json<T>(filename: &str) -> Vec<T>
where
    T: for<'de> Deserialize<'de>,
{
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("test_data")
        .join(filename);

    let content =
        std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {filename}: {e}"));

    serde_json::from_str(&content).unwrap_or_else(|e| panic!("Failed to parse {filename}: {e}"))
}

pub fn vectors() -> Vec<KdfVector> {
    load_json("pbkdf2_md5_vectors.json")
}
