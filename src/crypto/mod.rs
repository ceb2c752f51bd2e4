// src/crypto/mod.rs

//! Low-level crypto primitives (PBKDF2-HMAC-MD5).
//!
//! `kdf::pbkdf2` is the exact-length scalar primitive; `kdf::lanes` runs the same
//! iteration loop over several candidates at once. HMAC types are defined in `aliases.rs`.

pub mod kdf;
