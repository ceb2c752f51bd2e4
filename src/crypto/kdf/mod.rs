//! # Key Derivation Functions (KDF)
//!
//! PBKDF2 with HMAC-MD5 as the pseudorandom function.
//!
//! ## Modules
//!
//! - [`pbkdf2`] - Scalar derivation of any output length, one password per call
//! - [`lanes`] - Lock-step derivation of several passwords under one salt
//!
//! Both produce byte-identical output for the same (password, salt, rounds, length).

pub mod lanes;
pub mod pbkdf2;
