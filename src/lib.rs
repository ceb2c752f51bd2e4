// src/lib.rs

//! Batched PBKDF2-HMAC-MD5 credential verification.
//!
//! Parse a `$pbkdf2-hmac-md5$<rounds>$<hex-salt>$<hex-digest>` record, load candidate
//! plaintexts into a fixed-capacity batch, derive them all in one pass, and get back the
//! slots whose digest reproduces the record.

pub mod aliases;
pub mod batch;
pub mod batch_ops;
pub mod builders;
pub mod codec;
pub mod compare;
pub mod config;
pub mod consts;
pub mod crypto;
pub mod digest;
pub mod engine;
pub mod error;
pub mod session;
pub mod utils;

// High-level API
pub use builders::session_builder::SessionBuilder;
pub use config::SessionConfig;
pub use error::VerifyError;
pub use session::VerifySession;

// Record format
pub use codec::{
    canonicalize, encode_record, is_valid, iteration_count, parse, parse_record,
    CredentialRecord, SaltDescriptor,
};
pub use digest::{DerivedDigest, TargetDigest};

// Engine and comparator, for hosts that manage their own buffers
pub use batch::BatchStore;
pub use batch_ops::verify_records_batch;
pub use compare::{compare_binary, confirm, screen, screen_hits};
pub use engine::{
    derive_batch, derive_full, BackendKind, DeriveBackend, LaneBackend, ScalarBackend,
};

// Low-level KDF primitives
pub use crypto::kdf::lanes::derive_pbkdf2_md5_lanes;
pub use crypto::kdf::pbkdf2::derive_pbkdf2_md5;
