//! # Error Types
//!
//! All fallible operations return [`Result<T, VerifyError>`](VerifyError).
//! A candidate that does not reproduce the target digest is a normal outcome and is
//! never reported through this type.

use thiserror::Error;

/// The error type for all verification operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    /// The credential record is malformed.
    ///
    /// Covers:
    /// - Missing `$` separators or trailing fields
    /// - Non-decimal, zero or out-of-range rounds
    /// - Odd-length or non-hex salt / digest runs
    /// - Salt longer than [`MAX_SALT_LEN`](crate::consts::MAX_SALT_LEN)
    /// - Digest shorter or longer than the supported binary sizes
    #[error("Record error: {0}")]
    Record(String),

    /// Invalid session configuration (zero workers, oversized batch width, ...).
    #[error("Config error: {0}")]
    Config(String),

    /// A batch slot index at or beyond the store capacity.
    #[error("Slot {slot} out of range (capacity {capacity})")]
    SlotOutOfRange {
        /// Requested slot.
        slot: usize,
        /// Capacity of the batch store.
        capacity: usize,
    },

    /// The derivation primitive rejected its arguments.
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// The worker thread pool could not be created.
    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

impl From<hex::FromHexError> for VerifyError {
    fn from(err: hex::FromHexError) -> Self {
        VerifyError::Record(format!("invalid hex: {err}"))
    }
}
