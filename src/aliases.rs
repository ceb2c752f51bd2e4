//! # Type Aliases
//!
//! HMAC primitive and the wiped-on-drop buffers backing candidate slots.

use crate::consts::PLAINTEXT_BUFFER_LEN;

// ─────────────────────────────────────────────────────────────────────────────
// HMAC primitive
// ─────────────────────────────────────────────────────────────────────────────
use hmac::Hmac;
use md5::Md5;

pub type HmacMd5 = Hmac<Md5>;

// ─────────────────────────────────────────────────────────────────────────────
// SpanBuffer: fixed stack buffer, zeroized when dropped
// ─────────────────────────────────────────────────────────────────────────────
pub type SpanBuffer<const N: usize> = zeroize::Zeroizing<[u8; N]>;

/// One candidate slot: up to 125 plaintext bytes plus a terminator.
pub type PlaintextBuffer = SpanBuffer<PLAINTEXT_BUFFER_LEN>;
