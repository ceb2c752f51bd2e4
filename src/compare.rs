//! # Two-Tier Comparator
//!
//! Tier 1 ([`screen`], [`screen_hits`]) compares the leading machine word of every slot
//! digest with the target. It may report collisions but never misses an equal digest.
//! [`compare_binary`] narrows a hit to the full 16-byte slot digest.
//! Tier 2 ([`confirm`]) recomputes the candidate at the record's full digest length and
//! compares every byte. Only tier 2 declares a match.

use crate::batch::stored_plaintext;
use crate::codec::SaltDescriptor;
use crate::digest::{DerivedDigest, TargetDigest};
use crate::engine::derive_full;
use crate::error::VerifyError;

/// `true` if any digest in `batch` shares the target's leading word.
#[must_use]
pub fn screen(target: &TargetDigest, batch: &[DerivedDigest]) -> bool {
    let word = target.binary().leading_word();
    batch.iter().any(|d| d.leading_word() == word)
}

/// Slot indices whose leading word equals the target's, ascending.
#[must_use]
pub fn screen_hits(target: &TargetDigest, batch: &[DerivedDigest]) -> Vec<usize> {
    let word = target.binary().leading_word();
    batch
        .iter()
        .enumerate()
        .filter(|(_, d)| d.leading_word() == word)
        .map(|(i, _)| i)
        .collect()
}

/// Full 16-byte comparison of one slot digest against the target's leading bytes.
#[inline(always)]
#[must_use]
pub fn compare_binary(target: &TargetDigest, digest: &DerivedDigest) -> bool {
    target.binary() == digest
}

/// Recompute `candidate` at the target's full length and compare byte for byte.
///
/// The candidate is cut exactly as a batch slot would store it (first NUL, then
/// [`PLAINTEXT_LENGTH`](crate::consts::PLAINTEXT_LENGTH) bytes), so raw input and a
/// loaded slot always verify the same way.
///
/// # Errors
///
/// [`VerifyError::Crypto`] if the primitive rejects its arguments (not for a mismatch).
pub fn confirm(
    candidate: &[u8],
    descriptor: &SaltDescriptor,
    target: &TargetDigest,
) -> Result<bool, VerifyError> {
    let derived = derive_full(stored_plaintext(candidate), descriptor, target.len())?;
    Ok(derived.as_slice() == target.as_bytes())
}
