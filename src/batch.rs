//! # Candidate Batch Store
//!
//! Fixed-capacity parallel arrays: one plaintext slot and one derived digest per candidate.
//! Slots are allocated once and overwritten in place on every batch load.
//!
//! Every plaintext goes through [`stored_plaintext`] before it is derived: it ends at the
//! first NUL byte and is cut to [`PLAINTEXT_LENGTH`], exactly as a fixed-buffer string copy
//! with terminator would do. Truncated candidates are still verified.

use crate::aliases::PlaintextBuffer;
use crate::consts::{PLAINTEXT_BUFFER_LEN, PLAINTEXT_LENGTH};
use crate::digest::DerivedDigest;
use crate::error::VerifyError;

/// The bytes of `plaintext` that are actually verified.
///
/// Stops at the first NUL byte, then caps the result at [`PLAINTEXT_LENGTH`].
///
/// ```
/// use pbkdf2_md5_rs::batch::stored_plaintext;
///
/// assert_eq!(stored_plaintext(b"pass\0word"), b"pass");
/// assert_eq!(stored_plaintext(&[b'a'; 200]).len(), 125);
/// ```
#[must_use]
pub fn stored_plaintext(plaintext: &[u8]) -> &[u8] {
    let end = plaintext
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(plaintext.len())
        .min(PLAINTEXT_LENGTH);
    &plaintext[..end]
}

/// One candidate plaintext slot.
pub struct CandidateSlot {
    buf: PlaintextBuffer,
    len: usize,
    loaded: bool,
}

impl CandidateSlot {
    fn new() -> Self {
        Self {
            buf: PlaintextBuffer::new([0u8; PLAINTEXT_BUFFER_LEN]),
            len: 0,
            loaded: false,
        }
    }

    /// Store `plaintext` as cut by [`stored_plaintext`]. Returns the stored length.
    fn set(&mut self, plaintext: &[u8]) -> usize {
        let kept = stored_plaintext(plaintext);
        let len = kept.len();
        self.buf[..len].copy_from_slice(kept);
        self.buf[len..].fill(0);
        self.len = len;
        self.loaded = true;
        len
    }

    fn clear(&mut self) {
        self.buf.fill(0);
        self.len = 0;
        self.loaded = false;
    }

    /// Stored plaintext bytes.
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// `true` once a candidate was stored here since the last clear.
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Stored plaintext length.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// `true` if nothing (or an empty plaintext) is stored.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for CandidateSlot {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Debug for CandidateSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CandidateSlot")
            .field("len", &self.len)
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}

/// Candidate and digest slots for one verification session.
///
/// # Thread Safety
///
/// The store itself is not shared. During a batch pass the digest array is split into
/// disjoint ranges, each written by exactly one worker.
#[derive(Debug)]
pub struct BatchStore {
    candidates: Vec<CandidateSlot>,
    digests: Vec<DerivedDigest>,
    loaded: usize,
}

impl BatchStore {
    /// Allocate `capacity` slots.
    ///
    /// # Errors
    ///
    /// [`VerifyError::Config`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, VerifyError> {
        if capacity == 0 {
            return Err(VerifyError::Config("batch capacity must be ≥1".into()));
        }
        Ok(Self {
            candidates: (0..capacity).map(|_| CandidateSlot::new()).collect(),
            digests: vec![DerivedDigest::default(); capacity],
            loaded: 0,
        })
    }

    /// Maximum candidates per pass.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.candidates.len()
    }

    /// One past the highest slot written since the last [`clear_all`](Self::clear_all).
    ///
    /// Gaps below it are derived as empty plaintexts but never reported as matches;
    /// see [`is_loaded`](Self::is_loaded).
    #[must_use]
    pub const fn len(&self) -> usize {
        self.loaded
    }

    /// `true` if no slot was written since the last clear.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.loaded == 0
    }

    /// Store a candidate plaintext in `slot`, cut by [`stored_plaintext`].
    ///
    /// Returns the number of bytes kept. Other slots are untouched.
    ///
    /// # Errors
    ///
    /// [`VerifyError::SlotOutOfRange`] if `slot >= capacity()`.
    pub fn set_candidate(&mut self, slot: usize, plaintext: &[u8]) -> Result<usize, VerifyError> {
        let capacity = self.capacity();
        let entry = self
            .candidates
            .get_mut(slot)
            .ok_or(VerifyError::SlotOutOfRange { slot, capacity })?;
        let kept = entry.set(plaintext);
        self.loaded = self.loaded.max(slot + 1);
        Ok(kept)
    }

    /// Plaintext stored in `slot` (possibly truncated, empty if never set).
    ///
    /// # Errors
    ///
    /// [`VerifyError::SlotOutOfRange`] if `slot >= capacity()`.
    pub fn get_candidate(&self, slot: usize) -> Result<&[u8], VerifyError> {
        self.candidates
            .get(slot)
            .map(CandidateSlot::as_bytes)
            .ok_or(VerifyError::SlotOutOfRange {
                slot,
                capacity: self.capacity(),
            })
    }

    /// `true` if `slot` holds a candidate loaded since the last clear.
    #[must_use]
    pub fn is_loaded(&self, slot: usize) -> bool {
        self.candidates.get(slot).is_some_and(CandidateSlot::is_loaded)
    }

    /// Digest last derived for `slot`.
    ///
    /// # Errors
    ///
    /// [`VerifyError::SlotOutOfRange`] if `slot >= capacity()`.
    pub fn digest(&self, slot: usize) -> Result<&DerivedDigest, VerifyError> {
        self.digests.get(slot).ok_or(VerifyError::SlotOutOfRange {
            slot,
            capacity: self.capacity(),
        })
    }

    /// Wipe every candidate and digest slot.
    pub fn clear_all(&mut self) {
        self.candidates.iter_mut().for_each(CandidateSlot::clear);
        self.digests.iter_mut().for_each(DerivedDigest::clear);
        self.loaded = 0;
    }

    /// Loaded candidates and their digest slots, for one batch pass.
    pub(crate) fn loaded_mut(&mut self) -> (&[CandidateSlot], &mut [DerivedDigest]) {
        let n = self.loaded;
        (&self.candidates[..n], &mut self.digests[..n])
    }

    /// Digests of the loaded candidates.
    #[must_use]
    pub fn loaded_digests(&self) -> &[DerivedDigest] {
        &self.digests[..self.loaded]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_rejected() {
        assert!(matches!(
            BatchStore::with_capacity(0),
            Err(VerifyError::Config(_))
        ));
    }

    #[test]
    fn slots_are_independent() {
        let mut store = BatchStore::with_capacity(4).unwrap();
        store.set_candidate(0, b"alpha").unwrap();
        store.set_candidate(2, b"gamma").unwrap();
        store.set_candidate(0, b"a").unwrap();

        assert_eq!(store.get_candidate(0).unwrap(), b"a");
        assert_eq!(store.get_candidate(1).unwrap(), b"");
        assert_eq!(store.get_candidate(2).unwrap(), b"gamma");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn overlong_plaintext_truncated() {
        let mut store = BatchStore::with_capacity(1).unwrap();
        let long = vec![b'x'; 200];
        assert_eq!(store.set_candidate(0, &long).unwrap(), PLAINTEXT_LENGTH);
        assert_eq!(store.get_candidate(0).unwrap(), &long[..PLAINTEXT_LENGTH]);
    }

    #[test]
    fn plaintext_ends_at_first_nul() {
        let mut store = BatchStore::with_capacity(2).unwrap();
        assert_eq!(store.set_candidate(0, b"pass\0word").unwrap(), 4);
        assert_eq!(store.get_candidate(0).unwrap(), b"pass");

        let mut long = vec![b'y'; 200];
        long[130] = 0;
        assert_eq!(store.set_candidate(1, &long).unwrap(), PLAINTEXT_LENGTH);
    }

    #[test]
    fn loaded_flags_track_writes() {
        let mut store = BatchStore::with_capacity(4).unwrap();
        store.set_candidate(2, b"").unwrap();
        assert!(!store.is_loaded(0));
        assert!(store.is_loaded(2));
        assert!(!store.is_loaded(9));
        store.clear_all();
        assert!(!store.is_loaded(2));
    }

    #[test]
    fn out_of_range_slot() {
        let mut store = BatchStore::with_capacity(2).unwrap();
        assert_eq!(
            store.set_candidate(2, b"x").unwrap_err(),
            VerifyError::SlotOutOfRange {
                slot: 2,
                capacity: 2
            }
        );
        assert!(store.get_candidate(5).is_err());
        assert!(store.digest(2).is_err());
    }

    #[test]
    fn clear_all_resets() {
        let mut store = BatchStore::with_capacity(2).unwrap();
        store.set_candidate(1, b"secret").unwrap();
        store.clear_all();
        assert!(store.is_empty());
        assert_eq!(store.get_candidate(1).unwrap(), b"");
    }
}
