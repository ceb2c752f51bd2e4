//! # Digests
//!
//! [`DerivedDigest`] is the fixed 16-byte output held per batch slot.
//! [`TargetDigest`] is the full digest decoded from a credential record (16 to 64 bytes).
//!
//! Bytes are the only storage view. The word view used by the tier-1 screen is an
//! explicit read of the leading bytes, never an aliasing pointer.

use crate::consts::{BINARY_SIZE, BUCKET_MASKS, MAX_BINARY_SIZE, SCREEN_WIDTH};
use crate::error::VerifyError;

/// PBKDF2-HMAC-MD5 output for one candidate, truncated to [`BINARY_SIZE`] bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DerivedDigest([u8; BINARY_SIZE]);

impl DerivedDigest {
    /// Wrap raw digest bytes.
    #[must_use]
    pub const fn new(bytes: [u8; BINARY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; BINARY_SIZE] {
        &self.0
    }

    /// Mutable digest bytes, written by the derivation backends.
    #[inline(always)]
    pub fn as_bytes_mut(&mut self) -> &mut [u8; BINARY_SIZE] {
        &mut self.0
    }

    /// Leading [`SCREEN_WIDTH`] bytes read as one native-endian machine word.
    #[inline(always)]
    #[must_use]
    pub fn leading_word(&self) -> usize {
        let mut word = [0u8; SCREEN_WIDTH];
        word.copy_from_slice(&self.0[..SCREEN_WIDTH]);
        usize::from_ne_bytes(word)
    }

    /// Hash-table bucket of this digest at `level` (0..=6).
    ///
    /// The first native-endian `u32` masked with [`BUCKET_MASKS`]`[level]`.
    /// Returns `None` for levels past the mask table.
    #[must_use]
    pub fn bucket(&self, level: usize) -> Option<u32> {
        let mask = BUCKET_MASKS.get(level)?;
        let word = u32::from_ne_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]);
        Some(word & mask)
    }

    /// Reset to all zero bytes.
    pub fn clear(&mut self) {
        self.0 = [0u8; BINARY_SIZE];
    }
}

impl From<[u8; BINARY_SIZE]> for DerivedDigest {
    fn from(bytes: [u8; BINARY_SIZE]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for DerivedDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Digest carried by a credential record.
///
/// Always between [`BINARY_SIZE`] and [`MAX_BINARY_SIZE`] bytes. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetDigest {
    bytes: Vec<u8>,
    binary: DerivedDigest,
}

impl TargetDigest {
    /// Build a target from decoded digest bytes.
    ///
    /// # Errors
    ///
    /// [`VerifyError::Record`] if the length is outside `BINARY_SIZE..=MAX_BINARY_SIZE`.
    pub fn new(bytes: Vec<u8>) -> Result<Self, VerifyError> {
        if bytes.len() < BINARY_SIZE || bytes.len() > MAX_BINARY_SIZE {
            return Err(VerifyError::Record(format!(
                "digest must be {BINARY_SIZE}..={MAX_BINARY_SIZE} bytes, got {}",
                bytes.len()
            )));
        }

        let mut leading = [0u8; BINARY_SIZE];
        leading.copy_from_slice(&bytes[..BINARY_SIZE]);

        Ok(Self {
            bytes,
            binary: DerivedDigest::new(leading),
        })
    }

    /// The complete digest as encoded in the record.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Encoded digest length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always `false`: a target carries at least [`BINARY_SIZE`] bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Leading [`BINARY_SIZE`] bytes, in the shape of a slot digest.
    #[must_use]
    pub const fn binary(&self) -> &DerivedDigest {
        &self.binary
    }

    /// Lowercase hex encoding of the full digest.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_word_reads_prefix_only() {
        let mut a = [0u8; BINARY_SIZE];
        a[..SCREEN_WIDTH].copy_from_slice(&[0xab; SCREEN_WIDTH]);
        let mut b = a;
        b[BINARY_SIZE - 1] = 0xff;

        let a = DerivedDigest::new(a);
        let b = DerivedDigest::new(b);
        assert_ne!(a, b);
        assert_eq!(a.leading_word(), b.leading_word());
    }

    #[test]
    fn bucket_masks() {
        let d = DerivedDigest::new([0xff; BINARY_SIZE]);
        assert_eq!(d.bucket(0), Some(0xf));
        assert_eq!(d.bucket(3), Some(0xffff));
        assert_eq!(d.bucket(6), Some(0x7ff_ffff));
        assert_eq!(d.bucket(7), None);
    }

    #[test]
    fn target_length_bounds() {
        assert!(TargetDigest::new(vec![0; BINARY_SIZE - 1]).is_err());
        assert!(TargetDigest::new(vec![0; MAX_BINARY_SIZE + 1]).is_err());

        let t = TargetDigest::new((0..32).collect()).unwrap();
        assert_eq!(t.len(), 32);
        assert_eq!(t.binary().as_bytes()[..], t.as_bytes()[..BINARY_SIZE]);
    }
}
