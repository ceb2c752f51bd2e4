//! # Credential Codec
//!
//! Parses and serializes the textual record format:
//!
//! ```text
//! [$pbkdf2-hmac-md5$]<rounds>$<hex-salt>$<hex-digest>
//! ```
//!
//! The tag is optional on input (legacy records omit it) and always present on output.
//! Hex is accepted in either case and emitted lowercase.

use crate::consts::{
    BINARY_SIZE, FIELD_SEPARATOR, FORMAT_TAG, MAX_BINARY_SIZE, MAX_ROUNDS, MAX_ROUNDS_DIGITS,
    MAX_SALT_LEN, MIN_ROUNDS,
};
use crate::digest::TargetDigest;
use crate::error::VerifyError;

/// Salt and round count shared by every candidate verified against one record.
///
/// The salt is held in a fixed [`MAX_SALT_LEN`] buffer; its length can never exceed it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SaltDescriptor {
    salt: [u8; MAX_SALT_LEN],
    len: usize,
    rounds: u32,
}

impl SaltDescriptor {
    /// Build a descriptor from raw salt bytes and a round count.
    ///
    /// # Errors
    ///
    /// [`VerifyError::Record`] if the salt is longer than [`MAX_SALT_LEN`] or `rounds`
    /// is outside `MIN_ROUNDS..=MAX_ROUNDS`.
    pub fn new(salt: &[u8], rounds: u32) -> Result<Self, VerifyError> {
        if salt.len() > MAX_SALT_LEN {
            return Err(VerifyError::Record(format!(
                "salt too long: {} bytes (max {MAX_SALT_LEN})",
                salt.len()
            )));
        }
        if !(MIN_ROUNDS..=MAX_ROUNDS).contains(&rounds) {
            return Err(VerifyError::Record(format!(
                "rounds out of range: {rounds} (expected {MIN_ROUNDS}..={MAX_ROUNDS})"
            )));
        }

        let mut buf = [0u8; MAX_SALT_LEN];
        buf[..salt.len()].copy_from_slice(salt);
        Ok(Self {
            salt: buf,
            len: salt.len(),
            rounds,
        })
    }

    /// Decoded salt bytes. May be empty.
    #[must_use]
    pub fn salt(&self) -> &[u8] {
        &self.salt[..self.len]
    }

    /// PBKDF2 iteration count (always ≥ 1).
    #[must_use]
    pub const fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Iteration count, for the host's cost estimation.
    #[must_use]
    pub const fn iteration_count(&self) -> u32 {
        self.rounds
    }
}

impl std::fmt::Debug for SaltDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaltDescriptor")
            .field("salt", &hex::encode(self.salt()))
            .field("rounds", &self.rounds)
            .finish()
    }
}

/// A fully parsed record: the salt descriptor plus the digest it must reproduce.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CredentialRecord {
    descriptor: SaltDescriptor,
    target: TargetDigest,
}

impl CredentialRecord {
    /// Pair a descriptor with its target digest.
    #[must_use]
    pub const fn new(descriptor: SaltDescriptor, target: TargetDigest) -> Self {
        Self { descriptor, target }
    }

    /// Salt and rounds.
    #[must_use]
    pub const fn descriptor(&self) -> &SaltDescriptor {
        &self.descriptor
    }

    /// Digest to reproduce.
    #[must_use]
    pub const fn target(&self) -> &TargetDigest {
        &self.target
    }

    /// Canonical textual form.
    #[must_use]
    pub fn encode(&self) -> String {
        encode_record(&self.descriptor, &self.target)
    }
}

impl std::str::FromStr for CredentialRecord {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_record(s)
    }
}

impl std::fmt::Display for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Parse a record into its salt descriptor and target digest.
///
/// # Errors
///
/// [`VerifyError::Record`] for any malformed input; nothing is partially accepted:
/// - wrong field count (missing or extra `$`)
/// - rounds that are empty, non-decimal, zero, or above [`MAX_ROUNDS`]
/// - odd-length or non-hex salt / digest
/// - salt over [`MAX_SALT_LEN`] bytes, digest outside `16..=64` bytes
///
/// # Example
///
/// ```
/// use pbkdf2_md5_rs::parse_record;
///
/// let record = parse_record(
///     "$pbkdf2-hmac-md5$1000$6578616d706c6573616c74$a2370305230da383868c1e1b9ee86012",
/// )?;
/// assert_eq!(record.descriptor().rounds(), 1000);
/// assert_eq!(record.descriptor().salt(), b"examplesalt");
/// # Ok::<(), pbkdf2_md5_rs::VerifyError>(())
/// ```
pub fn parse_record(record: &str) -> Result<CredentialRecord, VerifyError> {
    let body = record.strip_prefix(FORMAT_TAG).unwrap_or(record);

    let mut fields = body.split(FIELD_SEPARATOR);
    let (Some(rounds), Some(salt_hex), Some(digest_hex), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(VerifyError::Record(
            "expected <rounds>$<hex-salt>$<hex-digest>".into(),
        ));
    };

    let rounds = parse_rounds(rounds)?;

    if salt_hex.len() > 2 * MAX_SALT_LEN {
        return Err(VerifyError::Record(format!(
            "salt too long: {} hex chars (max {})",
            salt_hex.len(),
            2 * MAX_SALT_LEN
        )));
    }
    let salt = decode_hex_field("salt", salt_hex)?;
    let descriptor = SaltDescriptor::new(&salt, rounds)?;

    if digest_hex.len() > 2 * MAX_BINARY_SIZE {
        return Err(VerifyError::Record(format!(
            "digest too long: {} hex chars (max {})",
            digest_hex.len(),
            2 * MAX_BINARY_SIZE
        )));
    }
    let digest = decode_hex_field("digest", digest_hex)?;
    let target = TargetDigest::new(digest)?;

    Ok(CredentialRecord::new(descriptor, target))
}

/// Parse a record and keep only its salt descriptor.
///
/// # Errors
///
/// Same as [`parse_record`].
pub fn parse(record: &str) -> Result<SaltDescriptor, VerifyError> {
    parse_record(record).map(|r| r.descriptor)
}

/// `true` if `record` parses.
#[must_use]
pub fn is_valid(record: &str) -> bool {
    parse_record(record).is_ok()
}

/// Rewrite a record in canonical form: tag prefixed, hex lowercased.
///
/// # Errors
///
/// Same as [`parse_record`].
pub fn canonicalize(record: &str) -> Result<String, VerifyError> {
    parse_record(record).map(|r| r.encode())
}

/// Serialize a descriptor and target in canonical form.
#[must_use]
pub fn encode_record(descriptor: &SaltDescriptor, target: &TargetDigest) -> String {
    format!(
        "{FORMAT_TAG}{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
        descriptor.rounds(),
        hex::encode(descriptor.salt()),
        target.to_hex()
    )
}

/// Iteration count of a descriptor.
#[must_use]
pub const fn iteration_count(descriptor: &SaltDescriptor) -> u32 {
    descriptor.rounds()
}

fn parse_rounds(field: &str) -> Result<u32, VerifyError> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(VerifyError::Record(format!(
            "rounds must be decimal digits, got {field:?}"
        )));
    }
    // Leading zeros are legal, so bound the significant digits only.
    let significant = field.trim_start_matches('0');
    if significant.len() > MAX_ROUNDS_DIGITS {
        return Err(VerifyError::Record(format!("rounds out of range: {field}")));
    }

    let rounds: u64 = if significant.is_empty() {
        0
    } else {
        significant
            .parse()
            .map_err(|_| VerifyError::Record(format!("rounds out of range: {field}")))?
    };

    match u32::try_from(rounds) {
        Ok(r) if (MIN_ROUNDS..=MAX_ROUNDS).contains(&r) => Ok(r),
        _ => Err(VerifyError::Record(format!(
            "rounds out of range: {field} (expected {MIN_ROUNDS}..={MAX_ROUNDS})"
        ))),
    }
}

fn decode_hex_field(name: &str, field: &str) -> Result<Vec<u8>, VerifyError> {
    if field.len() % 2 != 0 {
        return Err(VerifyError::Record(format!(
            "{name} hex has odd length {}",
            field.len()
        )));
    }
    hex::decode(field).map_err(|e| VerifyError::Record(format!("{name} hex invalid: {e}")))
}
