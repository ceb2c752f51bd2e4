//! # Constants
//!
//! Format parameters of the `$pbkdf2-hmac-md5$` credential record and the sizing
//! defaults used by the batch engine.

/// Literal prefix identifying a PBKDF2-HMAC-MD5 record.
pub const FORMAT_TAG: &str = "$pbkdf2-hmac-md5$";

/// Length of [`FORMAT_TAG`] in bytes.
pub const FORMAT_TAG_LEN: usize = FORMAT_TAG.len();

/// Field separator inside a record.
pub const FIELD_SEPARATOR: char = '$';

/// Maximum decoded salt length in bytes, the record format's salt limit.
///
/// Longer salts are rejected at parse time, never cut short.
pub const MAX_SALT_LEN: usize = 64;

/// Output size of MD5, and therefore of one PBKDF2 block.
pub const MD5_OUTPUT_LEN: usize = 16;

/// Digest bytes derived per candidate on the fast path.
pub const BINARY_SIZE: usize = MD5_OUTPUT_LEN;

/// Maximum digest bytes a record may carry (four PBKDF2 blocks).
pub const MAX_BINARY_SIZE: usize = 4 * BINARY_SIZE;

/// Maximum candidate plaintext length in bytes. Longer input is truncated, and a
/// plaintext always ends at its first NUL byte.
pub const PLAINTEXT_LENGTH: usize = 125;

/// Size of one candidate slot buffer (plaintext plus terminator byte).
pub const PLAINTEXT_BUFFER_LEN: usize = PLAINTEXT_LENGTH + 1;

/// Minimum allowed PBKDF2 round count.
pub const MIN_ROUNDS: u32 = 1;

/// Maximum accepted PBKDF2 round count.
///
/// Matches the range of a signed 32-bit decimal conversion. Larger values are
/// treated as a malformed record rather than wrapped.
pub const MAX_ROUNDS: u32 = i32::MAX as u32;

/// Longest accepted rounds field, in decimal digits.
pub const MAX_ROUNDS_DIGITS: usize = 10;

/// Bytes compared by the tier-1 screen (one native machine word).
pub const SCREEN_WIDTH: usize = core::mem::size_of::<usize>();

/// Candidates processed per call by the scalar backend.
pub const SCALAR_LANES: usize = 1;

/// Candidates processed per call by the lane backend.
pub const LANE_WIDTH: usize = 4;

/// Per-worker multiplier applied to `2 * min_keys` when no batch width is configured.
pub const DEFAULT_BATCH_SCALE: usize = 8;

/// Masks applied to the first digest word by [`DerivedDigest::bucket`](crate::DerivedDigest::bucket).
pub const BUCKET_MASKS: [u32; 7] = [
    0xf, 0xff, 0xfff, 0xffff, 0xf_ffff, 0xff_ffff, 0x7ff_ffff,
];

/// Largest accepted batch width (slots per session).
pub const MAX_BATCH_WIDTH: usize = 1 << 20;
