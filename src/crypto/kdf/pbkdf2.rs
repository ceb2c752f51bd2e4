//! src/crypto/kdf/pbkdf2.rs

use crate::aliases::HmacMd5;
use crate::consts::MAX_BINARY_SIZE;
use crate::VerifyError;

/// Derive PBKDF2-HMAC-MD5 into a caller-provided buffer of any length up to
/// [`MAX_BINARY_SIZE`].
///
/// The password is the HMAC key, the salt is the PBKDF2 salt.
#[inline(always)]
pub fn derive_pbkdf2_md5(
    password: &[u8],
    salt: &[u8],
    rounds: u32,
    out: &mut [u8],
) -> Result<(), VerifyError> {
    if rounds == 0 {
        return Err(VerifyError::Crypto("PBKDF2 rounds must be ≥1".into()));
    }
    if out.is_empty() || out.len() > MAX_BINARY_SIZE {
        return Err(VerifyError::Crypto(format!(
            "PBKDF2 output length must be 1..={MAX_BINARY_SIZE}, got {}",
            out.len()
        )));
    }

    ::pbkdf2::pbkdf2::<HmacMd5>(password, salt, rounds, out)
        .map_err(|e| VerifyError::Crypto(format!("PBKDF2 failed: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_answer() {
        let mut out = [0u8; 16];
        derive_pbkdf2_md5(b"password", b"examplesalt", 1000, &mut out).unwrap();
        assert_eq!(hex::encode(out), "a2370305230da383868c1e1b9ee86012");
    }

    #[test]
    fn longer_output_extends_first_block() {
        let mut short = [0u8; 16];
        let mut long = [0u8; 32];
        derive_pbkdf2_md5(b"password", b"examplesalt", 1000, &mut short).unwrap();
        derive_pbkdf2_md5(b"password", b"examplesalt", 1000, &mut long).unwrap();
        assert_eq!(short, long[..16]);
        assert_eq!(
            hex::encode(long),
            "a2370305230da383868c1e1b9ee860127e01fdd37146da5fca4ef25c329276d6"
        );
    }

    #[test]
    fn rejects_zero_rounds_and_bad_lengths() {
        let mut out = [0u8; 16];
        assert!(derive_pbkdf2_md5(b"pw", b"salt", 0, &mut out).is_err());
        assert!(derive_pbkdf2_md5(b"pw", b"salt", 1, &mut []).is_err());
        let mut big = [0u8; MAX_BINARY_SIZE + 1];
        assert!(derive_pbkdf2_md5(b"pw", b"salt", 1, &mut big).is_err());
    }
}
