//! src/crypto/kdf/lanes.rs
//! PBKDF2-HMAC-MD5 over several passwords in lock-step.
//!
//! Each lane keeps its own keyed HMAC state; every round advances all lanes before
//! the next round starts. Lanes never read each other's state.

use crate::aliases::HmacMd5;
use crate::consts::{LANE_WIDTH, MAX_BINARY_SIZE, MD5_OUTPUT_LEN};
use crate::VerifyError;
use hmac::Mac;

type Block = [u8; MD5_OUTPUT_LEN];

/// Derive `outputs[i]` from `passwords[i]` for every lane, all under one salt.
///
/// Up to [`LANE_WIDTH`] lanes per call; every output must have the same length
/// (1..=[`MAX_BINARY_SIZE`]).
pub fn derive_pbkdf2_md5_lanes(
    passwords: &[&[u8]],
    salt: &[u8],
    rounds: u32,
    outputs: &mut [&mut [u8]],
) -> Result<(), VerifyError> {
    if rounds == 0 {
        return Err(VerifyError::Crypto("PBKDF2 rounds must be ≥1".into()));
    }
    if passwords.len() != outputs.len() {
        return Err(VerifyError::Crypto(format!(
            "lane count mismatch: {} passwords, {} outputs",
            passwords.len(),
            outputs.len()
        )));
    }
    if passwords.len() > LANE_WIDTH {
        return Err(VerifyError::Crypto(format!(
            "at most {LANE_WIDTH} lanes per call, got {}",
            passwords.len()
        )));
    }
    let Some(out_len) = outputs.first().map(|o| o.len()) else {
        return Ok(());
    };
    if out_len == 0 || out_len > MAX_BINARY_SIZE || outputs.iter().any(|o| o.len() != out_len) {
        return Err(VerifyError::Crypto(format!(
            "lane outputs must share one length in 1..={MAX_BINARY_SIZE}"
        )));
    }

    let keyed = passwords
        .iter()
        .map(|pw| {
            <HmacMd5 as Mac>::new_from_slice(pw)
                .map_err(|e| VerifyError::Crypto(format!("HMAC key rejected: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut u: Vec<Block> = vec![[0u8; MD5_OUTPUT_LEN]; keyed.len()];
    let mut t: Vec<Block> = vec![[0u8; MD5_OUTPUT_LEN]; keyed.len()];

    for (block_index, offset) in (0..out_len).step_by(MD5_OUTPUT_LEN).enumerate() {
        let counter = (block_index as u32 + 1).to_be_bytes();

        for (lane, prf) in keyed.iter().enumerate() {
            let mut mac = prf.clone();
            mac.update(salt);
            mac.update(&counter);
            u[lane].copy_from_slice(&mac.finalize().into_bytes());
            t[lane] = u[lane];
        }

        for _ in 1..rounds {
            for (lane, prf) in keyed.iter().enumerate() {
                let mut mac = prf.clone();
                mac.update(&u[lane]);
                u[lane].copy_from_slice(&mac.finalize().into_bytes());
                for (acc, byte) in t[lane].iter_mut().zip(u[lane].iter()) {
                    *acc ^= byte;
                }
            }
        }

        let take = (out_len - offset).min(MD5_OUTPUT_LEN);
        for (lane, out) in outputs.iter_mut().enumerate() {
            out[offset..offset + take].copy_from_slice(&t[lane][..take]);
        }
    }

    Ok(())
}
