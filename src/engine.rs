//! # Batched KDF Engine
//!
//! One derivation interface, two interchangeable backends:
//!
//! - [`ScalarBackend`]: one primitive call per candidate
//! - [`LaneBackend`]: one call per group of [`LANE_WIDTH`] candidates, run in lock-step
//!
//! Chunk width is a throughput knob only: both backends yield identical digests for the
//! same (candidate, descriptor) pair, whatever the batch size or slot position.

use crate::codec::SaltDescriptor;
use crate::consts::{LANE_WIDTH, MAX_BINARY_SIZE, SCALAR_LANES};
use crate::crypto::kdf::lanes::derive_pbkdf2_md5_lanes;
use crate::crypto::kdf::pbkdf2::derive_pbkdf2_md5;
use crate::digest::DerivedDigest;
use crate::error::VerifyError;
use serde::{Deserialize, Serialize};

/// A derivation backend.
///
/// `derive_chunk` receives at most [`min_keys`](Self::min_keys) passwords and writes one
/// digest per password, in order.
pub trait DeriveBackend: Send + Sync {
    /// Candidates handled per primitive call.
    fn min_keys(&self) -> usize;

    /// Short human-readable name, used in logs.
    fn name(&self) -> &'static str;

    /// Derive `outputs[i]` from `passwords[i]` under `descriptor`.
    fn derive_chunk(
        &self,
        descriptor: &SaltDescriptor,
        passwords: &[&[u8]],
        outputs: &mut [DerivedDigest],
    ) -> Result<(), VerifyError>;
}

/// One candidate per call, straight through the `pbkdf2` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarBackend;

impl DeriveBackend for ScalarBackend {
    fn min_keys(&self) -> usize {
        SCALAR_LANES
    }

    fn name(&self) -> &'static str {
        "scalar"
    }

    fn derive_chunk(
        &self,
        descriptor: &SaltDescriptor,
        passwords: &[&[u8]],
        outputs: &mut [DerivedDigest],
    ) -> Result<(), VerifyError> {
        check_chunk_shape(passwords.len(), outputs.len(), usize::MAX)?;
        for (password, out) in passwords.iter().zip(outputs.iter_mut()) {
            derive_pbkdf2_md5(
                password,
                descriptor.salt(),
                descriptor.rounds(),
                out.as_bytes_mut(),
            )?;
        }
        Ok(())
    }
}

/// [`LANE_WIDTH`] candidates per call, iterated in lock-step.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaneBackend;

impl DeriveBackend for LaneBackend {
    fn min_keys(&self) -> usize {
        LANE_WIDTH
    }

    fn name(&self) -> &'static str {
        "lanes"
    }

    fn derive_chunk(
        &self,
        descriptor: &SaltDescriptor,
        passwords: &[&[u8]],
        outputs: &mut [DerivedDigest],
    ) -> Result<(), VerifyError> {
        check_chunk_shape(passwords.len(), outputs.len(), LANE_WIDTH)?;
        let mut outs: Vec<&mut [u8]> = outputs
            .iter_mut()
            .map(|d| d.as_bytes_mut().as_mut_slice())
            .collect();
        derive_pbkdf2_md5_lanes(passwords, descriptor.salt(), descriptor.rounds(), &mut outs)
    }
}

fn check_chunk_shape(passwords: usize, outputs: usize, max: usize) -> Result<(), VerifyError> {
    if passwords != outputs {
        return Err(VerifyError::Crypto(format!(
            "chunk shape mismatch: {passwords} passwords, {outputs} outputs"
        )));
    }
    if passwords > max {
        return Err(VerifyError::Crypto(format!(
            "chunk of {passwords} exceeds backend width {max}"
        )));
    }
    Ok(())
}

/// Backend selection, fixed when a session is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// [`ScalarBackend`].
    Scalar,
    /// [`LaneBackend`].
    Lanes,
}

impl BackendKind {
    /// Instantiate the selected backend.
    #[must_use]
    pub fn backend(self) -> Box<dyn DeriveBackend> {
        match self {
            Self::Scalar => Box::new(ScalarBackend),
            Self::Lanes => Box::new(LaneBackend),
        }
    }

    /// Chunk width of the selected backend.
    #[must_use]
    pub const fn min_keys(self) -> usize {
        match self {
            Self::Scalar => SCALAR_LANES,
            Self::Lanes => LANE_WIDTH,
        }
    }
}

impl Default for BackendKind {
    /// `Lanes` with the `lanes` feature, `Scalar` otherwise.
    fn default() -> Self {
        if cfg!(feature = "lanes") {
            Self::Lanes
        } else {
            Self::Scalar
        }
    }
}

/// Derive `digests[i]` from `candidates[i]`, one backend chunk at a time.
pub(crate) fn derive_range<C>(
    backend: &dyn DeriveBackend,
    descriptor: &SaltDescriptor,
    candidates: &[C],
    digests: &mut [DerivedDigest],
) -> Result<(), VerifyError>
where
    C: AsRef<[u8]>,
{
    let width = backend.min_keys().max(1);
    for (group, outs) in candidates.chunks(width).zip(digests.chunks_mut(width)) {
        let passwords: Vec<&[u8]> = group.iter().map(|c| c.as_ref()).collect();
        backend.derive_chunk(descriptor, &passwords, outs)?;
    }
    Ok(())
}

/// Derive one digest per candidate, order-preserving.
///
/// # Errors
///
/// Propagates [`VerifyError::Crypto`] from the backend.
///
/// # Example
///
/// ```
/// use pbkdf2_md5_rs::{derive_batch, LaneBackend, SaltDescriptor};
///
/// let descriptor = SaltDescriptor::new(b"examplesalt", 1000)?;
/// let digests = derive_batch(&descriptor, &[b"password".as_slice()], &LaneBackend)?;
/// assert_eq!(hex::encode(digests[0].as_bytes()), "a2370305230da383868c1e1b9ee86012");
/// # Ok::<(), pbkdf2_md5_rs::VerifyError>(())
/// ```
pub fn derive_batch<C>(
    descriptor: &SaltDescriptor,
    candidates: &[C],
    backend: &dyn DeriveBackend,
) -> Result<Vec<DerivedDigest>, VerifyError>
where
    C: AsRef<[u8]>,
{
    let mut digests = vec![DerivedDigest::default(); candidates.len()];
    derive_range(backend, descriptor, candidates, &mut digests)?;
    Ok(digests)
}

/// Derive `out_len` bytes (1..=[`MAX_BINARY_SIZE`]) for a single password.
///
/// Used by exact confirmation, where the record may carry more than
/// [`BINARY_SIZE`](crate::consts::BINARY_SIZE) bytes.
///
/// # Errors
///
/// [`VerifyError::Crypto`] for an unsupported `out_len`.
pub fn derive_full(
    password: &[u8],
    descriptor: &SaltDescriptor,
    out_len: usize,
) -> Result<Vec<u8>, VerifyError> {
    if out_len == 0 || out_len > MAX_BINARY_SIZE {
        return Err(VerifyError::Crypto(format!(
            "output length must be 1..={MAX_BINARY_SIZE}, got {out_len}"
        )));
    }
    let mut out = vec![0u8; out_len];
    derive_pbkdf2_md5(password, descriptor.salt(), descriptor.rounds(), &mut out)?;
    Ok(out)
}
