//! # Parallel batch passes
//!
//! Slot ranges are partitioned before the parallel section starts; each worker derives
//! its own contiguous range and writes only the digest slots of that range.
//! Without the `batch-ops` feature the same ranges run one after another.

#[cfg(feature = "batch-ops")]
use rayon::prelude::*;

use crate::batch::CandidateSlot;
use crate::codec::{CredentialRecord, SaltDescriptor};
use crate::compare::confirm;
use crate::digest::DerivedDigest;
use crate::engine::{derive_range, DeriveBackend};
use crate::error::VerifyError;
use crate::utils::partition_len;

/// Fixed-size worker pool owned by one session.
pub(crate) struct WorkerPool {
    workers: usize,
    #[cfg(feature = "batch-ops")]
    pool: rayon::ThreadPool,
}

impl WorkerPool {
    pub(crate) fn new(workers: usize) -> Result<Self, VerifyError> {
        if workers == 0 {
            return Err(VerifyError::Config("worker count must be ≥1".into()));
        }

        #[cfg(feature = "batch-ops")]
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("pbkdf2-md5-worker-{i}"))
            .build()
            .map_err(|e| VerifyError::WorkerPool(e.to_string()))?;

        Ok(Self {
            workers,
            #[cfg(feature = "batch-ops")]
            pool,
        })
    }

    pub(crate) const fn workers(&self) -> usize {
        self.workers
    }

    /// Derive every loaded slot, one statically assigned range per worker.
    pub(crate) fn derive_partitioned(
        &self,
        backend: &dyn DeriveBackend,
        descriptor: &SaltDescriptor,
        candidates: &[CandidateSlot],
        digests: &mut [DerivedDigest],
    ) -> Result<(), VerifyError> {
        if candidates.is_empty() {
            return Ok(());
        }
        let range = partition_len(candidates.len(), self.workers, backend.min_keys());

        #[cfg(feature = "batch-ops")]
        {
            self.pool.install(|| {
                candidates
                    .par_chunks(range)
                    .zip(digests.par_chunks_mut(range))
                    .try_for_each(|(slots, outs)| derive_range(backend, descriptor, slots, outs))
            })
        }

        #[cfg(not(feature = "batch-ops"))]
        {
            candidates
                .chunks(range)
                .zip(digests.chunks_mut(range))
                .try_for_each(|(slots, outs)| derive_range(backend, descriptor, slots, outs))
        }
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers)
            .finish()
    }
}

/// Check one candidate against many records at once (tier 2 only).
///
/// The candidate is cut the same way a batch slot stores it before every derivation.
/// Returns one flag per record, in input order.
///
/// # Errors
///
/// Propagates [`VerifyError::Crypto`] from the derivation primitive.
#[cfg(feature = "batch-ops")]
pub fn verify_records_batch(
    records: &[CredentialRecord],
    candidate: &[u8],
) -> Result<Vec<bool>, VerifyError> {
    records
        .par_iter()
        .map(|r| confirm(candidate, r.descriptor(), r.target()))
        .collect()
}

/// Check one candidate against many records, sequentially.
///
/// # Errors
///
/// Propagates [`VerifyError::Crypto`] from the derivation primitive.
#[cfg(not(feature = "batch-ops"))]
pub fn verify_records_batch(
    records: &[CredentialRecord],
    candidate: &[u8],
) -> Result<Vec<bool>, VerifyError> {
    records
        .iter()
        .map(|r| confirm(candidate, r.descriptor(), r.target()))
        .collect()
}
