//! # Verification Session
//!
//! A [`VerifySession`] owns everything one verification run needs: the parsed record,
//! the batch store, the derivation backend and the worker pool. Every operation goes
//! through the session, so there is no hidden "current salt" to set first.
//!
//! ## Flow
//!
//! 1. [`load_candidate`](VerifySession::load_candidate) fills slots
//! 2. [`run_batch`](VerifySession::run_batch) derives all loaded slots, screens them, and
//!    confirms the hits
//! 3. the returned slot indices map back to the plaintexts via
//!    [`candidate`](VerifySession::candidate)

use crate::batch::BatchStore;
use crate::batch_ops::WorkerPool;
use crate::codec::{parse_record, CredentialRecord};
use crate::compare::{compare_binary, confirm, screen, screen_hits};
use crate::config::SessionConfig;
use crate::consts::BINARY_SIZE;
use crate::digest::DerivedDigest;
use crate::engine::DeriveBackend;
use crate::error::VerifyError;
use tracing::{debug, trace, warn};

/// One credential record plus the buffers to verify candidates against it.
pub struct VerifySession {
    record: CredentialRecord,
    store: BatchStore,
    backend: Box<dyn DeriveBackend>,
    pool: WorkerPool,
    config: SessionConfig,
}

impl VerifySession {
    /// Allocate a session for `record`, sized by `config`.
    ///
    /// # Errors
    ///
    /// - [`VerifyError::Config`] if the configuration is invalid
    /// - [`VerifyError::WorkerPool`] if worker threads cannot be spawned
    pub fn new(record: CredentialRecord, config: &SessionConfig) -> Result<Self, VerifyError> {
        config.validate()?;

        let backend = config.backend.backend();
        let store = BatchStore::with_capacity(config.batch_width())?;
        let pool = WorkerPool::new(config.workers)?;

        debug!(
            capacity = store.capacity(),
            workers = pool.workers(),
            backend = backend.name(),
            rounds = record.descriptor().rounds(),
            "verification session allocated"
        );

        Ok(Self {
            record,
            store,
            backend,
            pool,
            config: *config,
        })
    }

    /// Parse `record` and allocate a session for it.
    ///
    /// # Errors
    ///
    /// [`VerifyError::Record`] for a malformed record, otherwise as [`VerifySession::new`].
    pub fn from_record_str(record: &str, config: &SessionConfig) -> Result<Self, VerifyError> {
        Self::new(parse_record(record)?, config)
    }

    /// Record currently bound to the session.
    #[must_use]
    pub const fn record(&self) -> &CredentialRecord {
        &self.record
    }

    /// Configuration the session was built with.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Switch to another record, keeping buffers and loaded candidates.
    ///
    /// Digests from the previous record are discarded on the next [`run_batch`](Self::run_batch).
    pub fn bind_record(&mut self, record: CredentialRecord) {
        debug!(
            rounds = record.descriptor().rounds(),
            salt_len = record.descriptor().salt().len(),
            "record bound"
        );
        self.record = record;
    }

    /// PBKDF2 rounds of the bound record.
    #[must_use]
    pub const fn iteration_count(&self) -> u32 {
        self.record.descriptor().rounds()
    }

    /// Maximum candidates per pass.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.store.capacity()
    }

    /// One past the highest loaded slot.
    ///
    /// Every slot below it is derived on [`run_batch`](Self::run_batch); slots never
    /// loaded are derived as empty plaintexts and never reported.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.store.len()
    }

    /// `true` if no candidate is loaded.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Load a candidate into `slot`. The plaintext ends at its first NUL byte and is
    /// truncated to 125 bytes.
    ///
    /// Returns the number of plaintext bytes kept.
    ///
    /// # Errors
    ///
    /// [`VerifyError::SlotOutOfRange`] if `slot >= capacity()`.
    pub fn load_candidate(&mut self, slot: usize, plaintext: &[u8]) -> Result<usize, VerifyError> {
        self.store.set_candidate(slot, plaintext)
    }

    /// Plaintext stored in `slot`, as it will be verified.
    ///
    /// # Errors
    ///
    /// [`VerifyError::SlotOutOfRange`] if `slot >= capacity()`.
    pub fn candidate(&self, slot: usize) -> Result<&[u8], VerifyError> {
        self.store.get_candidate(slot)
    }

    /// Wipe all candidate and digest slots.
    pub fn clear_candidates(&mut self) {
        self.store.clear_all();
    }

    /// Digest derived for `slot` by the last pass.
    ///
    /// # Errors
    ///
    /// [`VerifyError::SlotOutOfRange`] if `slot >= capacity()`.
    pub fn derived_digest(&self, slot: usize) -> Result<&DerivedDigest, VerifyError> {
        self.store.digest(slot)
    }

    /// Hash-table bucket of the digest in `slot` at `level` (0..=6).
    ///
    /// # Errors
    ///
    /// [`VerifyError::SlotOutOfRange`] if `slot >= capacity()`.
    pub fn slot_bucket(&self, slot: usize, level: usize) -> Result<Option<u32>, VerifyError> {
        Ok(self.store.digest(slot)?.bucket(level))
    }

    /// Derive every slot below [`len`](Self::len) and return the loaded slots that match
    /// the record, ascending.
    ///
    /// An empty result means no candidate matched; that is not an error.
    ///
    /// # Errors
    ///
    /// [`VerifyError::Crypto`] if the derivation primitive fails.
    pub fn run_batch(&mut self) -> Result<Vec<usize>, VerifyError> {
        let descriptor = self.record.descriptor();
        let target = self.record.target();

        {
            let (candidates, digests) = self.store.loaded_mut();
            trace!(count = candidates.len(), "batch pass");
            self.pool
                .derive_partitioned(self.backend.as_ref(), descriptor, candidates, digests)?;
        }

        let digests = self.store.loaded_digests();
        if !screen(target, digests) {
            return Ok(Vec::new());
        }

        let mut matched = Vec::new();
        for slot in screen_hits(target, digests) {
            if !self.store.is_loaded(slot) || !compare_binary(target, &digests[slot]) {
                continue;
            }
            debug!(slot, "screen hit");

            if confirm(self.store.get_candidate(slot)?, descriptor, target)? {
                matched.push(slot);
            } else {
                warn!(
                    slot,
                    "partial match: leading {BINARY_SIZE} bytes equal, full {}-byte digest differs",
                    target.len()
                );
            }
        }

        Ok(matched)
    }

    /// End the session and wipe every buffer.
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for VerifySession {
    fn drop(&mut self) {
        self.store.clear_all();
    }
}

impl std::fmt::Debug for VerifySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifySession")
            .field("record", &self.record)
            .field("capacity", &self.store.capacity())
            .field("loaded", &self.store.len())
            .field("backend", &self.backend.name())
            .field("pool", &self.pool)
            .finish()
    }
}
