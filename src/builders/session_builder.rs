//! src/builders/session_builder.rs
//! Verification session builder

use crate::codec::{parse_record, CredentialRecord};
use crate::config::SessionConfig;
use crate::engine::BackendKind;
use crate::error::VerifyError;
use crate::session::VerifySession;

/// Builder for [`VerifySession`].
///
/// Defaults: derived batch width, one worker per available CPU, the default
/// [`BackendKind`].
///
/// # Example
///
/// ```
/// use pbkdf2_md5_rs::{BackendKind, SessionBuilder};
///
/// let mut session = SessionBuilder::new()
///     .with_workers(2)
///     .with_max_batch_width(16)
///     .with_backend(BackendKind::Lanes)
///     .build_from_str(
///         "$pbkdf2-hmac-md5$1000$6578616d706c6573616c74$a2370305230da383868c1e1b9ee86012",
///     )?;
///
/// session.load_candidate(0, b"letmein")?;
/// session.load_candidate(1, b"password")?;
/// assert_eq!(session.run_batch()?, vec![1]);
/// # Ok::<(), pbkdf2_md5_rs::VerifyError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    config: SessionConfig,
}

impl SessionBuilder {
    /// Builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    #[must_use]
    pub const fn from_config(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Slots per batch pass (`0` = derived from workers and backend).
    #[must_use]
    pub const fn with_max_batch_width(mut self, width: usize) -> Self {
        self.config.max_batch_width = width;
        self
    }

    /// Worker threads per batch pass.
    #[must_use]
    pub const fn with_workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    /// Derivation backend.
    #[must_use]
    pub const fn with_backend(mut self, backend: BackendKind) -> Self {
        self.config.backend = backend;
        self
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Allocate a session for an already parsed record.
    ///
    /// # Errors
    ///
    /// See [`VerifySession::new`].
    pub fn build(self, record: CredentialRecord) -> Result<VerifySession, VerifyError> {
        VerifySession::new(record, &self.config)
    }

    /// Parse `record` and allocate a session for it.
    ///
    /// # Errors
    ///
    /// [`VerifyError::Record`] for a malformed record, otherwise see [`VerifySession::new`].
    pub fn build_from_str(self, record: &str) -> Result<VerifySession, VerifyError> {
        self.build(parse_record(record)?)
    }
}
