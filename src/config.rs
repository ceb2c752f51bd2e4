//! # Session Configuration
//!
//! Parallelism is configured explicitly per session: batch width, worker count and
//! derivation backend. Any tuning heuristic lives in the host.

use crate::consts::{DEFAULT_BATCH_SCALE, MAX_BATCH_WIDTH};
use crate::engine::BackendKind;
use crate::error::VerifyError;
use crate::utils::{available_workers, round_up_to_multiple};
use serde::{Deserialize, Serialize};

/// Sizing of one verification session.
///
/// Serializable so a host can keep it in its own config file:
///
/// ```
/// use pbkdf2_md5_rs::{BackendKind, SessionConfig};
///
/// let cfg: SessionConfig =
///     serde_json::from_str(r#"{ "max_batch_width": 64, "workers": 2, "backend": "scalar" }"#)
///         .unwrap();
/// assert_eq!(cfg.backend, BackendKind::Scalar);
/// assert_eq!(cfg.batch_width(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Slots per batch pass. `0` derives `2 × min_keys × 8 × workers`.
    /// Other values are rounded up to a multiple of the backend's chunk width.
    pub max_batch_width: usize,
    /// Worker threads per batch pass (≥ 1).
    pub workers: usize,
    /// Derivation backend.
    pub backend: BackendKind,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_batch_width: 0,
            workers: available_workers(),
            backend: BackendKind::default(),
        }
    }
}

impl SessionConfig {
    /// Check the configuration before any allocation happens.
    ///
    /// # Errors
    ///
    /// [`VerifyError::Config`] for zero workers or a width above [`MAX_BATCH_WIDTH`].
    pub fn validate(&self) -> Result<(), VerifyError> {
        if self.workers == 0 {
            return Err(VerifyError::Config("worker count must be ≥1".into()));
        }
        if self.batch_width() > MAX_BATCH_WIDTH {
            return Err(VerifyError::Config(format!(
                "batch width {} exceeds {MAX_BATCH_WIDTH}",
                self.batch_width()
            )));
        }
        Ok(())
    }

    /// Effective batch store capacity: ≥ 1 and a multiple of the backend chunk width.
    #[must_use]
    pub fn batch_width(&self) -> usize {
        let min_keys = self.backend.min_keys();
        if self.max_batch_width == 0 {
            min_keys
                .saturating_mul(2 * DEFAULT_BATCH_SCALE)
                .saturating_mul(self.workers.max(1))
        } else {
            round_up_to_multiple(self.max_batch_width, min_keys)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_width_scales_with_workers() {
        let cfg = SessionConfig {
            max_batch_width: 0,
            workers: 3,
            backend: BackendKind::Lanes,
        };
        assert_eq!(cfg.batch_width(), 4 * 2 * 8 * 3);

        let cfg = SessionConfig {
            backend: BackendKind::Scalar,
            ..cfg
        };
        assert_eq!(cfg.batch_width(), 2 * 8 * 3);
    }

    #[test]
    fn explicit_width_rounds_to_chunk() {
        let cfg = SessionConfig {
            max_batch_width: 5,
            workers: 1,
            backend: BackendKind::Lanes,
        };
        assert_eq!(cfg.batch_width(), 8);
    }

    #[test]
    fn validation() {
        let cfg = SessionConfig {
            workers: 0,
            ..SessionConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(VerifyError::Config(_))));

        let cfg = SessionConfig {
            max_batch_width: MAX_BATCH_WIDTH + 1,
            workers: 1,
            backend: BackendKind::Scalar,
        };
        assert!(cfg.validate().is_err());
        assert!(SessionConfig::default().validate().is_ok());
    }
}
