use kzg_sidecar_primitives::errors::KzgError;
use thiserror::Error;

use crate::sidecar::Slot;

/// Why a sidecar was rejected.
///
/// Mismatches and [`SidecarError::ProofInvalid`] are the ordinary outcome of
/// stale or adversarial input. Encoding and hashing failures mean the
/// upstream data is malformed; setup errors mean the verifier itself is
/// misconfigured.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SidecarError {
    #[error("invalid blob slot: expected {expected}, sidecar has {actual}")]
    SlotMismatch { expected: Slot, actual: Slot },

    #[error("invalid blob beacon block root")]
    RootMismatch,

    #[error("invalid blobs length: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    #[error("hashing failure: {0}")]
    HashingFailure(String),

    /// The pairing check failed.
    #[error("aggregated proof is invalid")]
    ProofInvalid,

    #[error("setup error: {0}")]
    Setup(String),

    /// Arithmetic guards that the preceding checks should make unreachable.
    #[error("internal error: {0}")]
    Internal(String),
}

impl SidecarError {
    /// True for rejections that are expected in normal operation.
    pub fn is_routine(&self) -> bool {
        matches!(
            self,
            SidecarError::SlotMismatch { .. }
                | SidecarError::RootMismatch
                | SidecarError::LengthMismatch { .. }
                | SidecarError::ProofInvalid
        )
    }
}

impl From<KzgError> for SidecarError {
    fn from(err: KzgError) -> Self {
        match err {
            KzgError::LengthMismatch { expected, actual } => {
                SidecarError::LengthMismatch { expected, actual }
            },
            KzgError::InvalidEncoding(msg) => SidecarError::InvalidEncoding(msg),
            KzgError::HashingFailure(msg) => SidecarError::HashingFailure(msg),
            KzgError::SetupError(msg) | KzgError::InvalidDomain(msg) => SidecarError::Setup(msg),
            KzgError::InvalidDenominator => {
                SidecarError::Internal("invalid denominator".to_string())
            },
            KzgError::MsmError(msg) => SidecarError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_mismatch_display() {
        let error = SidecarError::SlotMismatch {
            expected: Slot(10),
            actual: Slot(11),
        };
        assert_eq!(
            format!("{}", error),
            "invalid blob slot: expected 10, sidecar has 11"
        );
    }

    #[test]
    fn test_routine_classification() {
        assert!(SidecarError::ProofInvalid.is_routine());
        assert!(SidecarError::RootMismatch.is_routine());
        assert!(!SidecarError::InvalidEncoding("bad point".to_string()).is_routine());
        assert!(!SidecarError::HashingFailure("too many blobs".to_string()).is_routine());
    }

    #[test]
    fn test_from_kzg_error() {
        assert_eq!(
            SidecarError::from(KzgError::LengthMismatch {
                expected: 2,
                actual: 1
            }),
            SidecarError::LengthMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(
            SidecarError::from(KzgError::InvalidEncoding("flags".to_string())),
            SidecarError::InvalidEncoding("flags".to_string())
        );
        assert_eq!(
            SidecarError::from(KzgError::InvalidDenominator),
            SidecarError::Internal("invalid denominator".to_string())
        );
    }
}
