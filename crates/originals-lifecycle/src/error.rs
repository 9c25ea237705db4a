//! Crate-local error type for `originals-lifecycle`.

use originals_core::OriginalsError;
use originals_did::DidError;
use originals_ordinals::OrdinalsError;
use originals_vc::VcError;
use thiserror::Error;

/// Error coordinating an `Original`'s stage transitions.
#[derive(Error, Debug)]
pub enum LifecycleError {
    /// The requested transition is not valid from the original's current stage.
    #[error("invalid transition: {0}")]
    InvalidTransition(String),

    /// `Original.provenance_log`'s monotonicity or hash-chaining invariant
    /// would be violated by the credential being appended.
    #[error("provenance log invariant violated: {0}")]
    ProvenanceInvariant(String),

    /// Credential issuance or verification failed.
    #[error(transparent)]
    Credential(#[from] VcError),

    /// The update-log write or read failed.
    #[error(transparent)]
    Did(#[from] DidError),

    /// The webvh update log failed.
    #[error("webvh log error: {0}")]
    Webvh(String),

    /// UTXO selection, envelope construction, or gateway access failed.
    #[error(transparent)]
    Ordinals(#[from] OrdinalsError),

    /// The reveal transaction was never confirmed within the polling budget.
    /// The commit transaction, if any, remains valid; retry with
    /// `LifecycleEngine::resume_inscription`.
    #[error("confirmation pending for commit {commit_txid}: {reason}")]
    ConfirmationPending { commit_txid: String, reason: String },
}

impl From<LifecycleError> for OriginalsError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::InvalidTransition(msg) => OriginalsError::InvalidTransition(msg),
            LifecycleError::ProvenanceInvariant(msg) => OriginalsError::Integrity(msg),
            LifecycleError::Credential(e) => e.into(),
            LifecycleError::Did(e) => e.into(),
            LifecycleError::Webvh(msg) => OriginalsError::LogConflict(msg),
            LifecycleError::Ordinals(e) => e.into(),
            LifecycleError::ConfirmationPending { commit_txid, reason } => {
                OriginalsError::Timeout(format!("commit {commit_txid}: {reason}"))
            }
        }
    }
}
