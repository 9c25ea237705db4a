//! Crate-local error type for `originals-webvh`.

use originals_core::OriginalsError;
use thiserror::Error;

/// Error building, appending to, or verifying an update log.
#[derive(Error, Debug)]
pub enum WebvhError {
    /// Canonicalization of an entry failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] originals_core::CanonicalizationError),

    /// The log, or an entry within it, fails chain verification.
    #[error("log integrity error: {0}")]
    Integrity(String),

    /// A concurrent append lost the race for this DID's log.
    #[error("log conflict: {0}")]
    LogConflict(String),

    /// Update key is not authorized to sign the next entry.
    #[error("unauthorized signer: {0}")]
    UnauthorizedSigner(String),

    /// File-system I/O error reading or writing the log.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Key material error.
    #[error("key material error: {0}")]
    KeyMaterial(#[from] originals_crypto::CryptoError),

    /// DID document error.
    #[error("document error: {0}")]
    Document(#[from] originals_did::DidError),
}

impl From<WebvhError> for OriginalsError {
    fn from(err: WebvhError) -> Self {
        match err {
            WebvhError::Canonicalization(e) => OriginalsError::Canonicalization(e),
            WebvhError::Integrity(msg) => OriginalsError::Integrity(msg),
            WebvhError::LogConflict(msg) => OriginalsError::LogConflict(msg),
            WebvhError::UnauthorizedSigner(msg) => OriginalsError::Security(msg),
            WebvhError::Io(e) => OriginalsError::Io(e),
            WebvhError::KeyMaterial(e) => e.into(),
            WebvhError::Document(e) => e.into(),
        }
    }
}
