//! Crate-local error type for `originals-vc`.

use originals_core::OriginalsError;
use thiserror::Error;

/// Error issuing or verifying a credential.
#[derive(Error, Debug)]
pub enum VcError {
    /// The credential's `subject` is missing a required field.
    #[error("invalid credential shape: {0}")]
    InvalidShape(String),

    /// The verification method could not be resolved to key material.
    #[error("unresolved verification method: {0}")]
    UnresolvedVerificationMethod(String),

    /// Canonicalization of the credential or proof options failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] originals_core::CanonicalizationError),

    /// Multikey decoding of the resolved verification material failed.
    #[error("key material error: {0}")]
    KeyMaterial(#[from] originals_crypto::CryptoError),
}

impl From<VcError> for OriginalsError {
    fn from(err: VcError) -> Self {
        match err {
            VcError::InvalidShape(msg) => OriginalsError::InvalidDocument(msg),
            VcError::UnresolvedVerificationMethod(msg) => OriginalsError::NotFound(msg),
            VcError::Canonicalization(e) => OriginalsError::Canonicalization(e),
            VcError::KeyMaterial(e) => e.into(),
        }
    }
}
