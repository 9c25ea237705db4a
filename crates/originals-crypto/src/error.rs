//! Crate-local error type for `originals-crypto`, convertible into
//! [`originals_core::OriginalsError`] at the workspace boundary.

use originals_core::OriginalsError;
use thiserror::Error;

/// Error in cryptographic operations: multikey codec, signing, verification.
#[derive(Error, Debug)]
pub enum CryptoError {
    /// Signature verification failed.
    #[error("signature verification failed: {0}")]
    VerificationFailed(String),

    /// Key generation, parsing, or length mismatch.
    #[error("key error: {0}")]
    KeyError(String),

    /// Multikey decoding failed: bad base58, unrecognized header, wrong length.
    #[error("multikey decode error: {0}")]
    MultikeyDecode(String),

    /// Requested cryptosuite is not supported.
    #[error("unsupported suite: {0}")]
    UnsupportedSuite(String),
}

impl From<CryptoError> for OriginalsError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::VerificationFailed(msg) => OriginalsError::Security(msg),
            CryptoError::KeyError(msg) => OriginalsError::Integrity(msg),
            CryptoError::MultikeyDecode(msg) => OriginalsError::InvalidDocument(msg),
            CryptoError::UnsupportedSuite(msg) => OriginalsError::Security(msg),
        }
    }
}
