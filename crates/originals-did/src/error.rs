//! Crate-local error type for `originals-did`.

use originals_core::OriginalsError;
use thiserror::Error;

/// Error parsing, constructing, or resolving a DID.
#[derive(Error, Debug)]
pub enum DidError {
    /// The DID string does not match the syntax in spec §6.
    #[error("invalid DID: {0}")]
    InvalidDid(String),

    /// The DID document is malformed (dangling relationship id, missing
    /// required field).
    #[error("invalid DID document: {0}")]
    InvalidDocument(String),

    /// The identifier does not resolve to any document.
    #[error("not found: {0}")]
    NotFound(String),

    /// The resolved document carries the deactivation marker.
    #[error("deactivated: {0}")]
    Deactivated(String),

    /// The backing resolver (webvh log source, ordinals gateway) is
    /// unreachable.
    #[error("unreachable: {0}")]
    Unreachable(String),

    /// No resolver is configured for the requested method.
    #[error("no resolver configured: {0}")]
    NoResolver(String),
}

impl From<DidError> for OriginalsError {
    fn from(err: DidError) -> Self {
        match err {
            DidError::InvalidDid(msg) => OriginalsError::InvalidDid(msg),
            DidError::InvalidDocument(msg) => OriginalsError::InvalidDocument(msg),
            DidError::NotFound(msg) | DidError::NoResolver(msg) => OriginalsError::NotFound(msg),
            DidError::Deactivated(msg) => OriginalsError::Deactivated(msg),
            DidError::Unreachable(msg) => OriginalsError::Unreachable(msg),
        }
    }
}
