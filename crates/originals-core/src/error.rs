//! # Error Types — Structured Error Hierarchy
//!
//! Defines [`OriginalsError`], the root error type every public fallible
//! operation in the workspace ultimately returns, and the leaf error types
//! owned by this crate ([`CanonicalizationError`]). Per-crate errors
//! (`originals_crypto::CryptoError`, `originals_did::DidError`, ...) convert
//! into `OriginalsError` via `#[from]` at the workspace boundary.
//!
//! ## Design
//!
//! Every surfaced error carries a stable machine-readable `code`, a
//! human-readable `message`, an optional `suggestion`, and a `recoverable`
//! flag: network/chain transients are `recoverable = true` (a caller-
//! initiated retry may succeed without new input); policy, crypto, and state
//! errors are `recoverable = false`.

use thiserror::Error;

/// Root error type for the Originals SDK.
#[derive(Error, Debug)]
pub enum OriginalsError {
    /// Canonicalization failed.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Content integrity violation (digest mismatch, malformed hex).
    #[error("integrity error: {0}")]
    Integrity(String),

    /// Identifier (DID) does not resolve.
    #[error("not found: {0}")]
    NotFound(String),

    /// Identifier or update log has been deactivated.
    #[error("deactivated: {0}")]
    Deactivated(String),

    /// Malformed DID string.
    #[error("invalid DID: {0}")]
    InvalidDid(String),

    /// Malformed DID document.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// UTXO selection could not satisfy the requested output set.
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),

    /// A selected or constructed output falls below the dust threshold.
    #[error("dust output: {0}")]
    DustOutput(String),

    /// Requested fee rate is below the configured minimum.
    #[error("fee too low: {0}")]
    TooLowFee(String),

    /// Two in-flight operations contend for the same UTXO lock.
    #[error("conflicting locks: {0}")]
    ConflictingLocks(String),

    /// The satoshi targeted for inscription changed ownership before reveal.
    #[error("satoshi contested: {0}")]
    SatContested(String),

    /// Concurrent update-log append lost the race.
    #[error("log conflict: {0}")]
    LogConflict(String),

    /// Underlying chain/network endpoint is unreachable.
    #[error("unreachable: {0}")]
    Unreachable(String),

    /// An operation exceeded its deadline.
    #[error("timeout: {0}")]
    Timeout(String),

    /// Security policy violation (proof/signature verification, scope mismatch).
    #[error("security violation: {0}")]
    Security(String),

    /// State machine transition rejected.
    #[error("invalid state transition: {0}")]
    InvalidTransition(String),

    /// Serialization/deserialization error outside the canonicalization path.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO error (update log file access, key material loading).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A caller-supplied cancellation signal fired before the operation
    /// completed.
    #[error("cancelled: {0}")]
    Cancelled(String),
}

impl OriginalsError {
    /// The stable machine-readable error code from `spec.md §6`.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Canonicalization(_) => "CANONICALIZATION_FAILED",
            Self::Integrity(_) => "INTEGRITY_VIOLATION",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Deactivated(_) => "DEACTIVATED",
            Self::InvalidDid(_) => "INVALID_DID",
            Self::InvalidDocument(_) => "INVALID_DOCUMENT",
            Self::InsufficientFunds(_) => "INSUFFICIENT_FUNDS",
            Self::DustOutput(_) => "DUST_OUTPUT",
            Self::TooLowFee(_) => "TOO_LOW_FEE",
            Self::ConflictingLocks(_) => "CONFLICTING_LOCKS",
            Self::SatContested(_) => "SAT_CONTESTED",
            Self::LogConflict(_) => "LOG_CONFLICT",
            Self::Unreachable(_) => "UNREACHABLE",
            Self::Timeout(_) => "TIMEOUT",
            Self::Security(_) => "SECURITY_VIOLATION",
            Self::InvalidTransition(_) => "INVALID_TRANSITION",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Cancelled(_) => "CANCELLED",
        }
    }

    /// Whether a caller-initiated retry may succeed without new input.
    ///
    /// Only network/chain transients are recoverable; policy, crypto, and
    /// state errors are fatal for the operation that raised them.
    pub fn recoverable(&self) -> bool {
        matches!(self, Self::Unreachable(_) | Self::Timeout(_) | Self::LogConflict(_))
    }

    /// A human-readable suggestion for resolving the error, where one exists.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::Unreachable(_) => Some("retry after checking network connectivity"),
            Self::Timeout(_) => Some("retry with a longer deadline or check endpoint health"),
            Self::LogConflict(_) => Some("re-resolve the current log tip and retry the append"),
            Self::InsufficientFunds(_) => Some("fund the wallet or lower the target amount"),
            Self::DustOutput(_) => Some("increase the output amount above the dust threshold"),
            Self::TooLowFee(_) => Some("raise the fee rate to the configured minimum"),
            Self::SatContested(_) => Some("re-query satoshi ownership and restart the inscription"),
            _ => None,
        }
    }
}

/// Error during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values are not permitted in canonical representations.
    /// Amounts and other numeric fields must be strings or integers.
    #[error("float values are not permitted in canonical representations; use string or integer: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_matches_stable_string() {
        let err = OriginalsError::NotFound("did:peer:abc".into());
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn network_errors_are_recoverable() {
        assert!(OriginalsError::Unreachable("rpc down".into()).recoverable());
        assert!(OriginalsError::Timeout("broadcast".into()).recoverable());
        assert!(OriginalsError::LogConflict("race".into()).recoverable());
    }

    #[test]
    fn policy_and_crypto_errors_are_not_recoverable() {
        assert!(!OriginalsError::Security("bad proof".into()).recoverable());
        assert!(!OriginalsError::InvalidDid("garbage".into()).recoverable());
        assert!(!OriginalsError::InsufficientFunds("need 5000 sats".into()).recoverable());
    }

    #[test]
    fn suggestion_present_for_policy_errors() {
        let err = OriginalsError::DustOutput("546 < threshold".into());
        assert!(err.suggestion().is_some());
    }

    #[test]
    fn suggestion_absent_by_default() {
        let err = OriginalsError::Integrity("digest mismatch".into());
        assert!(err.suggestion().is_none());
    }

    #[test]
    fn cancelled_is_not_automatically_recoverable() {
        let err = OriginalsError::Cancelled("caller gave up".into());
        assert_eq!(err.code(), "CANCELLED");
        assert!(!err.recoverable());
    }

    #[test]
    fn canonicalization_error_converts_via_from() {
        let float_err = CanonicalizationError::FloatRejected(3.15);
        let wrapped: OriginalsError = float_err.into();
        assert_eq!(wrapped.code(), "CANONICALIZATION_FAILED");
    }
}
