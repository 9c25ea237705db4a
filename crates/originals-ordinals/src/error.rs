//! Crate-local error type for `originals-ordinals`.

use originals_core::OriginalsError;
use thiserror::Error;

/// Error selecting UTXOs, building an inscription, or talking to an
/// ordinals indexer.
#[derive(Error, Debug)]
pub enum OrdinalsError {
    /// `fee_rate_sats_per_vb <= 0`.
    #[error("fee rate too low: {0}")]
    TooLowFee(String),

    /// A requested output or change amount falls below the dust limit.
    #[error("dust output: {0}")]
    DustOutput(String),

    /// No combination of available UTXOs covers the target plus fee.
    #[error("insufficient funds: {0}")]
    InsufficientFunds(String),

    /// The only UTXO set large enough to cover the target is locked.
    #[error("conflicting locks: {0}")]
    ConflictingLocks(String),

    /// A re-query of the target satoshi before reveal broadcast found
    /// inscriptions that were not present at preparation time.
    #[error("satoshi contested: {0}")]
    SatContested(String),

    /// Envelope or transaction construction produced an invalid script.
    #[error("invalid inscription: {0}")]
    InvalidInscription(String),

    /// The ordinals gateway could not be reached within its retry budget.
    #[error("ordinals gateway unreachable: {0}")]
    Unreachable(String),

    /// A gateway call exceeded its per-attempt timeout.
    #[error("ordinals gateway timeout: {0}")]
    Timeout(String),

    /// The requested resource does not exist at the gateway.
    #[error("not found: {0}")]
    NotFound(String),

    /// A Bitcoin Taproot/script construction error from the `bitcoin` crate.
    #[error("bitcoin error: {0}")]
    Bitcoin(String),

    /// A caller-supplied cancellation signal fired while polling for
    /// confirmation.
    #[error("cancelled: {0}")]
    Cancelled(String),
}

impl From<OrdinalsError> for OriginalsError {
    fn from(err: OrdinalsError) -> Self {
        match err {
            OrdinalsError::TooLowFee(msg) => OriginalsError::TooLowFee(msg),
            OrdinalsError::DustOutput(msg) => OriginalsError::DustOutput(msg),
            OrdinalsError::InsufficientFunds(msg) => OriginalsError::InsufficientFunds(msg),
            OrdinalsError::ConflictingLocks(msg) => OriginalsError::ConflictingLocks(msg),
            OrdinalsError::SatContested(msg) => OriginalsError::SatContested(msg),
            OrdinalsError::InvalidInscription(msg) => OriginalsError::InvalidDocument(msg),
            OrdinalsError::Unreachable(msg) => OriginalsError::Unreachable(msg),
            OrdinalsError::Timeout(msg) => OriginalsError::Timeout(msg),
            OrdinalsError::NotFound(msg) => OriginalsError::NotFound(msg),
            OrdinalsError::Bitcoin(msg) => OriginalsError::InvalidDocument(msg),
            OrdinalsError::Cancelled(msg) => OriginalsError::Cancelled(msg),
        }
    }
}
