//! # FeeOracle — Fee Rate Estimation
//!
//! Implements spec §4.8: a single sat/vB integer for a target confirmation
//! window. The SDK consumes whatever the implementation returns verbatim;
//! callers supply a fallback constant for when the oracle is unreachable.

use async_trait::async_trait;

use crate::error::OrdinalsError;

/// Estimates fee rates for a target confirmation window. Implementations
/// typically call an external indexer or node RPC.
#[async_trait]
pub trait FeeOracle: Send + Sync {
    /// Estimate sat/vB for confirmation within `blocks` blocks.
    async fn estimate_fee(&self, blocks: u32) -> Result<u64, OrdinalsError>;
}

/// Call `oracle`, falling back to `fallback_sats_per_vb` on any error —
/// the core never blocks an operation on fee-oracle availability.
pub async fn estimate_fee_or_fallback(oracle: &dyn FeeOracle, blocks: u32, fallback_sats_per_vb: u64) -> u64 {
    match oracle.estimate_fee(blocks).await {
        Ok(rate) => rate,
        Err(e) => {
            tracing::warn!(error = %e, blocks, fallback_sats_per_vb, "fee oracle unavailable, using fallback rate");
            fallback_sats_per_vb
        }
    }
}
