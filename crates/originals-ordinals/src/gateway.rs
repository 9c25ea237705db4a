//! # OrdinalsGateway — Indexer/Node Access and Retry Policy
//!
//! Implements spec §4.10: the six operations an ordinals indexer or node
//! must expose, wrapped in a retry-with-backoff policy (grounded on the
//! teacher's `mez-mass-client` retry helper), plus the `did:btco` resolver
//! that closes the dependency-inversion loop with `originals-did`.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use originals_did::{DidError, DidResolutionResult};
use serde::{Deserialize, Serialize};

use crate::error::OrdinalsError;

/// Default maximum attempts for a gateway call (spec §4.10).
pub const DEFAULT_MAX_ATTEMPTS: u32 = 2;

/// Default per-attempt timeout for a gateway call (spec §4.10).
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(30);

const BASE_DELAY_MS: u64 = 200;

/// What's currently inscribed on a satoshi, in reveal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SatInfo {
    pub sat: u64,
    /// Inscription ids on this satoshi, oldest first.
    pub inscription_ids: Vec<String>,
}

/// The confirmation state of a broadcast transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStatus {
    pub txid: String,
    pub confirmations: u32,
    pub confirmed: bool,
}

/// Access to an ordinals indexer or Bitcoin node. Implementations typically
/// wrap an HTTP client against a specific indexer's API.
#[async_trait]
pub trait OrdinalsGateway: Send + Sync {
    /// List the inscriptions currently on `sat`, oldest first.
    async fn get_sat_info(&self, network: originals_did::Network, sat: u64) -> Result<SatInfo, OrdinalsError>;

    /// Resolve a single inscription id to the document it carries.
    async fn resolve_inscription(
        &self,
        network: originals_did::Network,
        inscription_id: &str,
    ) -> Result<DidResolutionResult, OrdinalsError>;

    /// Fetch the raw content bytes of an inscription's metadata field.
    async fn get_metadata(&self, network: originals_did::Network, inscription_id: &str) -> Result<Vec<u8>, OrdinalsError>;

    /// Broadcast a raw transaction, returning its txid.
    async fn broadcast_transaction(&self, network: originals_did::Network, raw_tx: &[u8]) -> Result<String, OrdinalsError>;

    /// Query confirmation status for a previously broadcast transaction.
    async fn get_transaction_status(
        &self,
        network: originals_did::Network,
        txid: &str,
    ) -> Result<TransactionStatus, OrdinalsError>;

    /// Estimate sat/vB for confirmation within `blocks` blocks.
    async fn estimate_fee(&self, network: originals_did::Network, blocks: u32) -> Result<u64, OrdinalsError>;
}

/// Retry `op` up to `max_attempts` times with exponential backoff, doubling
/// `BASE_DELAY_MS` on each retry. `NotFound` is never retried — an absent
/// resource won't appear on a later attempt.
pub async fn retry_gateway_call<F, Fut, T>(
    operation_name: &str,
    max_attempts: u32,
    mut op: F,
) -> Result<T, OrdinalsError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, OrdinalsError>>,
{
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        match tokio::time::timeout(DEFAULT_ATTEMPT_TIMEOUT, op()).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(OrdinalsError::NotFound(msg))) => return Err(OrdinalsError::NotFound(msg)),
            Ok(Err(err)) if attempt >= max_attempts => return Err(err),
            Ok(Err(err)) => {
                let delay_ms = BASE_DELAY_MS * 2u64.pow(attempt - 1);
                tracing::warn!(
                    operation = operation_name,
                    attempt,
                    max_attempts,
                    error = %err,
                    "gateway call failed, retrying"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            Err(_) if attempt >= max_attempts => {
                return Err(OrdinalsError::Timeout(format!(
                    "{operation_name} timed out after {attempt} attempt(s)"
                )));
            }
            Err(_) => {
                tracing::warn!(operation = operation_name, attempt, max_attempts, "gateway call timed out, retrying");
            }
        }
    }
}

/// Poll `gateway` for `txid`'s confirmation, stopping as soon as
/// [`TransactionStatus::confirmed`] is true, `timeout` elapses, or `cancel`
/// fires. Idempotent and cancellable (spec §5): re-running it after a
/// cancellation or timeout just resumes polling, it never mutates state of
/// its own.
pub async fn await_confirmation(
    gateway: &dyn OrdinalsGateway,
    network: originals_did::Network,
    txid: &str,
    timeout: Duration,
    poll_interval: Duration,
    mut cancel: tokio::sync::oneshot::Receiver<()>,
) -> Result<TransactionStatus, OrdinalsError> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        tokio::select! {
            _ = &mut cancel => {
                return Err(OrdinalsError::Cancelled(format!("await_confirmation for {txid} cancelled")));
            }
            _ = tokio::time::sleep_until(deadline) => {
                return Err(OrdinalsError::Timeout(format!("{txid} not confirmed within {timeout:?}")));
            }
            status = gateway.get_transaction_status(network, txid) => {
                let status = status?;
                if status.confirmed {
                    return Ok(status);
                }
                tokio::select! {
                    _ = &mut cancel => {
                        return Err(OrdinalsError::Cancelled(format!("await_confirmation for {txid} cancelled")));
                    }
                    _ = tokio::time::sleep_until(deadline) => {
                        return Err(OrdinalsError::Timeout(format!("{txid} not confirmed within {timeout:?}")));
                    }
                    _ = tokio::time::sleep(poll_interval) => {}
                }
            }
        }
    }
}

/// Re-query the satoshi immediately before reveal broadcast; abort if any
/// inscription not present in `known_inscription_ids` has appeared (spec
/// §4.9's front-running safeguard).
pub async fn assert_sat_uncontested(
    gateway: &dyn OrdinalsGateway,
    network: originals_did::Network,
    sat: u64,
    known_inscription_ids: &[String],
) -> Result<(), OrdinalsError> {
    let current = retry_gateway_call("get_sat_info", DEFAULT_MAX_ATTEMPTS, || gateway.get_sat_info(network, sat)).await?;
    let new_ids: Vec<&String> =
        current.inscription_ids.iter().filter(|id| !known_inscription_ids.contains(id)).collect();
    if !new_ids.is_empty() {
        return Err(OrdinalsError::SatContested(format!(
            "satoshi {sat} gained {} inscription(s) since preparation: {:?}",
            new_ids.len(),
            new_ids
        )));
    }
    Ok(())
}

/// Resolves `did:btco` identifiers against an [`OrdinalsGateway`] — the
/// concrete `BtcoResolver` wired in by `originals-lifecycle`'s composition
/// root.
pub struct GatewayBtcoResolver<G: OrdinalsGateway> {
    gateway: G,
}

impl<G: OrdinalsGateway> GatewayBtcoResolver<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl<G: OrdinalsGateway> originals_did::BtcoResolver for GatewayBtcoResolver<G> {
    async fn resolve(&self, network: originals_did::Network, sat: u64) -> Result<DidResolutionResult, DidError> {
        let sat_info = retry_gateway_call("get_sat_info", DEFAULT_MAX_ATTEMPTS, || self.gateway.get_sat_info(network, sat))
            .await
            .map_err(ordinals_to_did_error)?;

        let latest_id = sat_info
            .inscription_ids
            .last()
            .ok_or_else(|| DidError::NotFound(format!("no inscriptions found on sat {sat}")))?;

        let mut result =
            retry_gateway_call("resolve_inscription", DEFAULT_MAX_ATTEMPTS, || self.gateway.resolve_inscription(network, latest_id))
                .await
                .map_err(ordinals_to_did_error)?;

        result.metadata.sat = Some(sat);
        result.metadata.network = Some(network);
        result.metadata.inscription_id = Some(latest_id.clone());
        result.metadata.total_inscriptions = Some(sat_info.inscription_ids.len() as u32);
        Ok(result)
    }
}

fn ordinals_to_did_error(err: OrdinalsError) -> DidError {
    match err {
        OrdinalsError::NotFound(msg) => DidError::NotFound(msg),
        OrdinalsError::Unreachable(msg) | OrdinalsError::Timeout(msg) => DidError::Unreachable(msg),
        other => DidError::InvalidDocument(other.to_string()),
    }
}
