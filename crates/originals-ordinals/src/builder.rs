//! # BitcoinBuilder — Transaction Construction and Signing Boundary
//!
//! Building and signing the commit/reveal transactions requires wallet key
//! material this SDK never holds (spec §1, §4.9's note that wallet signing
//! is "consumed through traits implemented by the embedding application").
//! [`BitcoinBuilder`] is that boundary: `originals-lifecycle` calls it with
//! the inputs `UtxoSelector`/`InscriptionBuilder` computed and receives back
//! raw, already-signed transaction bytes ready for
//! `OrdinalsGateway::broadcast_transaction`.

use async_trait::async_trait;
use bitcoin::Address;

use crate::error::OrdinalsError;
use crate::inscription::PreparedInscription;
use crate::utxo::Utxo;

/// Builds and signs the commit and reveal transactions of an inscription.
/// Implementations hold (or have access to) the wallet's private keys;
/// this SDK never does.
#[async_trait]
pub trait BitcoinBuilder: Send + Sync {
    /// Build and sign a transaction spending `inputs`, paying
    /// `commit_value_sats` to `commit_address` and `change_sats` back to a
    /// wallet-controlled change address (omitted entirely when zero).
    /// Returns the raw signed transaction bytes.
    async fn build_commit_transaction(
        &self,
        inputs: &[Utxo],
        commit_address: &Address,
        commit_value_sats: u64,
        change_sats: u64,
        fee_sats: u64,
    ) -> Result<Vec<u8>, OrdinalsError>;

    /// Build and sign the reveal transaction spending `commit_txid:commit_vout`
    /// along `prepared`'s script-path leaf, sending `reveal_value_sats` to
    /// `destination`. Returns the raw signed transaction bytes.
    async fn build_reveal_transaction(
        &self,
        commit_txid: &str,
        commit_vout: u32,
        prepared: &PreparedInscription,
        reveal_value_sats: u64,
        fee_sats: u64,
        destination: &Address,
    ) -> Result<Vec<u8>, OrdinalsError>;
}
