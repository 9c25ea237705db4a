//! # originals-ordinals — UTXO Selection, Inscription Envelopes, Indexer Gateway
//!
//! Implements the Bitcoin-ordinals layer (spec §4.7–§4.10): coin selection
//! under dust/fee/lock/inscription-safety constraints, commit/reveal
//! envelope construction over the `bitcoin` crate's Taproot support, and
//! the gateway trait an indexer or node adapter implements. [`GatewayBtcoResolver`]
//! implements `originals_did::BtcoResolver`, closing the dependency-inversion
//! loop so a `DidResolver` configured with one resolves `did:btco` identifiers
//! end to end.

pub mod builder;
pub mod error;
pub mod fee;
pub mod gateway;
pub mod inscription;
pub mod utxo;

pub use builder::BitcoinBuilder;
pub use error::OrdinalsError;
pub use fee::{estimate_fee_or_fallback, FeeOracle};
pub use gateway::{
    assert_sat_uncontested, await_confirmation, retry_gateway_call, GatewayBtcoResolver, OrdinalsGateway, SatInfo,
    TransactionStatus, DEFAULT_ATTEMPT_TIMEOUT, DEFAULT_MAX_ATTEMPTS,
};
pub use inscription::{
    build_envelope_script, canonicalize_metadata_cbor, estimate_vsize, prepare_inscription, plan_reveal,
    PreparedInscription, RevealPlan, BASE_VSIZE, LEAF_VERSION, MAX_PUSH_CHUNK, PER_INPUT_VSIZE, TAG_CONTENT_TYPE,
    TAG_METADATA,
};
pub use utxo::{select_utxos, SelectionRequest, SelectionResult, Utxo, DUST_LIMIT};
