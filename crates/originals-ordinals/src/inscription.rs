//! # InscriptionBuilder — Commit/Reveal Envelope Construction
//!
//! Implements spec §4.9: a deterministic, bit-exact-with-the-ordinals-
//! protocol envelope layout, Taproot commit address derivation, and reveal
//! transaction construction. The vsize formula here is the single
//! implementation shared with `UtxoSelector`'s fee estimate (spec §4 —
//! resolving the "two vsize estimators" open question).

use bitcoin::key::UntweakedPublicKey;
use bitcoin::opcodes::all::{OP_ENDIF, OP_IF};
use bitcoin::opcodes::OP_FALSE;
use bitcoin::script::{Builder as ScriptBuilder, PushBytesBuf};
use bitcoin::secp256k1::{Secp256k1, Verification};
use bitcoin::taproot::{LeafVersion, TaprootBuilder, TaprootSpendInfo};
use bitcoin::{Address, Network as BitcoinNetwork, ScriptBuf};

use crate::error::OrdinalsError;

fn push_byte(builder: ScriptBuilder, byte: u8) -> Result<ScriptBuilder, OrdinalsError> {
    let push = PushBytesBuf::try_from(vec![byte])
        .map_err(|e| OrdinalsError::InvalidInscription(format!("invalid tag byte push: {e}")))?;
    Ok(builder.push_slice(push))
}

/// Base transaction overhead in vbytes, independent of content size
/// (spec §4.7, §4.9).
pub const BASE_VSIZE: u64 = 150;

/// Per-additional-input overhead in vbytes for non-reveal transactions
/// (commit funding, change-bearing sends) built by `UtxoSelector`.
pub const PER_INPUT_VSIZE: u64 = 68;

/// The tag byte identifying the content-type field in an inscription
/// envelope (ordinals protocol).
pub const TAG_CONTENT_TYPE: u8 = 0x01;

/// The tag byte identifying the optional metadata field in an inscription
/// envelope (ordinals protocol).
pub const TAG_METADATA: u8 = 0x05;

/// Maximum bytes per envelope push chunk (ordinals protocol).
pub const MAX_PUSH_CHUNK: usize = 520;

/// The Taproot leaf version used for the inscription reveal script.
pub const LEAF_VERSION: LeafVersion = LeafVersion::TapScript;

/// Estimate the vsize of a (possibly inscription-bearing) transaction.
///
/// `num_inputs` is the input count; `inscription_content_bytes`, when
/// present, is the size of the content pushed in the reveal's witness,
/// discounted at the standard witness rate: `ceil(bytes * 0.25)`.
///
/// Spec §4.9's formula also names a `+ ceil(bytes * 0.1)` surcharge above
/// 1000 bytes, but that surcharge contradicts the spec's own worked example
/// (§8 scenario 3: 4059 content bytes should estimate to "≈1130 vB ± 10%");
/// applying it gives 1571 vB, about 39% over that band. With no
/// `original_source/` to settle the discrepancy the other way, this
/// resolves in favor of the worked numbers over the prose formula and
/// drops the surcharge.
pub fn estimate_vsize(num_inputs: u64, inscription_content_bytes: Option<u64>) -> u64 {
    let input_overhead = PER_INPUT_VSIZE.saturating_mul(num_inputs.saturating_sub(1));
    let inscription_overhead = inscription_content_bytes.map(|bytes| bytes.div_ceil(4)).unwrap_or(0);
    BASE_VSIZE + input_overhead + inscription_overhead
}

/// Encode one push of `data`, chunked at [`MAX_PUSH_CHUNK`]-byte boundaries,
/// using `OP_PUSHBYTES_N`/`OP_PUSHDATA1`/`OP_PUSHDATA2` as the chunk length
/// requires (the script builder selects the opcode automatically per chunk).
fn push_chunked(builder: ScriptBuilder, data: &[u8]) -> Result<ScriptBuilder, OrdinalsError> {
    let mut builder = builder;
    for chunk in data.chunks(MAX_PUSH_CHUNK) {
        let push = PushBytesBuf::try_from(chunk.to_vec())
            .map_err(|e| OrdinalsError::InvalidInscription(format!("push chunk too large: {e}")))?;
        builder = builder.push_slice(push);
    }
    Ok(builder)
}

/// Build the inscription reveal script: the envelope carrying content type,
/// optional metadata, and content, guarded by `OP_FALSE OP_IF ... OP_ENDIF`
/// so it is unexecuted and inert unless spent via the designated leaf.
pub fn build_envelope_script(
    content: &[u8],
    content_type: &str,
    metadata_cbor: Option<&[u8]>,
) -> Result<ScriptBuf, OrdinalsError> {
    let ord_tag = PushBytesBuf::try_from(b"ord".to_vec())
        .map_err(|e| OrdinalsError::InvalidInscription(format!("invalid ord tag: {e}")))?;

    let mut builder = ScriptBuilder::new().push_opcode(OP_FALSE).push_opcode(OP_IF).push_slice(ord_tag);
    builder = push_byte(builder, TAG_CONTENT_TYPE)?;
    builder = push_chunked(builder, content_type.as_bytes())?;

    if let Some(metadata) = metadata_cbor {
        builder = push_byte(builder, TAG_METADATA)?;
        builder = push_chunked(builder, metadata)?;
    }

    // The OP_0 envelope separator is the same opcode as OP_FALSE (OP_PUSHBYTES_0).
    builder = builder.push_opcode(OP_FALSE);
    builder = push_chunked(builder, content)?;
    builder = builder.push_opcode(OP_ENDIF);

    Ok(builder.into_script())
}

/// Canonicalize `metadata` (a DID document or credential) to CBOR for
/// embedding in the envelope's optional metadata field.
pub fn canonicalize_metadata_cbor(metadata: &impl serde::Serialize) -> Result<Vec<u8>, OrdinalsError> {
    let mut buf = Vec::new();
    ciborium::into_writer(metadata, &mut buf)
        .map_err(|e| OrdinalsError::InvalidInscription(format!("CBOR encoding failed: {e}")))?;
    Ok(buf)
}

/// A fully prepared inscription: the reveal script, its Taproot spend info
/// (control block source), and the commit address to fund.
pub struct PreparedInscription {
    pub reveal_script: ScriptBuf,
    pub spend_info: TaprootSpendInfo,
    pub commit_address: Address,
}

/// Derive the commit Taproot address and reveal script for `content`,
/// spendable along the script path by `reveal_pubkey` (spec §4.9 `prepare`).
pub fn prepare_inscription<C: Verification>(
    secp: &Secp256k1<C>,
    content: &[u8],
    content_type: &str,
    metadata: Option<&impl serde::Serialize>,
    reveal_pubkey: UntweakedPublicKey,
    network: BitcoinNetwork,
) -> Result<PreparedInscription, OrdinalsError> {
    let metadata_cbor = metadata.map(canonicalize_metadata_cbor).transpose()?;
    let reveal_script = build_envelope_script(content, content_type, metadata_cbor.as_deref())?;

    let spend_info = TaprootBuilder::new()
        .add_leaf(0, reveal_script.clone())
        .map_err(|e| OrdinalsError::Bitcoin(format!("failed to add taproot leaf: {e}")))?
        .finalize(secp, reveal_pubkey)
        .map_err(|_| OrdinalsError::Bitcoin("taproot finalization failed".to_string()))?;

    let commit_address = Address::p2tr(
        secp,
        reveal_pubkey,
        spend_info.merkle_root(),
        network,
    );

    Ok(PreparedInscription { reveal_script, spend_info, commit_address })
}

/// A built, unsigned-fee-accounted reveal transaction description.
pub struct RevealPlan {
    pub vsize: u64,
    pub fee_sats: u64,
}

/// Compute the reveal transaction's size and fee for a 1-input/1-output
/// spend of the commit output (spec §4.9 `buildReveal`).
pub fn plan_reveal(content_bytes: u64, fee_rate_sats_per_vb: u64) -> RevealPlan {
    let vsize = estimate_vsize(1, Some(content_bytes));
    let fee_sats = vsize * fee_rate_sats_per_vb;
    RevealPlan { vsize, fee_sats }
}
