//! # SCID Genesis
//!
//! Computes the self-certifying identifier for a new `did:webvh` log: build
//! the genesis entry with a placeholder SCID, hash it, substitute the hash
//! back in for the placeholder, then re-derive the first `version_id` from
//! the now-final entry. Grounded directly on the placeholder-then-hash
//! technique used to derive `did:webvh` SCIDs.

use originals_did::DidDocument;

use crate::error::WebvhError;
use crate::model::{Parameters, UpdateLogEntry, SCID_PLACEHOLDER};

/// The output of a successful genesis computation: the final SCID and the
/// first (unsigned) log entry, ready to be signed and appended.
pub struct Genesis {
    pub scid: String,
    pub entry: UpdateLogEntry,
}

/// Compute the genesis SCID and first log entry for a new log.
///
/// `state_builder` receives the placeholder-substituted DID (of the form
/// `did:webvh:<domain>(:<segment>)*:{SCID}`) and must return the document
/// for that identifier; this lets callers build a document whose `id` and
/// verification method controllers already carry the placeholder, exactly
/// as the real post-genesis document will carry the real SCID.
pub fn compute_genesis(
    version_time: chrono::DateTime<chrono::Utc>,
    update_keys: Vec<String>,
    portable: bool,
    state_builder: impl FnOnce(&str) -> DidDocument,
) -> Result<Genesis, WebvhError> {
    let placeholder_did = format!("did:webvh:placeholder:{SCID_PLACEHOLDER}");
    let placeholder_state = state_builder(&placeholder_did);

    let placeholder_entry = UpdateLogEntry {
        version_id: SCID_PLACEHOLDER.to_string(),
        version_time,
        parameters: Parameters::genesis(update_keys, portable),
        state: placeholder_state,
        proof: Vec::new(),
    };

    let scid = placeholder_entry.hash()?;

    let serialized = serde_json::to_string(&placeholder_entry).map_err(|e| {
        WebvhError::Integrity(format!("failed to serialize placeholder entry: {e}"))
    })?;
    let substituted = serialized.replace(SCID_PLACEHOLDER, &scid);
    let mut entry: UpdateLogEntry = serde_json::from_str(&substituted).map_err(|e| {
        WebvhError::Integrity(format!("failed to reparse substituted entry: {e}"))
    })?;

    let entry_hash = entry.hash()?;
    entry.version_id = format!("1-{entry_hash}");

    Ok(Genesis { scid, entry })
}
