//! # Original — The Aggregate `LifecycleEngine` Exclusively Owns
//!
//! Implements spec §3's `Original{id, resources[], provenance_log[]}` and
//! its invariant: `provenance_log` is monotone by `issuance_time`, and each
//! non-genesis entry references the previous entry by hash.

use originals_core::{sha256_digest, CanonicalBytes, ContentDigest};
use originals_did::Identifier;
use originals_vc::Credential;
use serde::{Deserialize, Serialize};

use crate::error::LifecycleError;
use crate::resource::Resource;

/// The field name under which a non-genesis provenance credential's subject
/// carries the previous entry's hash.
pub const PREVIOUS_ENTRY_HASH_FIELD: &str = "previous_entry_hash";

/// The aggregate this SDK's `LifecycleEngine` exclusively owns (spec §3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Original {
    pub id: Identifier,
    pub resources: Vec<Resource>,
    pub provenance_log: Vec<Credential>,
}

impl Original {
    /// Construct a new original in its genesis (`did:peer`) stage, with an
    /// empty provenance log — the first transition appends the genesis
    /// entry.
    pub fn new(id: Identifier, resources: Vec<Resource>) -> Self {
        Self { id, resources, provenance_log: Vec::new() }
    }

    /// Hash of the last provenance entry, per spec §3's chaining rule —
    /// the digest every subsequent credential's subject must reference.
    pub fn last_entry_hash(&self) -> Result<Option<ContentDigest>, LifecycleError> {
        let Some(last) = self.provenance_log.last() else {
            return Ok(None);
        };
        Ok(Some(credential_hash(last)?))
    }

    /// Append `credential` to the provenance log, enforcing spec §3's
    /// invariant: monotone `issuance_time`, and — for every non-genesis
    /// entry — a `previous_entry_hash` subject field matching the hash of
    /// the entry it follows.
    pub fn append_credential(&mut self, credential: Credential) -> Result<(), LifecycleError> {
        if let Some(last) = self.provenance_log.last() {
            if credential.issuance_date < last.issuance_date {
                return Err(LifecycleError::ProvenanceInvariant(
                    "issuance_date must be monotonically non-decreasing".to_string(),
                ));
            }
            let expected = credential_hash(last)?.to_hex();
            let actual = credential
                .credential_subject
                .get(PREVIOUS_ENTRY_HASH_FIELD)
                .and_then(|v| v.as_str());
            if actual != Some(expected.as_str()) {
                return Err(LifecycleError::ProvenanceInvariant(format!(
                    "expected `{PREVIOUS_ENTRY_HASH_FIELD}` = {expected}, got {actual:?}"
                )));
            }
        }
        self.provenance_log.push(credential);
        Ok(())
    }

    /// The set of content hashes across all resources, used to verify that
    /// a transition preserved content identity (spec §4.11 cross-layer
    /// invariant).
    pub fn content_hash_set(&self) -> Vec<&ContentDigest> {
        self.resources.iter().map(|r| &r.content_hash).collect()
    }
}

fn credential_hash(credential: &Credential) -> Result<ContentDigest, LifecycleError> {
    let canonical = CanonicalBytes::new(&credential.without_proof())
        .map_err(|e| LifecycleError::ProvenanceInvariant(format!("failed to canonicalize credential: {e}")))?;
    Ok(sha256_digest(&canonical))
}
