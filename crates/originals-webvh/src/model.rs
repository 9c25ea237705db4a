//! # Update Log Data Model
//!
//! `Parameters` and `UpdateLogEntry` (spec §3). Grounded on the
//! `did:webvh` log entry shape (version id, version time, parameters,
//! state, proof) and its placeholder-then-hash SCID genesis technique.

use chrono::{DateTime, Utc};
use originals_core::{sha256_bytes, CanonicalBytes};
use originals_did::DidDocument;
use serde::{Deserialize, Serialize};

use crate::error::WebvhError;

/// The placeholder substituted for the real SCID while computing the
/// genesis entry's self-certifying hash.
pub const SCID_PLACEHOLDER: &str = "{SCID}";

/// The `did:webvh` specification version this log format implements.
pub const WEBVH_VERSION: &str = "1.0";

/// A Data Integrity proof signing one update-log entry. Structurally
/// identical to `originals_vc::Proof`; kept as a local type so this crate
/// does not need to depend on `originals-vc` for one struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogProof {
    #[serde(rename = "type")]
    pub type_: String,
    pub cryptosuite: String,
    pub created: DateTime<Utc>,
    pub verification_method: String,
    pub proof_purpose: String,
    pub proof_value: String,
}

/// Key-rotation and log-behavior parameters for one entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameters {
    pub method: String,
    pub scid: String,
    pub update_keys: Vec<String>,
    pub portable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_key_hashes: Option<Vec<String>>,
    pub deactivated: bool,
}

impl Parameters {
    pub fn genesis(update_keys: Vec<String>, portable: bool) -> Self {
        Self {
            method: format!("did:webvh:{WEBVH_VERSION}"),
            scid: SCID_PLACEHOLDER.to_string(),
            update_keys,
            portable,
            next_key_hashes: None,
            deactivated: false,
        }
    }
}

/// One entry in the append-only update log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLogEntry {
    pub version_id: String,
    pub version_time: DateTime<Utc>,
    pub parameters: Parameters,
    pub state: DidDocument,
    #[serde(skip_serializing_if = "Vec::is_empty", default = "Vec::new")]
    pub proof: Vec<LogProof>,
}

impl UpdateLogEntry {
    /// Canonicalize this entry with `proof` cleared, as required both for
    /// SCID genesis and for the `version_id` hash-chain recursion (spec §4.6).
    pub fn canonical_without_proof(&self) -> Result<CanonicalBytes, WebvhError> {
        let mut stripped = self.clone();
        stripped.proof = Vec::new();
        Ok(CanonicalBytes::new(&stripped)?)
    }

    /// SHA-256 digest (lowercase hex) of this entry with `proof` cleared,
    /// folding in `prev_hash` when one exists (spec §4.6: "a hash over the
    /// canonicalized previous entry concatenated with the current state and
    /// parameters"). The genesis entry has no predecessor, so it hashes
    /// alone (`prev_hash = None`); every entry after it must chain through
    /// its predecessor's hash, or a same-`parameters` substitution of an
    /// interior entry would still self-verify.
    pub fn chained_hash(&self, prev_hash: Option<&str>) -> Result<String, WebvhError> {
        let canonical = self.canonical_without_proof()?;
        let digest = match prev_hash {
            Some(prev) => {
                let mut preimage = prev.as_bytes().to_vec();
                preimage.extend_from_slice(canonical.as_bytes());
                sha256_bytes(&preimage)
            }
            None => sha256_bytes(canonical.as_bytes()),
        };
        Ok(hex::encode(digest))
    }

    /// Self-hash with no predecessor; used only for the genesis entry.
    pub fn hash(&self) -> Result<String, WebvhError> {
        self.chained_hash(None)
    }
}

/// Minimal local hex encoder, to avoid a dependency on the `hex` crate for
/// one call site; matches `ContentDigest::to_hex`'s encoding.
mod hex {
    pub fn encode(bytes: [u8; 32]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use originals_did::VerificationMethod;

    fn sample_entry() -> UpdateLogEntry {
        let vm = VerificationMethod::multikey("did:webvh:example.com:abc#key-1", "did:webvh:example.com:abc", "z6Mkabc");
        UpdateLogEntry {
            version_id: "1-deadbeef".to_string(),
            version_time: DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap().with_timezone(&Utc),
            parameters: Parameters::genesis(vec!["z6Mkabc".to_string()], false),
            state: DidDocument::new_with_single_key("did:webvh:example.com:abc", vm),
            proof: vec![],
        }
    }

    #[test]
    fn hash_is_stable_for_identical_entries() {
        let e1 = sample_entry();
        let e2 = sample_entry();
        assert_eq!(e1.hash().unwrap(), e2.hash().unwrap());
    }

    #[test]
    fn hash_ignores_proof_field() {
        let mut e = sample_entry();
        let without_proof_hash = e.hash().unwrap();
        e.proof.push(LogProof {
            type_: "DataIntegrityProof".to_string(),
            cryptosuite: "eddsa-rdfc-2022".to_string(),
            created: Utc::now(),
            verification_method: "did:webvh:example.com:abc#key-1".to_string(),
            proof_purpose: "assertionMethod".to_string(),
            proof_value: "zabc".to_string(),
        });
        assert_eq!(e.hash().unwrap(), without_proof_hash);
    }

    #[test]
    fn hash_changes_with_state() {
        let e1 = sample_entry();
        let mut e2 = sample_entry();
        e2.state.id = "did:webvh:example.com:xyz".to_string();
        assert_ne!(e1.hash().unwrap(), e2.hash().unwrap());
    }

    #[test]
    fn chained_hash_depends_on_prev_hash() {
        let e = sample_entry();
        let h1 = e.chained_hash(Some("aaaa")).unwrap();
        let h2 = e.chained_hash(Some("bbbb")).unwrap();
        assert_ne!(h1, h2, "identical entries chained to different predecessors must hash differently");
        assert_ne!(h1, e.hash().unwrap(), "a chained hash must differ from the no-predecessor self-hash");
    }
}
