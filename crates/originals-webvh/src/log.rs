//! # WebVHLog — Append and Verify
//!
//! Implements spec §4.6: a hash-chained, append-only update log backing one
//! `did:webvh` identifier. Each entry's `version_id` recurses over the
//! canonicalized previous entry, so tampering with any entry invalidates
//! every entry after it. Concurrent appends to the same DID are serialized
//! with a per-DID mutex; the loser of a race is told to retry rather than
//! silently overwriting the winner's entry (spec §5).

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use originals_core::{sha256_bytes, CanonicalBytes};
use originals_crypto::multikey_decode;
use originals_did::{DidDocument, DidError, DidResolutionResult, ResolutionMetadata, WebvhResolver};
use tokio::sync::Mutex;
use tracing::instrument;

use crate::error::WebvhError;
use crate::file::{log_path, read_log, write_log};
use crate::model::UpdateLogEntry;
use crate::scid::compute_genesis;

/// Manages update logs for any number of `did:webvh` identifiers rooted
/// under one base directory on disk.
pub struct WebVHLog {
    base_dir: PathBuf,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl WebVHLog {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: base_dir.into(), locks: Mutex::new(HashMap::new()) }
    }

    async fn lock_for(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks.entry(key.to_string()).or_insert_with(|| Arc::new(Mutex::new(()))).clone()
    }

    /// Create a brand-new log: compute the genesis SCID, sign the first
    /// entry, and write it as the sole entry of a new `did.jsonl`.
    #[instrument(skip(self, secret_key_multibase, state_builder))]
    pub async fn create(
        &self,
        domain: &str,
        path_segments: Vec<String>,
        update_key_multibase: String,
        secret_key_multibase: &str,
        state_builder: impl FnOnce(&str) -> DidDocument,
    ) -> Result<UpdateLogEntry, WebvhError> {
        let genesis = compute_genesis(Utc::now(), vec![update_key_multibase.clone()], false, state_builder)?;
        let mut entry = genesis.entry;
        sign_entry(&mut entry, &update_key_multibase, secret_key_multibase)?;

        let path = log_path(&self.base_dir, domain, &path_segments);
        let lock_key = format!("{domain}:{}", path_segments.join(":"));
        let lock = self.lock_for(&lock_key).await;
        let _guard = lock.lock().await;

        if path.exists() {
            return Err(WebvhError::LogConflict(format!("log already exists for did:webvh:{domain}")));
        }
        write_log(&path, std::slice::from_ref(&entry)).await?;
        Ok(entry)
    }

    /// Append a new entry, built from `next_state`, to an existing log.
    /// Serialized per-DID; a concurrent loser gets [`WebvhError::LogConflict`].
    #[instrument(skip(self, secret_key_multibase, next_state))]
    pub async fn append(
        &self,
        domain: &str,
        path_segments: Vec<String>,
        next_state: DidDocument,
        signer_key_multibase: &str,
        secret_key_multibase: &str,
    ) -> Result<UpdateLogEntry, WebvhError> {
        let path = log_path(&self.base_dir, domain, &path_segments);
        let lock_key = format!("{domain}:{}", path_segments.join(":"));
        let lock = self.lock_for(&lock_key).await;
        let _guard = lock.lock().await;

        let mut entries = read_log(&path).await?;
        let previous = entries
            .last()
            .ok_or_else(|| WebvhError::Integrity("cannot append to an empty log".to_string()))?;

        if previous.parameters.deactivated {
            return Err(WebvhError::Integrity("cannot append to a deactivated log".to_string()));
        }
        if !previous.parameters.update_keys.iter().any(|k| k == signer_key_multibase) {
            return Err(WebvhError::UnauthorizedSigner(format!(
                "{signer_key_multibase} is not an authorized update key"
            )));
        }

        let (prev_n_str, prev_hash) = previous
            .version_id
            .split_once('-')
            .ok_or_else(|| WebvhError::Integrity(format!("malformed version_id: {}", previous.version_id)))?;
        let prev_hash = prev_hash.to_string();
        let prev_n: u64 = prev_n_str
            .parse()
            .map_err(|_| WebvhError::Integrity(format!("malformed version_id: {}", previous.version_id)))?;

        let mut entry = UpdateLogEntry {
            version_id: String::new(),
            version_time: Utc::now(),
            parameters: previous.parameters.clone(),
            state: next_state,
            proof: Vec::new(),
        };
        sign_entry(&mut entry, signer_key_multibase, secret_key_multibase)?;

        let entry_hash = entry.chained_hash(Some(&prev_hash))?;
        entry.version_id = format!("{}-{entry_hash}", prev_n + 1);

        entries.push(entry.clone());
        write_log(&path, &entries).await?;
        Ok(entry)
    }

    /// Recompute and verify the entire hash chain, the monotonic version
    /// numbering, and every entry's signature authority (spec §4.6, §8).
    #[instrument(skip(self))]
    pub async fn verify(&self, domain: &str, path_segments: &[String]) -> Result<Vec<UpdateLogEntry>, WebvhError> {
        let path = log_path(&self.base_dir, domain, path_segments);
        let entries = read_log(&path).await?;
        verify_chain(&entries)?;
        Ok(entries)
    }

    pub async fn read(&self, domain: &str, path_segments: &[String]) -> Result<Vec<UpdateLogEntry>, WebvhError> {
        read_log(&log_path(&self.base_dir, domain, path_segments)).await
    }
}

/// Sign `entry` with the given update key, attaching a single proof.
/// Mirrors `originals_vc::CredentialEngine::issue`'s digest discipline:
/// `sha256(canonical(proof_options) || canonical(entry-without-proof))`.
fn sign_entry(entry: &mut UpdateLogEntry, verification_method: &str, secret_key_multibase: &str) -> Result<(), WebvhError> {
    let decoded = multikey_decode(secret_key_multibase)?;
    if !decoded.is_secret {
        return Err(WebvhError::KeyMaterial(originals_crypto::CryptoError::KeyError(
            "expected a secret key for signing".to_string(),
        )));
    }
    let suite = decoded.suite;

    let proof_options = serde_json::json!({
        "type": "DataIntegrityProof",
        "cryptosuite": suite.cryptosuite_id(),
        "created": Utc::now().to_rfc3339(),
        "verificationMethod": verification_method,
        "proofPurpose": "assertionMethod",
    });
    let canonical_options = CanonicalBytes::from_value(proof_options.clone())?;
    let canonical_entry = entry.canonical_without_proof()?;
    let preimage = CanonicalBytes::concat(&canonical_options, &canonical_entry);
    let digest = sha256_bytes(&preimage);

    let signature = originals_crypto::sign(suite, &decoded.bytes, &digest)?;
    let proof_value = multibase::encode(multibase::Base::Base58Btc, signature);

    entry.proof.push(crate::model::LogProof {
        type_: "DataIntegrityProof".to_string(),
        cryptosuite: suite.cryptosuite_id().to_string(),
        created: proof_options["created"].as_str().and_then(|s| s.parse().ok()).unwrap_or_else(Utc::now),
        verification_method: verification_method.to_string(),
        proof_purpose: "assertionMethod".to_string(),
        proof_value,
    });
    Ok(())
}

fn verify_entry_proof(entry: &UpdateLogEntry, authorized_keys: &[String]) -> Result<(), WebvhError> {
    let proof = entry
        .proof
        .first()
        .ok_or_else(|| WebvhError::Integrity(format!("entry {} has no proof", entry.version_id)))?;

    let signer_key = authorized_keys
        .iter()
        .find(|k| k.as_str() == proof.verification_method || proof.verification_method.ends_with(k.as_str()))
        .ok_or_else(|| {
            WebvhError::UnauthorizedSigner(format!(
                "{} is not among the authorized update keys for this entry",
                proof.verification_method
            ))
        })?;

    let decoded = multikey_decode(signer_key)?;
    let suite = decoded.suite;
    if suite.cryptosuite_id() != proof.cryptosuite {
        return Err(WebvhError::Integrity(format!(
            "cryptosuite mismatch: key implies {}, proof declares {}",
            suite.cryptosuite_id(),
            proof.cryptosuite
        )));
    }

    let proof_options = serde_json::json!({
        "type": proof.type_,
        "cryptosuite": proof.cryptosuite,
        "created": proof.created.to_rfc3339(),
        "verificationMethod": proof.verification_method,
        "proofPurpose": proof.proof_purpose,
    });
    let canonical_options = CanonicalBytes::from_value(proof_options)?;
    let canonical_entry = entry.canonical_without_proof()?;
    let preimage = CanonicalBytes::concat(&canonical_options, &canonical_entry);
    let digest = sha256_bytes(&preimage);

    let (_, signature) = multibase::decode(&proof.proof_value)
        .map_err(|e| WebvhError::Integrity(format!("malformed proof_value: {e}")))?;

    if !originals_crypto::verify(suite, &decoded.bytes, &digest, &signature) {
        return Err(WebvhError::Integrity(format!("signature verification failed for entry {}", entry.version_id)));
    }
    Ok(())
}

/// Verify the full chain: genesis SCID recomputation, `version_id`
/// recursion, monotonic `version_time`, and every entry's proof.
fn verify_chain(entries: &[UpdateLogEntry]) -> Result<(), WebvhError> {
    let first = entries.first().ok_or_else(|| WebvhError::Integrity("log is empty".to_string()))?;

    let mut previous: Option<(&UpdateLogEntry, &str)> = None;
    for (i, entry) in entries.iter().enumerate() {
        let expected_n = i as u64 + 1;
        let (n, hash_part) = entry
            .version_id
            .split_once('-')
            .ok_or_else(|| WebvhError::Integrity(format!("malformed version_id: {}", entry.version_id)))?;
        let n: u64 = n
            .parse()
            .map_err(|_| WebvhError::Integrity(format!("malformed version_id: {}", entry.version_id)))?;
        if n != expected_n {
            return Err(WebvhError::Integrity(format!(
                "version_id out of sequence: expected {expected_n}, got {n}"
            )));
        }

        // The genesis entry hashes alone; every later entry must chain
        // through its predecessor's hash, or an interior entry sharing the
        // same `parameters` could be swapped for another validly-signed one
        // without breaking verification.
        let recomputed_hash = match previous {
            Some((_, prev_hash)) => entry.chained_hash(Some(prev_hash))?,
            None => entry.hash()?,
        };
        if recomputed_hash != hash_part {
            return Err(WebvhError::Integrity(format!("entry {} hash mismatch", entry.version_id)));
        }

        if let Some((prev, _)) = previous {
            if entry.version_time < prev.version_time {
                return Err(WebvhError::Integrity("version_time is not monotonically non-decreasing".to_string()));
            }
            verify_entry_proof(entry, &prev.parameters.update_keys)?;
        } else {
            verify_entry_proof(entry, &entry.parameters.update_keys)?;
        }

        previous = Some((entry, hash_part));
    }

    let _ = first;
    Ok(())
}

#[async_trait]
impl WebvhResolver for WebVHLog {
    async fn resolve(
        &self,
        domain: &str,
        path_segments: &[String],
        scid: &str,
    ) -> Result<DidResolutionResult, DidError> {
        let entries = self
            .verify(domain, path_segments)
            .await
            .map_err(|e| DidError::InvalidDocument(e.to_string()))?;

        let latest = entries.last().ok_or_else(|| DidError::NotFound(format!("did:webvh:{domain}")))?;
        if latest.parameters.scid != scid {
            return Err(DidError::InvalidDid(format!(
                "scid mismatch: log carries {}, resolver was asked for {scid}",
                latest.parameters.scid
            )));
        }

        let deactivated = latest.parameters.deactivated;
        let mut document = latest.state.clone();
        if deactivated {
            document.deactivated = Some(true);
        }

        Ok(DidResolutionResult {
            document,
            metadata: ResolutionMetadata { deactivated, ..Default::default() },
        })
    }
}
