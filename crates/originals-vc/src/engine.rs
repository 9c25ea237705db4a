//! # CredentialEngine — Issue and Verify Data Integrity Proofs
//!
//! Implements spec §4.4. `issue` and `verify` share a single digest
//! computation (`digest = SHA-256(canonical_proof_options ||
//! canonical_document)`), matching the update-log hash-chain concatenation
//! idiom in `originals-core::canonical::CanonicalBytes::concat`.

use std::sync::Arc;

use chrono::Utc;
use originals_core::{sha256_bytes, CanonicalBytes};
use originals_crypto::{multikey_decode, KeyManager};
use tracing::instrument;

use crate::document_loader::DocumentLoader;
use crate::error::VcError;
use crate::model::{Credential, Proof, ProofOptions, VerificationResult};

/// Issues and verifies Data Integrity proofs over credentials.
///
/// Holds an optional `DocumentLoader` for resolving DID-URL verification
/// methods during `verify`; `issue` never needs one, since the signer
/// always supplies its own key material directly.
pub struct CredentialEngine {
    document_loader: Option<Arc<dyn DocumentLoader>>,
}

impl Default for CredentialEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialEngine {
    /// Construct an engine with no document loader; inline multibase
    /// verification methods still verify without one.
    pub fn new() -> Self {
        Self { document_loader: None }
    }

    /// Construct an engine that resolves DID-URL verification methods
    /// through `loader`.
    pub fn with_document_loader(loader: Arc<dyn DocumentLoader>) -> Self {
        Self { document_loader: Some(loader) }
    }

    /// Issue a Data Integrity proof over `credential`, using the
    /// multikey-encoded `secret_key_multibase` (its multicodec header
    /// resolves the cryptosuite, per spec §4.4 step 1).
    #[instrument(skip(self, credential, secret_key_multibase), fields(verification_method = %verification_method))]
    pub fn issue(
        &self,
        credential: Credential,
        verification_method: &str,
        secret_key_multibase: &str,
        proof_purpose: &str,
    ) -> Result<Credential, VcError> {
        credential.validate_subject_shape()?;

        let decoded = multikey_decode(secret_key_multibase)?;
        if !decoded.is_secret {
            return Err(VcError::InvalidShape(
                "issuing key must be a secret multikey".to_string(),
            ));
        }
        let suite = decoded.suite;

        let without_proof = credential.without_proof();
        let options = ProofOptions {
            type_: "DataIntegrityProof".to_string(),
            cryptosuite: suite.cryptosuite_id().to_string(),
            created: Utc::now(),
            verification_method: verification_method.to_string(),
            proof_purpose: proof_purpose.to_string(),
        };

        let digest = compute_digest(&options, &without_proof)?;

        let seed: [u8; 32] = decoded
            .bytes
            .as_slice()
            .try_into()
            .map_err(|_| VcError::InvalidShape("secret key must be 32 bytes".to_string()))?;
        let keypair = KeyManager::from_seed(suite, &seed);
        let signature = originals_crypto::sign(suite, keypair.secret_bytes(), &digest)?;
        let proof_value = multibase::encode(multibase::Base::Base58Btc, signature);

        let mut signed = without_proof;
        signed.proof = Some(Proof {
            type_: options.type_,
            cryptosuite: options.cryptosuite,
            created: options.created,
            verification_method: options.verification_method,
            proof_purpose: options.proof_purpose,
            proof_value,
        });
        Ok(signed)
    }

    /// Verify a signed credential. Never panics or propagates an error —
    /// every failure mode is folded into `VerificationResult { ok: false,
    /// .. } ` (spec §4.4, §9).
    #[instrument(skip(self, credential))]
    pub async fn verify(&self, credential: &Credential) -> VerificationResult {
        let Some(proof) = &credential.proof else {
            return VerificationResult::failure("credential has no proof");
        };

        let material = match self.resolve_verification_method(&proof.verification_method).await {
            Ok(m) => m,
            Err(e) => return VerificationResult::failure(e.to_string()),
        };
        if material.type_ != "Multikey" {
            return VerificationResult::failure(format!(
                "unsupported verification method type: {}",
                material.type_
            ));
        }

        let decoded = match multikey_decode(&material.public_key_multibase) {
            Ok(d) => d,
            Err(e) => return VerificationResult::failure(e.to_string()),
        };
        if decoded.is_secret {
            return VerificationResult::failure("verification method resolved to a secret key");
        }

        let without_proof = credential.without_proof();
        let options = ProofOptions {
            type_: proof.type_.clone(),
            cryptosuite: proof.cryptosuite.clone(),
            created: proof.created,
            verification_method: proof.verification_method.clone(),
            proof_purpose: proof.proof_purpose.clone(),
        };
        let digest = match compute_digest(&options, &without_proof) {
            Ok(d) => d,
            Err(e) => return VerificationResult::failure(e.to_string()),
        };

        let (_, signature) = match multibase::decode(&proof.proof_value) {
            Ok(v) => v,
            Err(e) => return VerificationResult::failure(format!("invalid proof value: {e}")),
        };

        if originals_crypto::verify(decoded.suite, &decoded.bytes, &digest, &signature) {
            VerificationResult::success()
        } else {
            VerificationResult::failure("signature verification failed")
        }
    }

    async fn resolve_verification_method(
        &self,
        verification_method: &str,
    ) -> Result<crate::document_loader::VerificationMaterial, VcError> {
        let is_did_url_fragment = verification_method.starts_with("did:") && verification_method.contains('#');
        if is_did_url_fragment {
            let loader = self.document_loader.as_ref().ok_or_else(|| {
                VcError::UnresolvedVerificationMethod(format!(
                    "no document loader configured to resolve {verification_method}"
                ))
            })?;
            loader.load(verification_method).await
        } else {
            Ok(crate::document_loader::VerificationMaterial {
                type_: "Multikey".to_string(),
                public_key_multibase: verification_method.to_string(),
            })
        }
    }
}

fn compute_digest(options: &ProofOptions, document: &Credential) -> Result<[u8; 32], VcError> {
    let canonical_options = CanonicalBytes::from_value(serde_json::Value::Object(options.clone().into_map()))?;
    let canonical_document = CanonicalBytes::new(document)?;
    let preimage = CanonicalBytes::concat(&canonical_options, &canonical_document);
    Ok(sha256_bytes(&preimage))
}
