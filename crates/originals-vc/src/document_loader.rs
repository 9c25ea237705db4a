//! # DocumentLoader — Resolve DID Fragments to Verification Material
//!
//! `CredentialEngine::verify` resolves a credential's `proof.verification_method`
//! either through a configured `DocumentLoader` (when it is a DID URL with a
//! fragment) or by treating it as an inline multibase public key directly
//! (spec §4.4 step 2). This module defines only the trait; `originals-did`
//! provides the concrete `DidResolver`-backed implementation, kept out of
//! this crate to avoid a `originals-vc -> originals-did -> originals-vc`
//! dependency cycle (a `DidDocument`'s verification relationships embed
//! Multikey verification methods, which is exactly the shape credentials
//! are verified against).

use async_trait::async_trait;

use crate::error::VcError;

/// Verification material resolved for one `verificationMethod` id.
#[derive(Debug, Clone)]
pub struct VerificationMaterial {
    /// Verification method type; defaults to `"Multikey"` when absent
    /// upstream.
    pub type_: String,
    /// The multikey-encoded public key.
    pub public_key_multibase: String,
}

/// Resolves `did:...#fragment` verification method ids to key material.
#[async_trait]
pub trait DocumentLoader: Send + Sync {
    /// Load the verification method material for `did_url`.
    async fn load(&self, did_url: &str) -> Result<VerificationMaterial, VcError>;
}
