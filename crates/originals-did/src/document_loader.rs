//! Bridges [`DidResolver`] into `originals_vc::DocumentLoader`, so
//! `CredentialEngine::verify` can resolve `did:...#fragment` verification
//! methods by delegating to this crate's resolution logic.

use std::sync::Arc;

use async_trait::async_trait;
use originals_vc::{DocumentLoader, VcError, VerificationMaterial};

use crate::identifier::Identifier;
use crate::resolver::DidResolver;

/// Resolves `did:webvh#...`/`did:btco#...` verification method ids through
/// a [`DidResolver`]. `did:peer` verification methods cannot be resolved
/// this way — peer resolution requires key material the loader does not
/// have — so callers must pass peer verification methods inline instead.
pub struct ResolverDocumentLoader {
    resolver: Arc<DidResolver>,
}

impl ResolverDocumentLoader {
    pub fn new(resolver: Arc<DidResolver>) -> Self {
        Self { resolver }
    }
}

#[async_trait]
impl DocumentLoader for ResolverDocumentLoader {
    async fn load(&self, did_url: &str) -> Result<VerificationMaterial, VcError> {
        let (did, fragment) = did_url
            .split_once('#')
            .ok_or_else(|| VcError::UnresolvedVerificationMethod(format!("not a DID URL fragment: {did_url}")))?;

        let identifier = Identifier::parse(did)
            .map_err(|e| VcError::UnresolvedVerificationMethod(format!("invalid DID: {e}")))?;

        let result = self
            .resolver
            .resolve(&identifier, None)
            .await
            .map_err(|e| VcError::UnresolvedVerificationMethod(e.to_string()))?;

        let vm_id = format!("{did}#{fragment}");
        let vm = result
            .document
            .find_verification_method(&vm_id)
            .ok_or_else(|| VcError::UnresolvedVerificationMethod(format!("no such verification method: {vm_id}")))?;

        Ok(VerificationMaterial {
            type_: vm.type_.clone(),
            public_key_multibase: vm.public_key_multibase.clone(),
        })
    }
}
