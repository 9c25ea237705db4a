//! # DidResolver — Parse, Construct, and Resolve Identifiers
//!
//! Implements spec §4.5. Resolution of `webvh` and `btco` identifiers is
//! delegated to injected providers ([`WebvhResolver`], [`BtcoResolver`])
//! rather than implemented against `originals-webvh`/`originals-ordinals`
//! directly — those crates hold the update-log and ordinals-gateway logic
//! and already depend on this crate for `DidDocument`/`Identifier`; a
//! direct dependency the other way would cycle. `originals-lifecycle`
//! (the composition root) wires the concrete implementations in.

use async_trait::async_trait;
use originals_crypto::multikey_decode;

use crate::document::{DidDocument, VerificationMethod};
use crate::error::DidError;
use crate::identifier::Identifier;
use crate::network::Network;

/// Resolution metadata returned alongside a resolved document (spec §6).
#[derive(Debug, Clone, Default)]
pub struct ResolutionMetadata {
    pub inscription_id: Option<String>,
    pub sat: Option<u64>,
    pub content_type: Option<String>,
    pub network: Option<Network>,
    pub deactivated: bool,
    pub total_inscriptions: Option<u32>,
}

/// The outcome of [`DidResolver::resolve`].
#[derive(Debug, Clone)]
pub struct DidResolutionResult {
    pub document: DidDocument,
    pub metadata: ResolutionMetadata,
}

/// Resolves `did:webvh` identifiers by reading and verifying an update log.
/// Implemented by `originals-webvh`.
#[async_trait]
pub trait WebvhResolver: Send + Sync {
    async fn resolve(
        &self,
        domain: &str,
        path_segments: &[String],
        scid: &str,
    ) -> Result<DidResolutionResult, DidError>;
}

/// Resolves `did:btco` identifiers against an ordinals indexer. Implemented
/// by `originals-ordinals`.
#[async_trait]
pub trait BtcoResolver: Send + Sync {
    async fn resolve(&self, network: Network, sat: u64) -> Result<DidResolutionResult, DidError>;
}

/// Parses, constructs, and resolves identifiers for all three DID methods.
#[derive(Default)]
pub struct DidResolver {
    webvh: Option<std::sync::Arc<dyn WebvhResolver>>,
    btco: Option<std::sync::Arc<dyn BtcoResolver>>,
}

impl DidResolver {
    pub fn new() -> Self {
        Self { webvh: None, btco: None }
    }

    pub fn with_webvh_resolver(mut self, resolver: std::sync::Arc<dyn WebvhResolver>) -> Self {
        self.webvh = Some(resolver);
        self
    }

    pub fn with_btco_resolver(mut self, resolver: std::sync::Arc<dyn BtcoResolver>) -> Self {
        self.btco = Some(resolver);
        self
    }

    /// Synthesize a `did:peer` document from key material alone; no network
    /// access (spec §4.5).
    pub fn resolve_peer(
        &self,
        identifier: &Identifier,
        public_key_multibase: &str,
    ) -> Result<DidResolutionResult, DidError> {
        let Identifier::Peer { .. } = identifier else {
            return Err(DidError::InvalidDid("not a did:peer identifier".to_string()));
        };
        multikey_decode(public_key_multibase)
            .map_err(|e| DidError::InvalidDocument(format!("invalid peer key material: {e}")))?;

        let did = identifier.to_string();
        let vm = VerificationMethod::multikey(format!("{did}#key-1"), did.clone(), public_key_multibase);
        let document = DidDocument::new_with_single_key(did, vm);
        document.validate()?;
        Ok(DidResolutionResult { document, metadata: ResolutionMetadata::default() })
    }

    /// Resolve any supported identifier. `peer_key_material` is required
    /// (and only used) when `identifier` is `Identifier::Peer`.
    pub async fn resolve(
        &self,
        identifier: &Identifier,
        peer_key_material: Option<&str>,
    ) -> Result<DidResolutionResult, DidError> {
        match identifier {
            Identifier::Peer { .. } => {
                let key = peer_key_material.ok_or_else(|| {
                    DidError::InvalidDid("did:peer resolution requires key material".to_string())
                })?;
                self.resolve_peer(identifier, key)
            }
            Identifier::WebVh { domain, path_segments, scid } => {
                let resolver = self
                    .webvh
                    .as_ref()
                    .ok_or_else(|| DidError::NoResolver("no webvh resolver configured".to_string()))?;
                let result = resolver.resolve(domain, path_segments, scid).await?;
                if result.document.is_deactivated() {
                    return Err(DidError::Deactivated(identifier.to_string()));
                }
                Ok(result)
            }
            Identifier::Btco { network, sat, .. } => {
                let resolver = self
                    .btco
                    .as_ref()
                    .ok_or_else(|| DidError::NoResolver("no btco resolver configured".to_string()))?;
                let result = resolver.resolve(*network, *sat).await?;
                if result.document.is_deactivated() {
                    return Err(DidError::Deactivated(identifier.to_string()));
                }
                Ok(result)
            }
        }
    }
}
