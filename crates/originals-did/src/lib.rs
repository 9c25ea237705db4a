//! # originals-did — Identifiers, Documents, and Resolution
//!
//! Parses and constructs identifiers for the `peer`, `webvh`, and `btco`
//! DID methods, models `DidDocument`/`VerificationMethod`, and resolves
//! identifiers to documents (spec §4.5).
//!
//! `webvh` and `btco` resolution are delegated to [`resolver::WebvhResolver`]
//! and [`resolver::BtcoResolver`], implemented by `originals-webvh` and
//! `originals-ordinals` respectively, to keep this crate free of a
//! dependency cycle with either.

pub mod document;
pub mod document_loader;
pub mod error;
pub mod identifier;
pub mod network;
pub mod resolver;

pub use document::{DidDocument, VerificationMethod, VerificationRelationship, DID_CORE_CONTEXTS};
pub use document_loader::ResolverDocumentLoader;
pub use error::DidError;
pub use identifier::Identifier;
pub use network::Network;
pub use resolver::{BtcoResolver, DidResolutionResult, DidResolver, ResolutionMetadata, WebvhResolver};
