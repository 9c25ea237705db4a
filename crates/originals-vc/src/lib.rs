//! # originals-vc — Verifiable Credential Engine
//!
//! Issues and verifies Data Integrity proofs over W3C Verifiable
//! Credentials (spec §4.4), and builds `VerifiablePresentation`s.
//!
//! ## Crate Policy
//!
//! - Verification never panics or propagates a `Result::Err` for a
//!   malformed or tampered credential — every failure folds into
//!   `VerificationResult { ok: false, .. }`.
//! - All digest computation flows through
//!   `originals_core::canonical::CanonicalBytes`, never raw
//!   `serde_json::to_vec`.

pub mod document_loader;
pub mod engine;
pub mod error;
pub mod exchange;
pub mod model;

pub use document_loader::{DocumentLoader, VerificationMaterial};
pub use engine::CredentialEngine;
pub use error::VcError;
pub use exchange::VcExchangeProvider;
pub use model::{create_presentation, Credential, Presentation, Proof, VerificationResult};
