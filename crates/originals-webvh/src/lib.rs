//! # originals-webvh — Self-Certifying, Hash-Linked Update Log
//!
//! Implements `did:webvh`'s append-only update log (spec §4.6): genesis SCID
//! derivation, signed hash-chained entries, and file-backed storage.
//! [`WebVHLog`] implements `originals_did::WebvhResolver`, so a
//! `DidResolver` configured with one can resolve `did:webvh` identifiers
//! end to end.

pub mod error;
pub mod file;
pub mod log;
pub mod model;
pub mod scid;

pub use error::WebvhError;
pub use log::WebVHLog;
pub use model::{LogProof, Parameters, UpdateLogEntry, SCID_PLACEHOLDER, WEBVH_VERSION};
pub use scid::{compute_genesis, Genesis};
