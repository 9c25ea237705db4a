//! # originals-core — Foundational Types for the Originals SDK
//!
//! This crate is the bedrock of the Originals SDK. It defines the
//! canonicalization, digest, timestamp, and error types every other crate in
//! the workspace depends on; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** All digest and signature-preimage
//!    computation flows through `CanonicalBytes::new()`. No raw
//!    `serde_json::to_vec()` on the digest/signing path. Ever.
//! 2. **`sha256_digest()` accepts only `&CanonicalBytes`.** Compile-time
//!    enforcement that every digest path flows through canonicalization.
//! 3. **UTC-only timestamps.** `Timestamp` enforces UTC with `Z` suffix and
//!    seconds precision, matching the canonicalization rules in
//!    `CanonicalBytes`.
//! 4. **One error hierarchy.** `OriginalsError` is the root error type every
//!    public fallible operation in the workspace ultimately returns.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `originals-*` crates (leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize` where meaningful.

pub mod canonical;
pub mod digest;
pub mod error;
pub mod temporal;

pub use canonical::CanonicalBytes;
pub use digest::{sha256_bytes, sha256_digest, sha256_raw, ContentDigest, DigestAlgorithm, Sha256Accumulator};
pub use error::{CanonicalizationError, OriginalsError};
pub use temporal::Timestamp;
