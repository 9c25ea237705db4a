//! # originals-crypto — Multikey Codec, Signer Registry, Key Management
//!
//! Provides the cryptographic building blocks for the Originals SDK:
//!
//! - [`multikey`] — self-describing multibase+multicodec key encoding
//!   (spec §4.2).
//! - [`signer`] — sign/verify for secp256k1, Ed25519, and P-256 over a
//!   pre-computed SHA-256 digest (spec §4.3).
//! - [`keymanager`] — key generation and deterministic derivation
//!   (`KeyManager`, named in the spec §2 component table).
//!
//! ## Crate Policy
//!
//! - Depends only on `originals-core` internally.
//! - No mocking of cryptographic operations in tests — all tests use real
//!   key material and real signature verification.
//! - Secret key bytes are never logged, never serialized by `Debug`, and
//!   never embedded in a credential's subject.

pub mod error;
pub mod keymanager;
pub mod multikey;
pub mod signer;
pub mod suite;

pub use error::CryptoError;
pub use keymanager::{KeyManager, KeyPair};
pub use multikey::{multikey_decode, multikey_encode_public, multikey_encode_secret, DecodedMultikey};
pub use signer::{sign, verify};
pub use suite::Suite;
