//! # Content-Addressed Digests
//!
//! Defines [`ContentDigest`] and [`DigestAlgorithm`]. All digests carry an
//! algorithm tag; SHA-256 is the only implemented algorithm today, but the
//! tag makes a future algorithm addition non-breaking.
//!
//! ## Security invariant
//!
//! All SHA-256 computation in the SDK flows through this module. No other
//! crate imports `sha2` directly. [`sha256_digest`] accepts only
//! `&CanonicalBytes`, so every digest is computed from properly
//! canonicalized data. [`Sha256Accumulator`] is provided for multi-part
//! binary hashing (update-log hash chaining, inscription push chunking)
//! where the input is not itself a single JSON document.
//!
//! Implements spec §3 (`Resource.content_hash`), §4.6 (`version_id`
//! recursion), and §4.9 (`inscription_id`).

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::canonical::CanonicalBytes;
use crate::error::OriginalsError;

/// The hash algorithm used to compute a content-addressed digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestAlgorithm {
    /// SHA-256 — the only algorithm implemented today.
    Sha256,
}

impl std::fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sha256 => write!(f, "sha256"),
        }
    }
}

/// A content-addressed digest with its algorithm tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentDigest {
    algorithm: DigestAlgorithm,
    bytes: [u8; 32],
}

impl ContentDigest {
    /// Access the digest algorithm.
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Access the raw 32-byte digest value.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Render the digest as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.bytes.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Reconstruct a SHA-256 digest from a 64-character hex string.
    ///
    /// Does not compute a digest — it reconstructs one from a
    /// previously-computed hex representation (e.g. a `content_hash`
    /// received at a resource ingestion boundary).
    pub fn from_hex(hex: &str) -> Result<Self, OriginalsError> {
        if hex.len() != 64 {
            return Err(OriginalsError::Integrity(format!(
                "expected 64 hex chars for SHA-256 digest, got {}",
                hex.len()
            )));
        }
        let mut bytes = [0u8; 32];
        for i in 0..32 {
            bytes[i] = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| {
                OriginalsError::Integrity(format!("invalid hex at position {}", i * 2))
            })?;
        }
        Ok(Self {
            algorithm: DigestAlgorithm::Sha256,
            bytes,
        })
    }
}

impl std::fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.algorithm, self.to_hex())
    }
}

/// Compute a SHA-256 content digest from canonical bytes.
///
/// The `&CanonicalBytes` parameter (not `&[u8]`) guarantees the input has
/// passed through [`CanonicalBytes::new`], eliminating the
/// wrong-serialization-path defect class at the type level.
pub fn sha256_digest(canonical: &CanonicalBytes) -> ContentDigest {
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    ContentDigest {
        algorithm: DigestAlgorithm::Sha256,
        bytes: hasher.finalize().into(),
    }
}

/// Incremental SHA-256 accumulator for multi-part digest computation, used
/// for update-log hash chaining (`previous || current`) and inscription
/// envelope push-chunk boundaries.
pub struct Sha256Accumulator {
    hasher: Sha256,
}

impl Sha256Accumulator {
    /// Create a new empty accumulator.
    pub fn new() -> Self {
        Self {
            hasher: Sha256::new(),
        }
    }

    /// Feed data into the accumulator.
    pub fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.hasher, data);
    }

    /// Consume the accumulator and return a [`ContentDigest`].
    pub fn finalize(self) -> ContentDigest {
        ContentDigest {
            algorithm: DigestAlgorithm::Sha256,
            bytes: self.hasher.finalize().into(),
        }
    }

    /// Consume the accumulator and return the raw 32-byte digest.
    pub fn finalize_bytes(self) -> [u8; 32] {
        self.hasher.finalize().into()
    }

    /// Consume the accumulator and return a hex-encoded digest string.
    pub fn finalize_hex(self) -> String {
        self.finalize().to_hex()
    }
}

impl Default for Sha256Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-shot SHA-256 over raw bytes, returning a hex string.
///
/// Use for binary inputs that are not themselves a canonicalizable JSON
/// document (update-log entry concatenation, inscription content bytes).
pub fn sha256_raw(data: &[u8]) -> String {
    let mut acc = Sha256Accumulator::new();
    acc.update(data);
    acc.finalize_hex()
}

/// Single-shot SHA-256 over raw bytes, returning the 32-byte digest.
pub fn sha256_bytes(data: &[u8]) -> [u8; 32] {
    let mut acc = Sha256Accumulator::new();
    acc.update(data);
    acc.finalize_bytes()
}
