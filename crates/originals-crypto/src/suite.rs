//! The three signature suites the SDK supports, and their cryptosuite
//! identifiers used in Data Integrity proofs (spec §4.3).

use serde::{Deserialize, Serialize};

/// A supported signature suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suite {
    /// ECDSA over secp256k1, SHA-256 digest, RFC 6979 deterministic nonces.
    Secp256k1,
    /// Pure Ed25519 over canonicalized bytes.
    Ed25519,
    /// ECDSA over NIST P-256, SHA-256 digest, RFC 6979 deterministic nonces.
    P256,
}

impl Suite {
    /// The Data Integrity `cryptosuite` identifier for this suite.
    pub fn cryptosuite_id(&self) -> &'static str {
        match self {
            Self::Secp256k1 => "ecdsa-secp256k1-2019",
            Self::Ed25519 => "eddsa-rdfc-2022",
            Self::P256 => "ecdsa-p256-2019",
        }
    }
}

impl std::fmt::Display for Suite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.cryptosuite_id())
    }
}
