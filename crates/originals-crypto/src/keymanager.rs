//! # KeyManager — Key Material Generation and Derivation
//!
//! Generates and derives key material for each supported suite. Mirrors
//! the teacher's `Ed25519KeyPair` invariants across all three suites:
//! secret bytes are never serialized, never logged, and `Debug` never
//! prints them.
//!
//! Named in the component table (spec §2) but not given its own numbered
//! subsection in the distilled spec.

use crate::error::CryptoError;
use crate::multikey::{multikey_encode_public, multikey_encode_secret};
use crate::suite::Suite;

/// A generated or derived key pair for one suite.
///
/// Does not implement `Serialize` — callers that need to persist key
/// material must explicitly call [`KeyPair::public_multikey`] /
/// [`KeyPair::secret_multikey`] and handle the secret string themselves.
pub struct KeyPair {
    suite: Suite,
    secret_bytes: Vec<u8>,
    public_bytes: Vec<u8>,
}

impl KeyPair {
    /// The suite this key pair belongs to.
    pub fn suite(&self) -> Suite {
        self.suite
    }

    /// Raw public key bytes (33 bytes compressed SEC1 for secp256k1/P-256,
    /// 32 bytes for Ed25519).
    pub fn public_bytes(&self) -> &[u8] {
        &self.public_bytes
    }

    /// Raw secret key bytes (32 bytes for all three suites).
    pub fn secret_bytes(&self) -> &[u8] {
        &self.secret_bytes
    }

    /// Multikey-encode the public key.
    pub fn public_multikey(&self) -> String {
        multikey_encode_public(self.suite, &self.public_bytes)
    }

    /// Multikey-encode the secret key.
    pub fn secret_multikey(&self) -> String {
        multikey_encode_secret(self.suite, &self.secret_bytes)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeyPair(suite={}, public={})", self.suite, self.public_multikey())
    }
}

/// Generates and derives key material for each supported suite.
pub struct KeyManager;

impl KeyManager {
    /// Generate a fresh random key pair for `suite` using the suite's CSPRNG.
    pub fn generate(suite: Suite) -> KeyPair {
        match suite {
            Suite::Ed25519 => {
                let signing_key = ed25519_dalek::SigningKey::generate(&mut rand::rngs::OsRng);
                KeyPair {
                    suite,
                    secret_bytes: signing_key.to_bytes().to_vec(),
                    public_bytes: signing_key.verifying_key().to_bytes().to_vec(),
                }
            }
            Suite::Secp256k1 => {
                let (secret, public) = secp256k1::SECP256K1.generate_keypair(&mut rand::rngs::OsRng);
                KeyPair {
                    suite,
                    secret_bytes: secret.secret_bytes().to_vec(),
                    public_bytes: public.serialize().to_vec(),
                }
            }
            Suite::P256 => {
                let signing_key = p256::ecdsa::SigningKey::random(&mut rand::rngs::OsRng);
                let verifying_key = p256::ecdsa::VerifyingKey::from(&signing_key);
                KeyPair {
                    suite,
                    secret_bytes: signing_key.to_bytes().to_vec(),
                    public_bytes: verifying_key
                        .to_encoded_point(true)
                        .as_bytes()
                        .to_vec(),
                }
            }
        }
    }

    /// Derive a deterministic key pair from a 32-byte seed. Used for
    /// reproducible test vectors (spec §8 end-to-end scenario 1).
    pub fn from_seed(suite: Suite, seed: &[u8; 32]) -> KeyPair {
        match suite {
            Suite::Ed25519 => {
                let signing_key = ed25519_dalek::SigningKey::from_bytes(seed);
                KeyPair {
                    suite,
                    secret_bytes: signing_key.to_bytes().to_vec(),
                    public_bytes: signing_key.verifying_key().to_bytes().to_vec(),
                }
            }
            Suite::Secp256k1 => {
                let secret = secp256k1::SecretKey::from_slice(seed)
                    .expect("32-byte seed is a valid secp256k1 scalar with overwhelming probability");
                let public = secp256k1::PublicKey::from_secret_key(secp256k1::SECP256K1, &secret);
                KeyPair {
                    suite,
                    secret_bytes: secret.secret_bytes().to_vec(),
                    public_bytes: public.serialize().to_vec(),
                }
            }
            Suite::P256 => {
                let signing_key = p256::ecdsa::SigningKey::from_bytes(p256::FieldBytes::from_slice(seed))
                    .expect("32-byte seed is a valid P-256 scalar with overwhelming probability");
                let verifying_key = p256::ecdsa::VerifyingKey::from(&signing_key);
                KeyPair {
                    suite,
                    secret_bytes: signing_key.to_bytes().to_vec(),
                    public_bytes: verifying_key
                        .to_encoded_point(true)
                        .as_bytes()
                        .to_vec(),
                }
            }
        }
    }

    /// Reconstruct a key pair from a multikey-encoded secret key, deriving
    /// the matching public key.
    pub fn from_secret_multikey(encoded: &str) -> Result<KeyPair, CryptoError> {
        let decoded = crate::multikey::multikey_decode(encoded)?;
        if !decoded.is_secret {
            return Err(CryptoError::KeyError(
                "expected a secret multikey, got a public one".to_string(),
            ));
        }
        let seed: [u8; 32] = decoded
            .bytes
            .as_slice()
            .try_into()
            .map_err(|_| CryptoError::KeyError("secret key must be 32 bytes".to_string()))?;
        Ok(Self::from_seed(decoded.suite, &seed))
    }
}
