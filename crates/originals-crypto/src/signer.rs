//! # Signer Registry
//!
//! Sign/verify over a pre-computed 32-byte digest for each supported suite.
//! `CredentialEngine` computes `digest = SHA-256(canonical_proof_options ||
//! canonical_document)` once (spec §4.4 step 4) and this module signs that
//! digest regardless of suite — including Ed25519, whose cryptosuite name
//! (`eddsa-rdfc-2022`) implies signing over canonicalized bytes directly,
//! but which this SDK applies uniformly to the SHA-256 digest like the
//! other two suites, per the digest formula in spec §4.4.
//!
//! Ed25519 signatures are deterministic by construction (RFC 8032). ECDSA
//! signing (secp256k1, P-256) uses RFC 6979 deterministic nonce derivation —
//! no non-deterministic randomness is used in signature computation
//! (spec §4.3).
//!
//! Implements spec §4.3.

use ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use ed25519_dalek::{Signer as _, Verifier as _};

use crate::error::CryptoError;
use crate::suite::Suite;

/// Sign a 32-byte digest with a suite-specific secret key.
///
/// `secret_key_bytes` must be the raw (non-multikey-encoded) secret key:
/// 32 bytes for all three suites.
pub fn sign(suite: Suite, secret_key_bytes: &[u8], digest: &[u8; 32]) -> Result<Vec<u8>, CryptoError> {
    match suite {
        Suite::Ed25519 => {
            let arr: [u8; 32] = secret_key_bytes
                .try_into()
                .map_err(|_| CryptoError::KeyError("ed25519 secret key must be 32 bytes".into()))?;
            let signing_key = ed25519_dalek::SigningKey::from_bytes(&arr);
            let sig = signing_key.sign(digest);
            Ok(sig.to_bytes().to_vec())
        }
        Suite::Secp256k1 => {
            let secret = secp256k1::SecretKey::from_slice(secret_key_bytes)
                .map_err(|e| CryptoError::KeyError(format!("invalid secp256k1 secret key: {e}")))?;
            let msg = secp256k1::Message::from_digest(*digest);
            let sig = secp256k1::SECP256K1.sign_ecdsa(msg, &secret);
            Ok(sig.serialize_compact().to_vec())
        }
        Suite::P256 => {
            let arr: [u8; 32] = secret_key_bytes
                .try_into()
                .map_err(|_| CryptoError::KeyError("p256 secret key must be 32 bytes".into()))?;
            let signing_key = p256::ecdsa::SigningKey::from_bytes(p256::FieldBytes::from_slice(&arr))
                .map_err(|e| CryptoError::KeyError(format!("invalid p256 secret key: {e}")))?;
            let sig: p256::ecdsa::Signature = signing_key
                .sign_prehash(digest)
                .map_err(|e| CryptoError::KeyError(format!("p256 signing failed: {e}")))?;
            Ok(sig.to_bytes().to_vec())
        }
    }
}

/// Verify a signature over a 32-byte digest. Never panics or propagates a
/// decode error as an `Err` — any malformed input is folded into `false`,
/// matching the §4.4 requirement that verification never throws.
pub fn verify(suite: Suite, public_key_bytes: &[u8], digest: &[u8; 32], signature: &[u8]) -> bool {
    match suite {
        Suite::Ed25519 => {
            let Ok(arr) = <[u8; 32]>::try_from(public_key_bytes) else {
                return false;
            };
            let Ok(verifying_key) = ed25519_dalek::VerifyingKey::from_bytes(&arr) else {
                return false;
            };
            let Ok(sig_arr) = <[u8; 64]>::try_from(signature) else {
                return false;
            };
            let sig = ed25519_dalek::Signature::from_bytes(&sig_arr);
            verifying_key.verify(digest, &sig).is_ok()
        }
        Suite::Secp256k1 => {
            let Ok(public) = secp256k1::PublicKey::from_slice(public_key_bytes) else {
                return false;
            };
            let Ok(sig) = secp256k1::ecdsa::Signature::from_compact(signature) else {
                return false;
            };
            let msg = secp256k1::Message::from_digest(*digest);
            secp256k1::SECP256K1.verify_ecdsa(msg, &sig, &public).is_ok()
        }
        Suite::P256 => {
            let Ok(verifying_key) = p256::ecdsa::VerifyingKey::from_sec1_bytes(public_key_bytes) else {
                return false;
            };
            let Ok(sig) = p256::ecdsa::Signature::from_slice(signature) else {
                return false;
            };
            verifying_key.verify_prehash(digest, &sig).is_ok()
        }
    }
}
