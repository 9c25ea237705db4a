//! # Multikey — Self-Describing Key Encoding
//!
//! Encodes and decodes public and secret keys in the `z<base58btc(header ||
//! key_bytes)>` form used throughout the SDK: `DidDocument.verification_method`,
//! `Proof.verification_method`, and the `KeyManager`'s serialized key
//! material all use this encoding.
//!
//! ## Header table
//!
//! Public key headers are the fixed 2-byte multicodec prefixes named in
//! spec §4.2. Secret key headers are this crate's internal counterparts —
//! secret keys never leave this process in practice, so the exact header
//! values only need to round-trip within this crate, not interoperate with
//! an external multicodec table.
//!
//! Implements spec §4.2.

use crate::error::CryptoError;
use crate::suite::Suite;

const SECP256K1_PUBLIC_HEADER: [u8; 2] = [0xe7, 0x01];
const ED25519_PUBLIC_HEADER: [u8; 2] = [0xed, 0x01];
const P256_PUBLIC_HEADER: [u8; 2] = [0x80, 0x24];

const SECP256K1_SECRET_HEADER: [u8; 2] = [0x13, 0x01];
const ED25519_SECRET_HEADER: [u8; 2] = [0x13, 0x00];
const P256_SECRET_HEADER: [u8; 2] = [0x13, 0x06];

fn public_header(suite: Suite) -> [u8; 2] {
    match suite {
        Suite::Secp256k1 => SECP256K1_PUBLIC_HEADER,
        Suite::Ed25519 => ED25519_PUBLIC_HEADER,
        Suite::P256 => P256_PUBLIC_HEADER,
    }
}

fn secret_header(suite: Suite) -> [u8; 2] {
    match suite {
        Suite::Secp256k1 => SECP256K1_SECRET_HEADER,
        Suite::Ed25519 => ED25519_SECRET_HEADER,
        Suite::P256 => P256_SECRET_HEADER,
    }
}

fn suite_from_header(header: [u8; 2]) -> Option<(Suite, bool)> {
    match header {
        SECP256K1_PUBLIC_HEADER => Some((Suite::Secp256k1, false)),
        ED25519_PUBLIC_HEADER => Some((Suite::Ed25519, false)),
        P256_PUBLIC_HEADER => Some((Suite::P256, false)),
        SECP256K1_SECRET_HEADER => Some((Suite::Secp256k1, true)),
        ED25519_SECRET_HEADER => Some((Suite::Ed25519, true)),
        P256_SECRET_HEADER => Some((Suite::P256, true)),
        _ => None,
    }
}

/// Encode a public key as `z<base58btc(header || key_bytes)>`.
pub fn multikey_encode_public(suite: Suite, key_bytes: &[u8]) -> String {
    encode(public_header(suite), key_bytes)
}

/// Encode a secret key as `z<base58btc(header || key_bytes)>`.
pub fn multikey_encode_secret(suite: Suite, key_bytes: &[u8]) -> String {
    encode(secret_header(suite), key_bytes)
}

fn encode(header: [u8; 2], key_bytes: &[u8]) -> String {
    let mut buf = Vec::with_capacity(2 + key_bytes.len());
    buf.extend_from_slice(&header);
    buf.extend_from_slice(key_bytes);
    multibase::encode(multibase::Base::Base58Btc, buf)
}

/// A decoded multikey: the suite it belongs to, whether it is a secret key,
/// and the raw key bytes (header stripped).
pub struct DecodedMultikey {
    pub suite: Suite,
    pub is_secret: bool,
    pub bytes: Vec<u8>,
}

/// Decode a multikey string, returning the suite and raw key bytes.
///
/// Fails on invalid base58, an unrecognized header, or a key length that
/// does not match the suite (33 bytes for compressed secp256k1/P-256
/// public keys, 32 bytes for Ed25519 public keys and all secret keys).
pub fn multikey_decode(encoded: &str) -> Result<DecodedMultikey, CryptoError> {
    let (base, bytes) = multibase::decode(encoded)
        .map_err(|e| CryptoError::MultikeyDecode(format!("invalid multibase: {e}")))?;
    if base != multibase::Base::Base58Btc {
        return Err(CryptoError::MultikeyDecode(
            "expected base58btc ('z') prefix".to_string(),
        ));
    }
    if bytes.len() < 2 {
        return Err(CryptoError::MultikeyDecode(
            "multikey too short to contain a header".to_string(),
        ));
    }
    let header = [bytes[0], bytes[1]];
    let (suite, is_secret) = suite_from_header(header)
        .ok_or_else(|| CryptoError::MultikeyDecode(format!("unrecognized header {header:?}")))?;
    let key_bytes = bytes[2..].to_vec();

    let expected_len = expected_key_len(suite, is_secret);
    if key_bytes.len() != expected_len {
        return Err(CryptoError::MultikeyDecode(format!(
            "expected {expected_len} key bytes for {suite}, got {}",
            key_bytes.len()
        )));
    }

    Ok(DecodedMultikey {
        suite,
        is_secret,
        bytes: key_bytes,
    })
}

fn expected_key_len(suite: Suite, is_secret: bool) -> usize {
    if is_secret {
        32
    } else {
        match suite {
            Suite::Secp256k1 | Suite::P256 => 33,
            Suite::Ed25519 => 32,
        }
    }
}
