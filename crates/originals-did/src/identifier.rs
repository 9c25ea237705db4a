//! # Identifier — DID Syntax for the Three Supported Methods
//!
//! `Identifier` is a tagged variant over the three DID methods this SDK
//! resolves (spec §3, §6), following the newtype/enum-over-stringly-typed
//! pattern the teacher applies to its own domain identifiers rather than
//! passing bare strings around.
//!
//! ```text
//! did:peer:<method-specific>
//! did:webvh:<domain>(:<segment>)*:<scid>
//! did:btco(:test|:sig)?:<sat>(/<index>)?
//! ```

use originals_core::{sha256_digest, CanonicalBytes, ContentDigest};
use serde::{Deserialize, Serialize};

use crate::error::DidError;
use crate::network::Network;

/// A parsed and validated decentralized identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum Identifier {
    /// An off-chain peer identity, keyed by the deterministic method-specific
    /// suffix derived from a resource content-hash set.
    Peer {
        method_specific: String,
    },
    /// A web-hosted identity document with an append-only update log.
    WebVh {
        domain: String,
        path_segments: Vec<String>,
        scid: String,
    },
    /// A Bitcoin ordinal-bound identity.
    Btco {
        network: Network,
        sat: u64,
        index: u32,
    },
}

impl Identifier {
    /// Compute the deterministic `did:peer` method-specific suffix from a
    /// sorted set of resource content hashes.
    ///
    /// The hash set is sorted by hex digest before canonicalization so that
    /// the same resource set always yields the same identifier regardless
    /// of insertion order.
    pub fn peer_suffix_from_content_hashes(hashes: &[ContentDigest]) -> Result<String, DidError> {
        let mut hexes: Vec<String> = hashes.iter().map(|h| h.to_hex()).collect();
        hexes.sort();
        let canonical = CanonicalBytes::new(&hexes)
            .map_err(|e| DidError::InvalidDid(format!("failed to canonicalize content hash set: {e}")))?;
        let digest = sha256_digest(&canonical);
        Ok(multibase::encode(multibase::Base::Base58Btc, digest.as_bytes()))
    }

    /// Construct a `did:peer` identifier from a content hash set.
    pub fn new_peer(hashes: &[ContentDigest]) -> Result<Self, DidError> {
        Ok(Self::Peer {
            method_specific: Self::peer_suffix_from_content_hashes(hashes)?,
        })
    }

    /// Parse a DID string into an `Identifier`.
    pub fn parse(s: &str) -> Result<Self, DidError> {
        let rest = s
            .strip_prefix("did:")
            .ok_or_else(|| DidError::InvalidDid(format!("missing `did:` prefix: {s}")))?;

        if let Some(method_specific) = rest.strip_prefix("peer:") {
            if method_specific.is_empty() {
                return Err(DidError::InvalidDid("did:peer method-specific id is empty".to_string()));
            }
            return Ok(Self::Peer { method_specific: method_specific.to_string() });
        }

        if let Some(tail) = rest.strip_prefix("webvh:") {
            let parts: Vec<&str> = tail.split(':').collect();
            if parts.len() < 2 {
                return Err(DidError::InvalidDid(format!(
                    "did:webvh requires a domain and a SCID: {s}"
                )));
            }
            let domain = parts[0].to_string();
            let scid = parts[parts.len() - 1].to_string();
            let path_segments = parts[1..parts.len() - 1].iter().map(|p| p.to_string()).collect();
            return Ok(Self::WebVh { domain, path_segments, scid });
        }

        if let Some(tail) = rest.strip_prefix("btco:") {
            let (network, tail) = if let Some(t) = tail.strip_prefix("test:") {
                (Network::Testnet, t)
            } else if let Some(t) = tail.strip_prefix("sig:") {
                (Network::Signet, t)
            } else {
                (Network::Mainnet, tail)
            };
            let (sat_str, index_str) = match tail.split_once('/') {
                Some((sat, index)) => (sat, Some(index)),
                None => (tail, None),
            };
            let sat: u64 = sat_str
                .parse()
                .map_err(|_| DidError::InvalidDid(format!("invalid satoshi ordinal: {sat_str}")))?;
            let index: u32 = match index_str {
                Some(idx) => idx
                    .parse()
                    .map_err(|_| DidError::InvalidDid(format!("invalid inscription index: {idx}")))?,
                None => 0,
            };
            return Ok(Self::Btco { network, sat, index });
        }

        Err(DidError::InvalidDid(format!("unrecognized DID method: {s}")))
    }
}

impl std::str::FromStr for Identifier {
    type Err = DidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Peer { method_specific } => write!(f, "did:peer:{method_specific}"),
            Self::WebVh { domain, path_segments, scid } => {
                write!(f, "did:webvh:{domain}")?;
                for segment in path_segments {
                    write!(f, ":{segment}")?;
                }
                write!(f, ":{scid}")
            }
            // Always emits the explicit `/index` form, even though `parse`
            // accepts the shorthand `did:btco:<sat>` for index 0.
            Self::Btco { network, sat, index } => {
                write!(f, "did:btco:{}{sat}/{index}", network.did_prefix())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_peer() {
        let id = Identifier::parse("did:peer:z6Mk123").unwrap();
        assert_eq!(id, Identifier::Peer { method_specific: "z6Mk123".to_string() });
    }

    #[test]
    fn rejects_empty_peer_suffix() {
        assert!(Identifier::parse("did:peer:").is_err());
    }

    #[test]
    fn parses_webvh_with_no_segments() {
        let id = Identifier::parse("did:webvh:example.com:abc123").unwrap();
        assert_eq!(
            id,
            Identifier::WebVh { domain: "example.com".to_string(), path_segments: vec![], scid: "abc123".to_string() }
        );
    }

    #[test]
    fn parses_webvh_with_segments() {
        let id = Identifier::parse("did:webvh:example.com:users:alice:abc123").unwrap();
        assert_eq!(
            id,
            Identifier::WebVh {
                domain: "example.com".to_string(),
                path_segments: vec!["users".to_string(), "alice".to_string()],
                scid: "abc123".to_string(),
            }
        );
    }

    #[test]
    fn parses_btco_mainnet_with_index() {
        let id = Identifier::parse("did:btco:1908770696977240/0").unwrap();
        assert_eq!(id, Identifier::Btco { network: Network::Mainnet, sat: 1908770696977240, index: 0 });
    }

    #[test]
    fn parses_btco_shorthand_without_index() {
        let id = Identifier::parse("did:btco:1908770696977240").unwrap();
        assert_eq!(id, Identifier::Btco { network: Network::Mainnet, sat: 1908770696977240, index: 0 });
    }

    #[test]
    fn parses_btco_testnet_and_signet() {
        let test = Identifier::parse("did:btco:test:42/1").unwrap();
        assert_eq!(test, Identifier::Btco { network: Network::Testnet, sat: 42, index: 1 });
        let sig = Identifier::parse("did:btco:sig:42/1").unwrap();
        assert_eq!(sig, Identifier::Btco { network: Network::Signet, sat: 42, index: 1 });
    }

    #[test]
    fn btco_display_always_includes_explicit_index() {
        let id = Identifier::parse("did:btco:42").unwrap();
        assert_eq!(id.to_string(), "did:btco:42/0");
    }

    #[test]
    fn rejects_unrecognized_method() {
        assert!(Identifier::parse("did:example:abc").is_err());
    }

    #[test]
    fn rejects_missing_did_prefix() {
        assert!(Identifier::parse("peer:abc").is_err());
    }

    #[test]
    fn peer_suffix_is_deterministic_regardless_of_input_order() {
        let h1 = sha256_digest(&CanonicalBytes::new(&"a").unwrap());
        let h2 = sha256_digest(&CanonicalBytes::new(&"b").unwrap());
        let s1 = Identifier::peer_suffix_from_content_hashes(&[h1.clone(), h2.clone()]).unwrap();
        let s2 = Identifier::peer_suffix_from_content_hashes(&[h2, h1]).unwrap();
        assert_eq!(s1, s2);
    }

    #[test]
    fn webvh_display_roundtrips_through_parse() {
        let original = "did:webvh:example.com:users:alice:abc123";
        let id = Identifier::parse(original).unwrap();
        assert_eq!(id.to_string(), original);
    }
}
