//! # Resource — Content-Addressed Payload
//!
//! Implements spec §3: `{content_hash, media_type, size, inline_bytes_or_url}`.
//! Identity across layers is by `content_hash` — promoting an original from
//! one method to the next must never change it.

use originals_core::{ContentDigest, Sha256Accumulator};
use serde::{Deserialize, Serialize};

/// Where a resource's bytes live: inlined in the original, or fetched from
/// a URL at resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceLocation {
    Inline(Vec<u8>),
    Url(String),
}

/// A content-addressed resource bound to an `Original`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub content_hash: ContentDigest,
    pub media_type: String,
    pub size: u64,
    pub location: ResourceLocation,
}

impl Resource {
    /// Build a resource from its full content bytes, computing
    /// `content_hash` and `size` directly — resource content is arbitrary
    /// binary, not necessarily JSON-shaped, so this hashes raw bytes rather
    /// than going through `CanonicalBytes`.
    pub fn from_inline_bytes(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let mut acc = Sha256Accumulator::new();
        acc.update(&bytes);
        let content_hash = acc.finalize();
        let size = bytes.len() as u64;
        Self { content_hash, media_type: media_type.into(), size, location: ResourceLocation::Inline(bytes) }
    }

    /// Build a resource whose bytes are fetched externally; `content_hash`
    /// and `size` must be supplied by the caller since this SDK does not
    /// perform the fetch.
    pub fn from_url(media_type: impl Into<String>, url: impl Into<String>, content_hash: ContentDigest, size: u64) -> Self {
        Self { content_hash, media_type: media_type.into(), size, location: ResourceLocation::Url(url.into()) }
    }
}
