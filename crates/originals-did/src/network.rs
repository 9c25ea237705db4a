//! The three Bitcoin networks a `did:btco` identifier or inscription can
//! target (spec §6). Shared between `originals-did` and `originals-ordinals`.

use serde::{Deserialize, Serialize};

/// A Bitcoin network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Testnet,
    Signet,
}

impl Network {
    /// The `did:btco` prefix segment for this network (empty for mainnet).
    pub fn did_prefix(&self) -> &'static str {
        match self {
            Self::Mainnet => "",
            Self::Testnet => "test:",
            Self::Signet => "sig:",
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
            Self::Signet => "signet",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Self::Mainnet),
            "testnet" => Ok(Self::Testnet),
            "signet" => Ok(Self::Signet),
            other => Err(format!("unrecognized network: {other}")),
        }
    }
}
