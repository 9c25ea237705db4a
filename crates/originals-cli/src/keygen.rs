//! # Keygen Subcommand
//!
//! Generates a keypair for one of the three crypto suites this SDK supports.
//! `originals_crypto::Suite` has no `clap::ValueEnum` impl of its own (it is a
//! pure domain type with no CLI concerns), so this module owns the
//! translation.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde_json::json;

use originals_crypto::{KeyManager, Suite};

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum SuiteArg {
    Secp256k1,
    Ed25519,
    P256,
}

impl From<SuiteArg> for Suite {
    fn from(arg: SuiteArg) -> Self {
        match arg {
            SuiteArg::Secp256k1 => Suite::Secp256k1,
            SuiteArg::Ed25519 => Suite::Ed25519,
            SuiteArg::P256 => Suite::P256,
        }
    }
}

/// Arguments for the `originals keygen` subcommand.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Crypto suite to generate a keypair for.
    #[arg(long, value_enum)]
    pub suite: SuiteArg,

    /// Deterministic 32-byte hex seed. Omit for a fresh random keypair.
    #[arg(long)]
    pub seed_hex: Option<String>,
}

pub fn run(args: &KeygenArgs) -> Result<()> {
    let suite: Suite = args.suite.into();

    let keypair = match &args.seed_hex {
        Some(hex) => {
            let seed = decode_hex_seed(hex)?;
            KeyManager::from_seed(suite, &seed)
        }
        None => KeyManager::generate(suite),
    };

    crate::print_json(&json!({
        "suite": suite.to_string(),
        "public_multikey": keypair.public_multikey(),
        "secret_multikey": keypair.secret_multikey(),
    }))
}

/// Decode a 32-byte hex-encoded seed, mirroring the manual hex decoding
/// `originals_core::ContentDigest::from_hex` uses.
fn decode_hex_seed(hex: &str) -> Result<[u8; 32]> {
    if hex.len() != 64 {
        anyhow::bail!("seed must be 64 hex chars (32 bytes), got {}", hex.len());
    }
    let mut seed = [0u8; 32];
    for i in 0..32 {
        seed[i] = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|_| anyhow::anyhow!("invalid hex at position {}", i * 2))?;
    }
    Ok(seed)
}
