//! # Inscribe Subcommand Group
//!
//! `plan` — a dry-run over `originals_ordinals::prepare_inscription` and
//! `plan_reveal`, reporting the commit address and reveal cost without
//! touching a wallet or broadcasting anything. `PreparedInscription` holds
//! non-`Serialize` `bitcoin` types (`ScriptBuf`, `TaprootSpendInfo`), so the
//! result is rendered as a hand-assembled JSON object rather than derived.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use bitcoin::key::UntweakedPublicKey;
use bitcoin::secp256k1::Secp256k1;
use clap::{Args, Subcommand};

use originals_ordinals::{plan_reveal, prepare_inscription};

/// Arguments for the `originals inscribe` subcommand group.
#[derive(Args, Debug)]
pub struct InscribeArgs {
    #[command(subcommand)]
    pub command: InscribeCommand,
}

#[derive(Subcommand, Debug)]
pub enum InscribeCommand {
    /// Derive the commit address and estimate the reveal cost for content.
    Plan(PlanArgs),
}

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Path to the content to inscribe.
    #[arg(long)]
    pub content: PathBuf,

    /// The content's MIME type.
    #[arg(long)]
    pub content_type: String,

    /// Path to a JSON file of metadata to embed (CBOR-encoded in the envelope).
    #[arg(long)]
    pub metadata: Option<PathBuf>,

    /// The x-only (32-byte) public key the reveal transaction spends with,
    /// hex-encoded.
    #[arg(long)]
    pub reveal_pubkey: String,

    /// `mainnet`, `testnet`, or `signet`.
    #[arg(long)]
    pub network: String,

    /// Fee rate in sats/vByte, for the reveal transaction's cost estimate.
    #[arg(long)]
    pub fee_rate: u64,
}

pub fn run(args: &InscribeArgs) -> Result<()> {
    match &args.command {
        InscribeCommand::Plan(a) => run_plan(a),
    }
}

fn run_plan(args: &PlanArgs) -> Result<()> {
    let content = std::fs::read(&args.content).with_context(|| format!("reading {}", args.content.display()))?;

    let metadata: Option<serde_json::Value> = args
        .metadata
        .as_ref()
        .map(|p| -> Result<serde_json::Value> {
            let bytes = std::fs::read(p).with_context(|| format!("reading {}", p.display()))?;
            Ok(serde_json::from_slice(&bytes)?)
        })
        .transpose()?;

    let reveal_pubkey = UntweakedPublicKey::from_str(&args.reveal_pubkey)
        .context("reveal-pubkey must be a 32-byte x-only public key, hex-encoded")?;
    let network = parse_network(&args.network)?;

    let secp = Secp256k1::new();
    let prepared = prepare_inscription(&secp, &content, &args.content_type, metadata.as_ref(), reveal_pubkey, network)
        .context("failed to prepare inscription")?;

    let plan = plan_reveal(content.len() as u64, args.fee_rate);

    crate::print_json(&serde_json::json!({
        "commit_address": prepared.commit_address.to_string(),
        "reveal_vsize": plan.vsize,
        "reveal_fee_sats": plan.fee_sats,
        "content_bytes": content.len(),
    }))
}

fn parse_network(s: &str) -> Result<bitcoin::Network> {
    match s {
        "mainnet" => Ok(bitcoin::Network::Bitcoin),
        "testnet" => Ok(bitcoin::Network::Testnet),
        "signet" => Ok(bitcoin::Network::Signet),
        other => anyhow::bail!("unknown network `{other}`; expected mainnet, testnet, or signet"),
    }
}
