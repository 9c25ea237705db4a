//! # Utxo Subcommand Group
//!
//! `select` over a candidate set read from a JSON file, printed as a manual
//! JSON object since `originals_ordinals::SelectionResult` is not `Serialize`
//! (its fields are assembled fresh each selection, not round-tripped).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use originals_ordinals::{select_utxos, SelectionRequest, Utxo};

/// Arguments for the `originals utxo` subcommand group.
#[derive(Args, Debug)]
pub struct UtxoArgs {
    #[command(subcommand)]
    pub command: UtxoCommand,
}

#[derive(Subcommand, Debug)]
pub enum UtxoCommand {
    /// Select a UTXO set covering a target amount plus fee.
    Select(SelectArgs),
}

#[derive(Args, Debug)]
pub struct SelectArgs {
    /// Path to a JSON file holding a `Vec<Utxo>` of spendable candidates.
    #[arg(long)]
    pub utxos: PathBuf,

    /// Target amount to cover, in satoshis.
    #[arg(long)]
    pub target_sats: u64,

    /// Fee rate in sats/vByte.
    #[arg(long)]
    pub fee_rate: i64,

    /// Exclude inscription-bearing UTXOs from the candidate set.
    #[arg(long)]
    pub forbid_inscription_bearing: bool,

    /// Path to a JSON file holding the one UTXO that must be spent first
    /// (the satoshi being inscribed), if any.
    #[arg(long)]
    pub required_utxo: Option<PathBuf>,
}

pub fn run(args: &UtxoArgs) -> Result<()> {
    match &args.command {
        UtxoCommand::Select(a) => run_select(a),
    }
}

fn run_select(args: &SelectArgs) -> Result<()> {
    let utxos_bytes = std::fs::read(&args.utxos).with_context(|| format!("reading {}", args.utxos.display()))?;
    let utxos: Vec<Utxo> = serde_json::from_slice(&utxos_bytes).context("utxos file must be a JSON array of Utxo")?;

    let required_inscription_utxo = args
        .required_utxo
        .as_ref()
        .map(|p| -> Result<Utxo> {
            let bytes = std::fs::read(p).with_context(|| format!("reading {}", p.display()))?;
            Ok(serde_json::from_slice(&bytes)?)
        })
        .transpose()?;

    let request = SelectionRequest {
        target_sats: args.target_sats,
        fee_rate_sats_per_vb: args.fee_rate,
        forbid_inscription_bearing_inputs: args.forbid_inscription_bearing,
        required_inscription_utxo,
    };

    let result = select_utxos(&utxos, &request).context("UTXO selection failed")?;

    crate::print_json(&serde_json::json!({
        "selected": result.selected,
        "change_sats": result.change_sats,
        "fee_sats": result.fee_sats,
    }))
}
