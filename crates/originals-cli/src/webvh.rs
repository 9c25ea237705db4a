//! # Webvh Subcommand Group
//!
//! `init`/`append`/`verify` over a `did:webvh` update log rooted at
//! `--base-dir`, mirroring `originals_webvh::WebVHLog`'s own three
//! operations one-for-one.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use originals_did::{DidDocument, VerificationMethod};
use originals_webvh::WebVHLog;

/// Arguments for the `originals webvh` subcommand group.
#[derive(Args, Debug)]
pub struct WebvhArgs {
    #[command(subcommand)]
    pub command: WebvhCommand,
}

#[derive(Subcommand, Debug)]
pub enum WebvhCommand {
    /// Create a brand-new update log with a single verification method.
    Init(InitArgs),
    /// Append a new state to an existing update log.
    Append(AppendArgs),
    /// Recompute and verify a log's full hash chain and signatures.
    Verify(VerifyLogArgs),
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Directory update logs are rooted under.
    #[arg(long)]
    pub base_dir: PathBuf,

    /// The DID's domain, e.g. `example.com`.
    #[arg(long)]
    pub domain: String,

    /// Optional `did:webvh` path segments, in order.
    #[arg(long = "path-segment")]
    pub path_segments: Vec<String>,

    /// The update key, as a public multikey (same key signs the genesis entry).
    #[arg(long)]
    pub update_key: String,

    /// The update key's secret multikey.
    #[arg(long)]
    pub secret_key: String,
}

#[derive(Args, Debug)]
pub struct AppendArgs {
    #[arg(long)]
    pub base_dir: PathBuf,
    #[arg(long)]
    pub domain: String,
    #[arg(long = "path-segment")]
    pub path_segments: Vec<String>,

    /// Path to a JSON file holding the next `DidDocument` state.
    #[arg(long)]
    pub state: PathBuf,

    /// The authorized update key signing this entry.
    #[arg(long)]
    pub signer_key: String,
    #[arg(long)]
    pub secret_key: String,
}

#[derive(Args, Debug)]
pub struct VerifyLogArgs {
    #[arg(long)]
    pub base_dir: PathBuf,
    #[arg(long)]
    pub domain: String,
    #[arg(long = "path-segment")]
    pub path_segments: Vec<String>,
}

pub async fn run(args: &WebvhArgs) -> Result<()> {
    match &args.command {
        WebvhCommand::Init(a) => run_init(a).await,
        WebvhCommand::Append(a) => run_append(a).await,
        WebvhCommand::Verify(a) => run_verify(a).await,
    }
}

async fn run_init(args: &InitArgs) -> Result<()> {
    let log = WebVHLog::new(&args.base_dir);
    let update_key = args.update_key.clone();

    let entry = log
        .create(&args.domain, args.path_segments.clone(), update_key.clone(), &args.secret_key, |scid| {
            let mut did = format!("did:webvh:{}", args.domain);
            for segment in &args.path_segments {
                did.push(':');
                did.push_str(segment);
            }
            did.push(':');
            did.push_str(scid);
            let vm = VerificationMethod::multikey(format!("{did}#key-1"), did.clone(), update_key.clone());
            DidDocument::new_with_single_key(did, vm)
        })
        .await
        .context("failed to create update log")?;

    crate::print_json(&entry)
}

async fn run_append(args: &AppendArgs) -> Result<()> {
    let log = WebVHLog::new(&args.base_dir);
    let state_bytes = std::fs::read(&args.state).with_context(|| format!("reading {}", args.state.display()))?;
    let next_state: DidDocument = serde_json::from_slice(&state_bytes).context("state file must be a DidDocument")?;

    let entry = log
        .append(&args.domain, args.path_segments.clone(), next_state, &args.signer_key, &args.secret_key)
        .await
        .context("failed to append to update log")?;

    crate::print_json(&entry)
}

async fn run_verify(args: &VerifyLogArgs) -> Result<()> {
    let log = WebVHLog::new(&args.base_dir);
    let entries = log.verify(&args.domain, &args.path_segments).await.context("log verification failed")?;

    crate::print_json(&serde_json::json!({
        "entry_count": entries.len(),
        "latest_version_id": entries.last().map(|e| e.version_id.clone()),
        "deactivated": entries.last().map(|e| e.parameters.deactivated).unwrap_or(false),
    }))
}
