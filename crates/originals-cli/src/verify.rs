//! # Verify Subcommand
//!
//! Verifies a signed credential read from a file or stdin.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use originals_vc::{Credential, CredentialEngine};

/// Arguments for the `originals verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Path to a signed credential JSON file, or `-`/omitted for stdin.
    #[arg(long)]
    pub credential: Option<PathBuf>,
}

pub async fn run(args: &VerifyArgs) -> Result<()> {
    let bytes = crate::read_input(args.credential.as_deref())?;
    let credential: Credential = serde_json::from_slice(&bytes).context("input must be a signed credential")?;

    let engine = CredentialEngine::new();
    let result = engine.verify(&credential).await;

    crate::print_json(&result)?;
    if !result.ok {
        anyhow::bail!("credential failed verification");
    }
    Ok(())
}
