//! # Issue Subcommand
//!
//! Builds an unsigned credential from a subject document (inline JSON file
//! or stdin) and a handful of flags, then issues a Data Integrity proof over
//! it via `originals_vc::CredentialEngine`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;

use originals_vc::{Credential, CredentialEngine};

/// Arguments for the `originals issue` subcommand.
#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Path to a JSON file holding the credential subject, or `-`/omitted
    /// for stdin. Must already contain `resource_id`, `resource_type`,
    /// `created_time`, and `creator`.
    #[arg(long)]
    pub subject: Option<PathBuf>,

    /// One or more credential types, beyond the implicit `VerifiableCredential`.
    #[arg(long = "type", value_name = "TYPE")]
    pub types: Vec<String>,

    /// The issuer DID or multikey.
    #[arg(long)]
    pub issuer: String,

    /// The verification method identifying the signing key.
    #[arg(long)]
    pub verification_method: String,

    /// The secret multikey to sign with.
    #[arg(long)]
    pub secret_key: String,

    /// The proof purpose (defaults to `assertionMethod`).
    #[arg(long, default_value = "assertionMethod")]
    pub proof_purpose: String,
}

pub fn run(args: &IssueArgs) -> Result<()> {
    let subject_bytes = crate::read_input(args.subject.as_deref())?;
    let credential_subject: serde_json::Value =
        serde_json::from_slice(&subject_bytes).context("subject must be a JSON object")?;

    let mut types = vec!["VerifiableCredential".to_string()];
    types.extend(args.types.iter().cloned());

    let credential = Credential {
        contexts: vec![Credential::BASE_CONTEXT.to_string()],
        id: None,
        types,
        issuer: args.issuer.clone(),
        issuance_date: Utc::now(),
        expiration_date: None,
        credential_subject,
        proof: None,
    };

    let engine = CredentialEngine::new();
    let signed = engine
        .issue(credential, &args.verification_method, &args.secret_key, &args.proof_purpose)
        .context("failed to issue credential")?;

    crate::print_json(&signed)
}
