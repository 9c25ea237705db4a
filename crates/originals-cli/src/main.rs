//! `originals` — CLI entry point.

use clap::{Parser, Subcommand};

use originals_cli::{inscribe, issue, keygen, utxo, verify, webvh};

#[derive(Parser, Debug)]
#[command(name = "originals", version, about = "Operator CLI for the Originals SDK")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a keypair for one of the three supported crypto suites.
    Keygen(keygen::KeygenArgs),
    /// Issue a Data Integrity proof over a credential subject.
    Issue(issue::IssueArgs),
    /// Verify a signed credential.
    Verify(verify::VerifyArgs),
    /// Inspect and manage `did:webvh` update logs.
    Webvh(webvh::WebvhArgs),
    /// Select UTXOs for a funding transaction.
    Utxo(utxo::UtxoArgs),
    /// Plan a Bitcoin ordinal inscription.
    Inscribe(inscribe::InscribeArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let runtime = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Keygen(args) => keygen::run(&args),
        Commands::Issue(args) => issue::run(&args),
        Commands::Verify(args) => runtime.block_on(verify::run(&args)),
        Commands::Webvh(args) => runtime.block_on(webvh::run(&args)),
        Commands::Utxo(args) => utxo::run(&args),
        Commands::Inscribe(args) => inscribe::run(&args),
    }
}
