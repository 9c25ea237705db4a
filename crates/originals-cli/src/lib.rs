//! # originals-cli — Operator Surface for the Originals SDK
//!
//! A thin clap-derived front end over the library crates: no functionality
//! lives here beyond argument parsing, file/stdin I/O, and JSON rendering of
//! results the domain crates already compute.
//!
//! ## Crate Policy
//!
//! - CLI parsing is separated from business logic: every subcommand module
//!   exposes a `run_*` function taking already-parsed `Args` plus whatever
//!   domain handles it needs, and returns `anyhow::Result<()>`.
//! - Handlers call straight into `originals-core`/`originals-crypto`/
//!   `originals-vc`/`originals-did`/`originals-webvh`/`originals-ordinals`;
//!   none of the six subcommand groups re-implements anything the library
//!   crates already provide.
//! - Output is newline-terminated pretty-printed JSON on stdout; diagnostics
//!   and progress go to `tracing` on stderr.

pub mod inscribe;
pub mod issue;
pub mod keygen;
pub mod utxo;
pub mod verify;
pub mod webvh;

/// Read `path`'s contents, or stdin when `path` is `None`/`"-"`.
pub(crate) fn read_input(path: Option<&std::path::Path>) -> anyhow::Result<Vec<u8>> {
    use std::io::Read;

    match path {
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
        Some(p) if p == std::path::Path::new("-") => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
        Some(p) => Ok(std::fs::read(p)?),
    }
}

/// Print `value` as pretty JSON to stdout.
pub(crate) fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
