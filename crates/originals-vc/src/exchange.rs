//! # VcExchangeProvider — Credential-Exchange Interface
//!
//! Credential-exchange workflow servers (DIDComm, OID4VCI, or any
//! request/response protocol for moving a `Presentation` between holder and
//! verifier) are explicitly out of scope for this SDK; only the interface
//! they are consumed through is named here, mirroring `DocumentLoader` and
//! `originals-ordinals::BitcoinBuilder` — a trait this crate defines and an
//! embedding application implements.

use async_trait::async_trait;

use crate::error::VcError;
use crate::model::{Credential, Presentation};

/// Sends and receives credentials over whatever exchange protocol the
/// embedding application wires in. This crate never implements one.
#[async_trait]
pub trait VcExchangeProvider: Send + Sync {
    /// Offer `credential` to `recipient_endpoint` for acceptance or storage.
    async fn offer(&self, credential: &Credential, recipient_endpoint: &str) -> Result<(), VcError>;

    /// Request a presentation from `holder_endpoint` satisfying `presentation_request`.
    async fn request_presentation(
        &self,
        holder_endpoint: &str,
        presentation_request: &serde_json::Value,
    ) -> Result<Presentation, VcError>;
}
