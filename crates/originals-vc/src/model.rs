//! # Verifiable Credential Data Model
//!
//! `Credential`, `Proof`, and `Presentation` per spec §3. Credential
//! subjects are modeled as a `serde_json::Value` map rather than a fixed
//! struct — per the "dynamic credential shapes" redesign note (spec §9),
//! this is the one place in the SDK that keeps an untyped `Value`, so that
//! adding a new credential kind never requires a breaking schema change.
//! `Credential::validate_subject_shape` enforces the minimum required
//! fields at the boundary instead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::VcError;

/// A Data Integrity proof over a credential or presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proof {
    #[serde(rename = "type")]
    pub type_: String,
    pub cryptosuite: String,
    pub created: DateTime<Utc>,
    pub verification_method: String,
    pub proof_purpose: String,
    pub proof_value: String,
}

/// A W3C Verifiable Credential with an optional (pre-issuance) proof.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credential {
    #[serde(rename = "@context")]
    pub contexts: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub types: Vec<String>,
    pub issuer: String,
    pub issuance_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    pub credential_subject: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
}

const REQUIRED_SUBJECT_FIELDS: [&str; 4] = ["resource_id", "resource_type", "created_time", "creator"];

impl Credential {
    /// The base VC context, always present per spec §6.
    pub const BASE_CONTEXT: &'static str = "https://www.w3.org/2018/credentials/v1";

    /// A credential with `proof` removed, for canonicalization in the
    /// pre-sign digest (spec §4.4 step 2).
    pub fn without_proof(&self) -> Credential {
        let mut c = self.clone();
        c.proof = None;
        c
    }

    /// Enforce the minimum subject shape required by spec §3:
    /// `{resource_id, resource_type, created_time, creator}`.
    pub fn validate_subject_shape(&self) -> Result<(), VcError> {
        let Value::Object(map) = &self.credential_subject else {
            return Err(VcError::InvalidShape(
                "credentialSubject must be a JSON object".to_string(),
            ));
        };
        for field in REQUIRED_SUBJECT_FIELDS {
            if !map.contains_key(field) {
                return Err(VcError::InvalidShape(format!(
                    "credentialSubject missing required field `{field}`"
                )));
            }
        }
        Ok(())
    }
}

/// A `VerifiablePresentation` wrapping one or more credentials, preserving
/// input order (spec §4.4 `createPresentation`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    #[serde(rename = "@context")]
    pub contexts: Vec<String>,
    #[serde(rename = "type")]
    pub types: Vec<String>,
    pub holder: String,
    pub verifiable_credential: Vec<Credential>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<Proof>,
}

/// Build a presentation from an ordered set of credentials. Input order is
/// preserved in `verifiable_credential` per spec §4.4.
pub fn create_presentation(credentials: Vec<Credential>, holder: impl Into<String>) -> Presentation {
    Presentation {
        contexts: vec![Credential::BASE_CONTEXT.to_string()],
        types: vec!["VerifiablePresentation".to_string()],
        holder: holder.into(),
        verifiable_credential: credentials,
        proof: None,
    }
}

/// The outcome of [`crate::engine::CredentialEngine::verify`]. Verification
/// never throws (spec §4.4, §9) — every failure is folded into `ok=false`
/// with a human-readable reason in `errors`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VerificationResult {
    pub ok: bool,
    pub errors: Vec<String>,
}

impl VerificationResult {
    pub fn success() -> Self {
        Self { ok: true, errors: Vec::new() }
    }

    pub fn failure(reason: impl Into<String>) -> Self {
        Self { ok: false, errors: vec![reason.into()] }
    }
}

/// Options used to compute the proof pre-sign digest; distinct from
/// [`Proof`] only in that `proof_value` has not yet been computed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProofOptions {
    #[serde(rename = "type")]
    pub type_: String,
    pub cryptosuite: String,
    pub created: DateTime<Utc>,
    pub verification_method: String,
    pub proof_purpose: String,
}

impl ProofOptions {
    pub(crate) fn into_map(self) -> Map<String, Value> {
        match serde_json::to_value(self).unwrap_or(Value::Null) {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_credential() -> Credential {
        Credential {
            contexts: vec![Credential::BASE_CONTEXT.to_string()],
            id: Some("urn:uuid:abc".to_string()),
            types: vec!["VerifiableCredential".to_string(), "ResourceCreated".to_string()],
            issuer: "did:ex:issuer".to_string(),
            issuance_date: DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
            expiration_date: None,
            credential_subject: json!({
                "resource_id": "r1",
                "resource_type": "original",
                "created_time": "2024-01-01T00:00:00Z",
                "creator": "did:ex:issuer",
            }),
            proof: None,
        }
    }

    #[test]
    fn validate_subject_shape_accepts_complete_subject() {
        assert!(sample_credential().validate_subject_shape().is_ok());
    }

    #[test]
    fn validate_subject_shape_rejects_missing_field() {
        let mut c = sample_credential();
        c.credential_subject = json!({"resource_id": "r1"});
        assert!(c.validate_subject_shape().is_err());
    }

    #[test]
    fn without_proof_strips_proof() {
        let mut c = sample_credential();
        c.proof = Some(Proof {
            type_: "DataIntegrityProof".to_string(),
            cryptosuite: "eddsa-rdfc-2022".to_string(),
            created: Utc::now(),
            verification_method: "did:ex:issuer#key-1".to_string(),
            proof_purpose: "assertionMethod".to_string(),
            proof_value: "zabc".to_string(),
        });
        assert!(c.without_proof().proof.is_none());
        assert!(c.proof.is_some());
    }

    #[test]
    fn create_presentation_preserves_order() {
        let c1 = sample_credential();
        let mut c2 = sample_credential();
        c2.id = Some("urn:uuid:def".to_string());
        let presentation = create_presentation(vec![c1.clone(), c2.clone()], "did:ex:holder");
        assert_eq!(presentation.verifiable_credential[0].id, c1.id);
        assert_eq!(presentation.verifiable_credential[1].id, c2.id);
    }
}
