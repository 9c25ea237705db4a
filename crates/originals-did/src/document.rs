//! # DidDocument — Verification Material and Relationships
//!
//! Implements the `DidDocument`/`VerificationMethod` data model (spec §3)
//! and its cross-field invariant: every relationship id (`authentication`,
//! `assertion_method`) must either reference a `verification_method` entry
//! by id or be fully inlined.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DidError;

/// DID Core context list required for every document produced by this SDK
/// (spec §6).
pub const DID_CORE_CONTEXTS: [&str; 2] =
    ["https://www.w3.org/ns/did/v1", "https://w3id.org/security/multikey/v1"];

/// A verification method: a key bound to a DID, encoded as Multikey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    pub id: String,
    pub controller: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub public_key_multibase: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_key_multibase: Option<String>,
}

impl VerificationMethod {
    /// Construct a `Multikey`-typed verification method.
    pub fn multikey(id: impl Into<String>, controller: impl Into<String>, public_key_multibase: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            controller: controller.into(),
            type_: "Multikey".to_string(),
            public_key_multibase: public_key_multibase.into(),
            secret_key_multibase: None,
        }
    }
}

/// Either a bare id referencing a `verification_method` entry, or a fully
/// inlined verification method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VerificationRelationship {
    Id(String),
    Embedded(VerificationMethod),
}

impl VerificationRelationship {
    fn referenced_id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Embedded(vm) => &vm.id,
        }
    }
}

/// A DID document: verification material plus the relationships that use it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    #[serde(rename = "@context")]
    pub contexts: Vec<String>,
    pub id: String,
    pub verification_method: Vec<VerificationMethod>,
    pub authentication: Vec<VerificationRelationship>,
    pub assertion_method: Vec<VerificationRelationship>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<Vec<Value>>,
    /// The literal deactivation marker, `{"deactivated": true}`, if present
    /// at the document root (spec §4.5).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deactivated: Option<bool>,
}

impl DidDocument {
    /// Construct a minimal document with one Multikey verification method
    /// usable for both authentication and assertion.
    pub fn new_with_single_key(id: impl Into<String>, verification_method: VerificationMethod) -> Self {
        let vm_id = verification_method.id.clone();
        Self {
            contexts: DID_CORE_CONTEXTS.iter().map(|c| c.to_string()).collect(),
            id: id.into(),
            verification_method: vec![verification_method],
            authentication: vec![VerificationRelationship::Id(vm_id.clone())],
            assertion_method: vec![VerificationRelationship::Id(vm_id)],
            service: None,
            deactivated: None,
        }
    }

    /// Whether this document carries the literal deactivation marker.
    pub fn is_deactivated(&self) -> bool {
        self.deactivated == Some(true)
    }

    /// Validate the cross-field invariant: every relationship id either
    /// appears in `verification_method` or is fully inlined.
    pub fn validate(&self) -> Result<(), DidError> {
        if self.id.is_empty() {
            return Err(DidError::InvalidDocument("document id must not be empty".to_string()));
        }
        let known_ids: std::collections::HashSet<&str> =
            self.verification_method.iter().map(|vm| vm.id.as_str()).collect();

        for relationship in self.authentication.iter().chain(self.assertion_method.iter()) {
            if let VerificationRelationship::Id(id) = relationship {
                if !known_ids.contains(id.as_str()) {
                    return Err(DidError::InvalidDocument(format!(
                        "relationship references unknown verification method id: {id}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Look up a verification method by id, searching both the top-level
    /// list and any fully inlined relationship entries.
    pub fn find_verification_method(&self, id: &str) -> Option<&VerificationMethod> {
        if let Some(vm) = self.verification_method.iter().find(|vm| vm.id == id) {
            return Some(vm);
        }
        self.authentication
            .iter()
            .chain(self.assertion_method.iter())
            .find_map(|r| match r {
                VerificationRelationship::Embedded(vm) if vm.id == id => Some(vm),
                _ => None,
            })
    }

    /// Collect the ids of every `assertionMethod` relationship, resolving
    /// embedded entries to their own id.
    pub fn assertion_method_ids(&self) -> Vec<&str> {
        self.assertion_method.iter().map(|r| r.referenced_id()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> DidDocument {
        let vm = VerificationMethod::multikey("did:ex:abc#key-1", "did:ex:abc", "z6Mkxyz");
        DidDocument::new_with_single_key("did:ex:abc", vm)
    }

    #[test]
    fn validate_accepts_consistent_document() {
        assert!(sample_document().validate().is_ok());
    }

    #[test]
    fn validate_rejects_dangling_relationship_id() {
        let mut doc = sample_document();
        doc.authentication.push(VerificationRelationship::Id("did:ex:abc#missing".to_string()));
        assert!(doc.validate().is_err());
    }

    #[test]
    fn validate_accepts_inlined_relationship() {
        let mut doc = sample_document();
        let extra = VerificationMethod::multikey("did:ex:abc#key-2", "did:ex:abc", "z6Mkqqq");
        doc.authentication.push(VerificationRelationship::Embedded(extra));
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn is_deactivated_reads_marker() {
        let mut doc = sample_document();
        assert!(!doc.is_deactivated());
        doc.deactivated = Some(true);
        assert!(doc.is_deactivated());
    }

    #[test]
    fn find_verification_method_locates_top_level_entry() {
        let doc = sample_document();
        assert!(doc.find_verification_method("did:ex:abc#key-1").is_some());
        assert!(doc.find_verification_method("did:ex:abc#nope").is_none());
    }

    #[test]
    fn assertion_method_ids_resolves_references() {
        let doc = sample_document();
        assert_eq!(doc.assertion_method_ids(), vec!["did:ex:abc#key-1"]);
    }

    #[test]
    fn serializes_with_did_core_camel_case_field_names() {
        let doc = sample_document();
        let value = serde_json::to_value(&doc).unwrap();
        let obj = value.as_object().unwrap();
        assert!(obj.contains_key("verificationMethod"), "missing verificationMethod: {obj:?}");
        assert!(obj.contains_key("assertionMethod"), "missing assertionMethod: {obj:?}");
        assert!(obj.contains_key("@context"));
        assert!(!obj.contains_key("verification_method"));
        assert!(!obj.contains_key("assertion_method"));
    }
}
