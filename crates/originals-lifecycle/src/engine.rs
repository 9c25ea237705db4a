//! # LifecycleEngine — Stage Transitions and Cross-Layer Invariants
//!
//! Implements spec §4.11: the coordinator that exclusively owns `Original`
//! and enforces its stage transitions (`peer → webvh → btco`, plus
//! `btco → btco` updates and deactivation). Grounded on the teacher's
//! typestate state machines (`msez-state::corridor`) for the *shape* of a
//! guarded transition — evidence in, new state out, one log entry appended
//! per transition — generalized to runtime-checked transitions since the
//! originating stage is loaded from storage, not known at compile time
//! (the same tradeoff the teacher makes with `DynCorridor::try_transition`
//! for persisted, as opposed to freshly-constructed, state).

use std::sync::Arc;
use std::time::Duration;

use bitcoin::key::UntweakedPublicKey;
use bitcoin::secp256k1::Secp256k1;
use bitcoin::Address;
use chrono::Utc;
use originals_crypto::Suite;
use originals_did::{Identifier, Network};
use originals_ordinals::{
    assert_sat_uncontested, plan_reveal, prepare_inscription, retry_gateway_call, select_utxos, BitcoinBuilder,
    FeeOracle, OrdinalsGateway, SelectionRequest, Utxo, DEFAULT_MAX_ATTEMPTS, DUST_LIMIT,
};
use originals_vc::{Credential, CredentialEngine};
use originals_webvh::WebVHLog;
use serde_json::json;

use crate::error::LifecycleError;
use crate::original::Original;

/// Explicit configuration for a [`LifecycleEngine`] — no ambient or global
/// state is read (spec §5, §9 "context-driven state sharing" redesign
/// flag).
#[derive(Debug, Clone)]
pub struct LifecycleEngineConfig {
    pub network: Network,
    /// Suite used for freshly generated `did:webvh` update keys.
    pub suite: Suite,
    /// How many times to poll `OrdinalsGateway::get_transaction_status`
    /// before treating a broadcast as unconfirmed (spec §4.11 "on
    /// confirmation timeout → return Pending").
    pub max_confirmation_polls: u32,
    pub poll_interval: Duration,
}

impl Default for LifecycleEngineConfig {
    fn default() -> Self {
        Self {
            network: Network::Mainnet,
            suite: Suite::Ed25519,
            max_confirmation_polls: 5,
            poll_interval: Duration::from_millis(200),
        }
    }
}

/// Everything needed to inscribe, update, or deactivate a satoshi-bound
/// original. One struct so the three transitions (`inscribe`,
/// `update_btco`, `deactivate`) share a single parameter shape.
pub struct InscriptionRequest {
    pub utxos: Vec<Utxo>,
    pub fee_rate_sats_per_vb: i64,
    pub sat: u64,
    pub document_bytes: Vec<u8>,
    pub content_type: String,
    pub reveal_pubkey: UntweakedPublicKey,
    pub destination: Address,
    pub issuer_verification_method: String,
    pub issuer_secret_key_multibase: String,
}

/// Coordinates `Original`'s stage transitions. Holds the concrete
/// `WebVHLog`/`OrdinalsGateway`/`BitcoinBuilder`/`FeeOracle` an embedding
/// application wires in — `originals-lifecycle` is the composition root
/// `originals-did`'s doc comments refer to.
pub struct LifecycleEngine {
    credential_engine: CredentialEngine,
    webvh_log: Arc<WebVHLog>,
    gateway: Arc<dyn OrdinalsGateway>,
    builder: Arc<dyn BitcoinBuilder>,
    #[allow(dead_code)]
    fee_oracle: Arc<dyn FeeOracle>,
    config: LifecycleEngineConfig,
}

impl LifecycleEngine {
    pub fn new(
        webvh_log: Arc<WebVHLog>,
        gateway: Arc<dyn OrdinalsGateway>,
        builder: Arc<dyn BitcoinBuilder>,
        fee_oracle: Arc<dyn FeeOracle>,
        config: LifecycleEngineConfig,
    ) -> Self {
        Self { credential_engine: CredentialEngine::new(), webvh_log, gateway, builder, fee_oracle, config }
    }

    /// `peer → webvh` (spec §4.11): generate a fresh update key, synthesize
    /// a DID document, create the genesis log entry, and append a
    /// `ResourceMigrated` credential referencing the prior `peer` id.
    #[tracing::instrument(skip(self, original, issuer_secret_key_multibase))]
    pub async fn promote_to_webvh(
        &self,
        mut original: Original,
        domain: &str,
        path_segments: &[String],
        issuer_verification_method: &str,
        issuer_secret_key_multibase: &str,
    ) -> Result<Original, LifecycleError> {
        let Identifier::Peer { .. } = &original.id else {
            return Err(LifecycleError::InvalidTransition(format!(
                "promote_to_webvh requires a did:peer original, found {}",
                original.id
            )));
        };
        let prior_id = original.id.to_string();

        let fresh = originals_crypto::KeyManager::generate(self.config.suite);
        let update_key = fresh.public_multikey();
        let update_secret = fresh.secret_multikey();

        let segments_owned = path_segments.to_vec();
        let public_key_multibase = update_key.clone();
        let state_builder = move |scid: &str| {
            let mut did = format!("did:webvh:{domain}");
            for segment in &segments_owned {
                did.push(':');
                did.push_str(segment);
            }
            did.push(':');
            did.push_str(scid);
            let vm = originals_did::VerificationMethod::multikey(format!("{did}#key-1"), did.clone(), public_key_multibase);
            originals_did::DidDocument::new_with_single_key(did, vm)
        };

        let entry = self
            .webvh_log
            .create(domain, path_segments.to_vec(), update_key, &update_secret, state_builder)
            .await
            .map_err(|e| LifecycleError::Webvh(e.to_string()))?;

        let new_id = Identifier::WebVh {
            domain: domain.to_string(),
            path_segments: path_segments.to_vec(),
            scid: entry.parameters.scid.clone(),
        };

        let subject = self.migration_subject(&original, &new_id, &prior_id, issuer_verification_method)?;
        let credential =
            new_unsigned_credential(vec!["ResourceMigrated".to_string()], issuer_verification_method, subject);
        let signed =
            self.credential_engine.issue(credential, issuer_verification_method, issuer_secret_key_multibase, "assertionMethod")?;
        original.append_credential(signed)?;
        original.id = new_id;
        tracing::info!(original_id = %original.id, "promoted original to webvh");
        Ok(original)
    }

    /// `peer|webvh → btco` (spec §4.11): build and broadcast the
    /// commit/reveal pair, wait for acceptance, bind the original to
    /// `req.sat`.
    #[tracing::instrument(skip(self, original, req))]
    pub async fn inscribe(&self, mut original: Original, req: InscriptionRequest) -> Result<Original, LifecycleError> {
        if matches!(original.id, Identifier::Btco { .. }) {
            return Err(LifecycleError::InvalidTransition(
                "original is already bound to a satoshi; use update_btco".to_string(),
            ));
        }
        let prior_id = original.id.to_string();

        let (reveal_txid, index) = self.reveal_on_sat(&req, None).await?;

        let new_id = Identifier::Btco { network: self.config.network, sat: req.sat, index };
        let subject = self.migration_subject(&original, &new_id, &prior_id, &req.issuer_verification_method)?;
        let mut subject_map = subject;
        subject_map["reveal_txid"] = json!(reveal_txid);
        let credential = new_unsigned_credential(
            vec!["ResourceMigrated".to_string()],
            &req.issuer_verification_method,
            subject_map,
        );
        let signed = self.credential_engine.issue(
            credential,
            &req.issuer_verification_method,
            &req.issuer_secret_key_multibase,
            "assertionMethod",
        )?;
        original.append_credential(signed)?;
        original.id = new_id;
        tracing::info!(original_id = %original.id, reveal_txid, "inscribed original");
        Ok(original)
    }

    /// Resume an `inscribe` that failed after the commit transaction was
    /// already broadcast (spec §4.11 "on reveal failure after commit
    /// success → retain commit artifacts; expose a resume path").
    #[tracing::instrument(skip(self, original, req, commit_txid))]
    pub async fn resume_inscription(
        &self,
        mut original: Original,
        req: InscriptionRequest,
        commit_txid: &str,
    ) -> Result<Original, LifecycleError> {
        if matches!(original.id, Identifier::Btco { .. }) {
            return Err(LifecycleError::InvalidTransition(
                "original is already bound to a satoshi; use update_btco".to_string(),
            ));
        }
        let prior_id = original.id.to_string();
        let (reveal_txid, index) = self.reveal_on_sat(&req, Some(commit_txid)).await?;

        let new_id = Identifier::Btco { network: self.config.network, sat: req.sat, index };
        let mut subject = self.migration_subject(&original, &new_id, &prior_id, &req.issuer_verification_method)?;
        subject["reveal_txid"] = json!(reveal_txid);
        subject["resumed_from_commit_txid"] = json!(commit_txid);
        let credential = new_unsigned_credential(
            vec!["ResourceMigrated".to_string()],
            &req.issuer_verification_method,
            subject,
        );
        let signed = self.credential_engine.issue(
            credential,
            &req.issuer_verification_method,
            &req.issuer_secret_key_multibase,
            "assertionMethod",
        )?;
        original.append_credential(signed)?;
        original.id = new_id;
        Ok(original)
    }

    /// `btco → btco` (spec §4.11): inscribe a new envelope on the same
    /// satoshi the original is already bound to; resolution follows
    /// "latest valid inscription wins".
    #[tracing::instrument(skip(self, original, req))]
    pub async fn update_btco(&self, mut original: Original, req: InscriptionRequest) -> Result<Original, LifecycleError> {
        let Identifier::Btco { sat, .. } = &original.id else {
            return Err(LifecycleError::InvalidTransition(format!(
                "update_btco requires a did:btco original, found {}",
                original.id
            )));
        };
        if *sat != req.sat {
            return Err(LifecycleError::InvalidTransition(
                "a btco original is bound to exactly one satoshi for its lifetime".to_string(),
            ));
        }

        let (reveal_txid, _index) = self.reveal_on_sat(&req, None).await?;

        let mut subject = base_subject(&original, &req.issuer_verification_method)?;
        subject["reveal_txid"] = json!(reveal_txid);
        let credential = new_unsigned_credential(
            vec!["ResourceUpdated".to_string()],
            &req.issuer_verification_method,
            subject,
        );
        let signed = self.credential_engine.issue(
            credential,
            &req.issuer_verification_method,
            &req.issuer_secret_key_multibase,
            "assertionMethod",
        )?;
        original.append_credential(signed)?;
        tracing::info!(original_id = %original.id, reveal_txid, "updated btco original");
        Ok(original)
    }

    /// Inscribe the literal `{"deactivated": true}` marker on the
    /// original's bound satoshi (spec §4.11, §9 "deactivation write path"
    /// resolution: always explicit, never implicit).
    #[tracing::instrument(skip(self, original, req))]
    pub async fn deactivate(&self, mut original: Original, mut req: InscriptionRequest) -> Result<Original, LifecycleError> {
        if !matches!(original.id, Identifier::Btco { .. }) {
            return Err(LifecycleError::InvalidTransition(
                "deactivate requires a did:btco original".to_string(),
            ));
        }
        req.document_bytes = serde_json::to_vec(&json!({"deactivated": true}))
            .expect("a static JSON literal always serializes");
        req.content_type = "application/did+json".to_string();

        let (reveal_txid, _index) = self.reveal_on_sat(&req, None).await?;

        let mut subject = base_subject(&original, &req.issuer_verification_method)?;
        subject["reveal_txid"] = json!(reveal_txid);
        let credential = new_unsigned_credential(
            vec!["ResourceDeactivated".to_string()],
            &req.issuer_verification_method,
            subject,
        );
        let signed = self.credential_engine.issue(
            credential,
            &req.issuer_verification_method,
            &req.issuer_secret_key_multibase,
            "assertionMethod",
        )?;
        original.append_credential(signed)?;
        tracing::info!(original_id = %original.id, reveal_txid, "deactivated btco original");
        Ok(original)
    }

    /// Shared commit/reveal pipeline for `inscribe`, `update_btco`, and
    /// `deactivate`. If `existing_commit_txid` is `Some`, the commit step
    /// is skipped — this is the resume path after a reveal failure.
    async fn reveal_on_sat(
        &self,
        req: &InscriptionRequest,
        existing_commit_txid: Option<&str>,
    ) -> Result<(String, u32), LifecycleError> {
        let network = self.config.network;
        let sat_info = retry_gateway_call("get_sat_info", DEFAULT_MAX_ATTEMPTS, || self.gateway.get_sat_info(network, req.sat))
            .await?;
        let index = sat_info.inscription_ids.len() as u32;

        let secp = Secp256k1::new();
        let prepared = prepare_inscription(
            &secp,
            &req.document_bytes,
            &req.content_type,
            None::<&serde_json::Value>,
            req.reveal_pubkey,
            bitcoin_network_for(network),
        )?;

        let commit_txid = if let Some(txid) = existing_commit_txid {
            txid.to_string()
        } else {
            let selection = select_utxos(
                &req.utxos,
                &SelectionRequest {
                    target_sats: DUST_LIMIT,
                    fee_rate_sats_per_vb: req.fee_rate_sats_per_vb,
                    forbid_inscription_bearing_inputs: true,
                    required_inscription_utxo: None,
                },
            )?;
            let commit_tx = self
                .builder
                .build_commit_transaction(&selection.selected, &prepared.commit_address, DUST_LIMIT, selection.change_sats, selection.fee_sats)
                .await?;
            let txid = retry_gateway_call("broadcast_commit", DEFAULT_MAX_ATTEMPTS, || self.gateway.broadcast_transaction(network, &commit_tx))
                .await?;
            self.wait_for_status(&txid, false).await?;
            txid
        };

        assert_sat_uncontested(self.gateway.as_ref(), network, req.sat, &sat_info.inscription_ids).await?;

        let reveal_fee = plan_reveal(req.document_bytes.len() as u64, req.fee_rate_sats_per_vb.max(0) as u64).fee_sats;
        let reveal_tx = self
            .builder
            .build_reveal_transaction(&commit_txid, 0, &prepared, DUST_LIMIT, reveal_fee, &req.destination)
            .await?;
        let reveal_txid = retry_gateway_call("broadcast_reveal", DEFAULT_MAX_ATTEMPTS, || self.gateway.broadcast_transaction(network, &reveal_tx))
            .await
            .map_err(|e| LifecycleError::ConfirmationPending {
                commit_txid: commit_txid.clone(),
                reason: format!("reveal broadcast failed: {e}"),
            })?;
        self.wait_for_confirmation(&commit_txid, &reveal_txid).await?;

        Ok((reveal_txid, index))
    }

    async fn wait_for_status(&self, txid: &str, require_confirmed: bool) -> Result<(), LifecycleError> {
        for _ in 0..self.config.max_confirmation_polls {
            match self.gateway.get_transaction_status(self.config.network, txid).await {
                Ok(status) if !require_confirmed || status.confirmed => return Ok(()),
                Ok(_) => tokio::time::sleep(self.config.poll_interval).await,
                Err(_) => tokio::time::sleep(self.config.poll_interval).await,
            }
        }
        Err(LifecycleError::ConfirmationPending {
            commit_txid: txid.to_string(),
            reason: "transaction not observed within the polling budget".to_string(),
        })
    }

    async fn wait_for_confirmation(&self, commit_txid: &str, reveal_txid: &str) -> Result<(), LifecycleError> {
        for _ in 0..self.config.max_confirmation_polls {
            match self.gateway.get_transaction_status(self.config.network, reveal_txid).await {
                Ok(status) if status.confirmed => return Ok(()),
                _ => tokio::time::sleep(self.config.poll_interval).await,
            }
        }
        Err(LifecycleError::ConfirmationPending {
            commit_txid: commit_txid.to_string(),
            reason: format!("reveal {reveal_txid} not yet confirmed"),
        })
    }

    fn migration_subject(
        &self,
        original: &Original,
        new_id: &Identifier,
        prior_id: &str,
        creator: &str,
    ) -> Result<serde_json::Value, LifecycleError> {
        let mut subject = base_subject(original, creator)?;
        subject["migrated_to"] = json!(new_id.to_string());
        subject["migrated_from"] = json!(prior_id);
        Ok(subject)
    }
}

fn base_subject(original: &Original, creator: &str) -> Result<serde_json::Value, LifecycleError> {
    let mut subject = json!({
        "resource_id": original.id.to_string(),
        "resource_type": "original",
        "created_time": originals_core::Timestamp::now().to_iso8601(),
        "creator": creator,
    });
    if let Some(hash) = original.last_entry_hash()? {
        subject["previous_entry_hash"] = json!(hash.to_hex());
    }
    Ok(subject)
}

fn new_unsigned_credential(types: Vec<String>, issuer: &str, subject: serde_json::Value) -> Credential {
    let mut all_types = vec!["VerifiableCredential".to_string()];
    all_types.extend(types);
    Credential {
        contexts: vec![Credential::BASE_CONTEXT.to_string()],
        id: None,
        types: all_types,
        issuer: issuer.to_string(),
        issuance_date: Utc::now(),
        expiration_date: None,
        credential_subject: subject,
        proof: None,
    }
}

fn bitcoin_network_for(network: Network) -> bitcoin::Network {
    match network {
        Network::Mainnet => bitcoin::Network::Bitcoin,
        Network::Testnet => bitcoin::Network::Testnet,
        Network::Signet => bitcoin::Network::Signet,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;
    use bitcoin::secp256k1::{Keypair, Secp256k1, SecretKey};
    use originals_crypto::KeyManager;
    use originals_ordinals::{PreparedInscription, Utxo};
    use tempfile::tempdir;

    struct MockGateway {
        inscription_ids: StdMutex<Vec<String>>,
    }

    #[async_trait]
    impl OrdinalsGateway for MockGateway {
        async fn get_sat_info(&self, _network: Network, sat: u64) -> Result<originals_ordinals::SatInfo, originals_ordinals::OrdinalsError> {
            Ok(originals_ordinals::SatInfo { sat, inscription_ids: self.inscription_ids.lock().unwrap().clone() })
        }

        async fn resolve_inscription(
            &self,
            _network: Network,
            _inscription_id: &str,
        ) -> Result<originals_did::DidResolutionResult, originals_ordinals::OrdinalsError> {
            unimplemented!("not exercised by LifecycleEngine")
        }

        async fn get_metadata(&self, _network: Network, _inscription_id: &str) -> Result<Vec<u8>, originals_ordinals::OrdinalsError> {
            Ok(vec![])
        }

        async fn broadcast_transaction(&self, _network: Network, _raw_tx: &[u8]) -> Result<String, originals_ordinals::OrdinalsError> {
            Ok("txid-mock".to_string())
        }

        async fn get_transaction_status(
            &self,
            _network: Network,
            txid: &str,
        ) -> Result<originals_ordinals::TransactionStatus, originals_ordinals::OrdinalsError> {
            Ok(originals_ordinals::TransactionStatus { txid: txid.to_string(), confirmations: 1, confirmed: true })
        }

        async fn estimate_fee(&self, _network: Network, _blocks: u32) -> Result<u64, originals_ordinals::OrdinalsError> {
            Ok(1)
        }
    }

    struct MockBuilder;

    #[async_trait]
    impl BitcoinBuilder for MockBuilder {
        async fn build_commit_transaction(
            &self,
            _inputs: &[Utxo],
            _commit_address: &Address,
            _commit_value_sats: u64,
            _change_sats: u64,
            _fee_sats: u64,
        ) -> Result<Vec<u8>, originals_ordinals::OrdinalsError> {
            Ok(vec![0u8; 10])
        }

        async fn build_reveal_transaction(
            &self,
            _commit_txid: &str,
            _commit_vout: u32,
            _prepared: &PreparedInscription,
            _reveal_value_sats: u64,
            _fee_sats: u64,
            _destination: &Address,
        ) -> Result<Vec<u8>, originals_ordinals::OrdinalsError> {
            Ok(vec![1u8; 10])
        }
    }

    struct MockFeeOracle;

    #[async_trait]
    impl FeeOracle for MockFeeOracle {
        async fn estimate_fee(&self, _blocks: u32) -> Result<u64, originals_ordinals::OrdinalsError> {
            Ok(1)
        }
    }

    fn test_pubkey_and_address(network: bitcoin::Network) -> (UntweakedPublicKey, Address) {
        let secp = Secp256k1::new();
        let secret = SecretKey::from_slice(&[9u8; 32]).unwrap();
        let keypair = Keypair::from_secret_key(&secp, &secret);
        let (x_only, _parity) = keypair.x_only_public_key();
        let address = Address::p2tr(&secp, x_only, None, network);
        (x_only, address)
    }

    fn test_engine(webvh_log: Arc<WebVHLog>) -> LifecycleEngine {
        LifecycleEngine::new(
            webvh_log,
            Arc::new(MockGateway { inscription_ids: StdMutex::new(vec![]) }),
            Arc::new(MockBuilder),
            Arc::new(MockFeeOracle),
            LifecycleEngineConfig {
                network: Network::Signet,
                suite: Suite::Ed25519,
                max_confirmation_polls: 3,
                poll_interval: Duration::from_millis(1),
            },
        )
    }

    fn test_resource() -> crate::resource::Resource {
        crate::resource::Resource::from_inline_bytes("text/plain", b"hello".to_vec())
    }

    #[tokio::test]
    async fn promote_to_webvh_transitions_peer_to_webvh() {
        let dir = tempdir().unwrap();
        let engine = test_engine(Arc::new(WebVHLog::new(dir.path())));
        let issuer = KeyManager::from_seed(Suite::Ed25519, &[5u8; 32]);
        let original = Original::new(Identifier::Peer { method_specific: "z6Mkabc".to_string() }, vec![test_resource()]);

        let promoted = engine
            .promote_to_webvh(
                original,
                "example.com",
                &["users".to_string(), "alice".to_string()],
                &issuer.public_multikey(),
                &issuer.secret_multikey(),
            )
            .await
            .unwrap();

        assert!(matches!(promoted.id, Identifier::WebVh { .. }));
        assert_eq!(promoted.provenance_log.len(), 1);
        assert_eq!(promoted.provenance_log[0].credential_subject["creator"], issuer.public_multikey());
    }

    #[tokio::test]
    async fn promote_to_webvh_rejects_non_peer_original() {
        let dir = tempdir().unwrap();
        let engine = test_engine(Arc::new(WebVHLog::new(dir.path())));
        let issuer = KeyManager::from_seed(Suite::Ed25519, &[5u8; 32]);
        let original = Original::new(Identifier::Btco { network: Network::Mainnet, sat: 1, index: 0 }, vec![]);

        let result = engine
            .promote_to_webvh(original, "example.com", &["a".to_string()], &issuer.public_multikey(), &issuer.secret_multikey())
            .await;
        assert!(matches!(result, Err(LifecycleError::InvalidTransition(_))));
    }

    fn sample_request(issuer: &originals_crypto::KeyPair, sat: u64) -> InscriptionRequest {
        let (reveal_pubkey, destination) = test_pubkey_and_address(bitcoin::Network::Signet);
        InscriptionRequest {
            utxos: vec![Utxo {
                txid: "f".repeat(64),
                vout: 0,
                value_sats: 100_000,
                locked: false,
                inscription_bearing: false,
            }],
            fee_rate_sats_per_vb: 5,
            sat,
            document_bytes: br#"{"hello":"world"}"#.to_vec(),
            content_type: "application/json".to_string(),
            reveal_pubkey,
            destination,
            issuer_verification_method: issuer.public_multikey(),
            issuer_secret_key_multibase: issuer.secret_multikey(),
        }
    }

    #[tokio::test]
    async fn inscribe_binds_original_to_satoshi() {
        let dir = tempdir().unwrap();
        let engine = test_engine(Arc::new(WebVHLog::new(dir.path())));
        let issuer = KeyManager::from_seed(Suite::Ed25519, &[6u8; 32]);
        let original = Original::new(Identifier::Peer { method_specific: "z6Mkxyz".to_string() }, vec![test_resource()]);

        let inscribed = engine.inscribe(original, sample_request(&issuer, 42)).await.unwrap();
        assert!(matches!(inscribed.id, Identifier::Btco { sat: 42, index: 0, .. }));
        assert_eq!(inscribed.provenance_log.len(), 1);
        assert_eq!(inscribed.provenance_log[0].credential_subject["reveal_txid"], "txid-mock");
    }

    #[tokio::test]
    async fn inscribe_rejects_already_bound_original() {
        let dir = tempdir().unwrap();
        let engine = test_engine(Arc::new(WebVHLog::new(dir.path())));
        let issuer = KeyManager::from_seed(Suite::Ed25519, &[7u8; 32]);
        let original = Original::new(Identifier::Btco { network: Network::Signet, sat: 1, index: 0 }, vec![]);

        let result = engine.inscribe(original, sample_request(&issuer, 1)).await;
        assert!(matches!(result, Err(LifecycleError::InvalidTransition(_))));
    }

    #[tokio::test]
    async fn update_btco_requires_matching_sat() {
        let dir = tempdir().unwrap();
        let engine = test_engine(Arc::new(WebVHLog::new(dir.path())));
        let issuer = KeyManager::from_seed(Suite::Ed25519, &[8u8; 32]);
        let original = Original::new(Identifier::Btco { network: Network::Signet, sat: 1, index: 0 }, vec![]);

        let result = engine.update_btco(original, sample_request(&issuer, 2)).await;
        assert!(matches!(result, Err(LifecycleError::InvalidTransition(_))));
    }

    #[tokio::test]
    async fn update_btco_appends_without_changing_identity() {
        let dir = tempdir().unwrap();
        let engine = test_engine(Arc::new(WebVHLog::new(dir.path())));
        let issuer = KeyManager::from_seed(Suite::Ed25519, &[10u8; 32]);
        let original = Original::new(Identifier::Btco { network: Network::Signet, sat: 5, index: 0 }, vec![test_resource()]);

        let updated = engine.update_btco(original, sample_request(&issuer, 5)).await.unwrap();
        assert!(matches!(updated.id, Identifier::Btco { sat: 5, index: 0, .. }));
        assert_eq!(updated.provenance_log.len(), 1);
        assert_eq!(
            updated.provenance_log[0].types,
            vec!["VerifiableCredential".to_string(), "ResourceUpdated".to_string()]
        );
    }

    #[tokio::test]
    async fn deactivate_overwrites_document_with_marker() {
        let dir = tempdir().unwrap();
        let engine = test_engine(Arc::new(WebVHLog::new(dir.path())));
        let issuer = KeyManager::from_seed(Suite::Ed25519, &[9u8; 32]);
        let original = Original::new(Identifier::Btco { network: Network::Signet, sat: 9, index: 0 }, vec![]);

        let deactivated = engine.deactivate(original, sample_request(&issuer, 9)).await.unwrap();
        assert_eq!(deactivated.provenance_log.len(), 1);
        assert_eq!(
            deactivated.provenance_log[0].types,
            vec!["VerifiableCredential".to_string(), "ResourceDeactivated".to_string()]
        );
    }

    #[tokio::test]
    async fn deactivate_rejects_non_btco_original() {
        let dir = tempdir().unwrap();
        let engine = test_engine(Arc::new(WebVHLog::new(dir.path())));
        let issuer = KeyManager::from_seed(Suite::Ed25519, &[11u8; 32]);
        let original = Original::new(Identifier::Peer { method_specific: "z6Mkabc".to_string() }, vec![]);

        let result = engine.deactivate(original, sample_request(&issuer, 1)).await;
        assert!(matches!(result, Err(LifecycleError::InvalidTransition(_))));
    }
}
