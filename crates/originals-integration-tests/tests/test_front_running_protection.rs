//! `assert_sat_uncontested` — the safeguard that re-queries a satoshi
//! immediately before reveal broadcast and aborts if a competing
//! inscription has landed since the original prepare step.

use async_trait::async_trait;
use originals_did::Network;
use originals_ordinals::{assert_sat_uncontested, OrdinalsError, OrdinalsGateway, SatInfo, TransactionStatus};
use std::sync::Mutex;

struct ScriptedGateway {
    inscription_ids: Mutex<Vec<String>>,
}

#[async_trait]
impl OrdinalsGateway for ScriptedGateway {
    async fn get_sat_info(&self, _network: Network, sat: u64) -> Result<SatInfo, OrdinalsError> {
        Ok(SatInfo { sat, inscription_ids: self.inscription_ids.lock().unwrap().clone() })
    }
    async fn resolve_inscription(&self, _network: Network, _inscription_id: &str) -> Result<originals_did::DidResolutionResult, OrdinalsError> {
        unreachable!("not exercised by this scenario")
    }
    async fn get_metadata(&self, _network: Network, _inscription_id: &str) -> Result<Vec<u8>, OrdinalsError> {
        Ok(vec![])
    }
    async fn broadcast_transaction(&self, _network: Network, _raw_tx: &[u8]) -> Result<String, OrdinalsError> {
        Ok("txid".to_string())
    }
    async fn get_transaction_status(&self, _network: Network, txid: &str) -> Result<TransactionStatus, OrdinalsError> {
        Ok(TransactionStatus { txid: txid.to_string(), confirmations: 1, confirmed: true })
    }
    async fn estimate_fee(&self, _network: Network, _blocks: u32) -> Result<u64, OrdinalsError> {
        Ok(3)
    }
}

#[tokio::test]
async fn reveal_proceeds_when_the_sat_is_unchanged_since_preparation() {
    let gateway = ScriptedGateway { inscription_ids: Mutex::new(vec![]) };
    let known: Vec<String> = vec![];
    assert!(assert_sat_uncontested(&gateway, Network::Signet, 99, &known).await.is_ok());
}

#[tokio::test]
async fn reveal_aborts_when_a_competing_inscription_landed_first() {
    let gateway = ScriptedGateway { inscription_ids: Mutex::new(vec![]) };

    // Simulate a racing inscriber landing their reveal between this
    // reveal's preparation and its broadcast attempt.
    gateway.inscription_ids.lock().unwrap().push("attacker-insc-1".to_string());

    let known: Vec<String> = vec![];
    let result = assert_sat_uncontested(&gateway, Network::Signet, 99, &known).await;
    assert!(matches!(result, Err(OrdinalsError::SatContested(_))));
}

#[tokio::test]
async fn reveals_own_prior_inscriptions_on_the_same_sat_do_not_trigger_a_false_positive() {
    let gateway = ScriptedGateway { inscription_ids: Mutex::new(vec!["own-insc-1".to_string()]) };
    let known = vec!["own-insc-1".to_string()];
    assert!(assert_sat_uncontested(&gateway, Network::Signet, 99, &known).await.is_ok());
}
