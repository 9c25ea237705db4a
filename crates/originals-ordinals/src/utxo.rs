//! # UtxoSelector — Coin Selection Under Dust, Fee, Lock, and
//! Inscription-Safety Constraints
//!
//! Implements spec §4.7. Selection is greedy-descending by value: sort
//! candidates largest-first and accumulate until the running sum covers
//! the target plus the estimated fee for the transaction built so far.

use serde::{Deserialize, Serialize};

use crate::error::OrdinalsError;
use crate::inscription::estimate_vsize;

/// The standard Bitcoin dust threshold in satoshis (spec §4.7, §8).
pub const DUST_LIMIT: u64 = 546;

/// One spendable coin under consideration for selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utxo {
    pub txid: String,
    pub vout: u32,
    pub value_sats: u64,
    /// Locked by a concurrent in-flight operation; never selectable.
    pub locked: bool,
    /// Whether this output currently carries one or more ordinal inscriptions.
    pub inscription_bearing: bool,
}

/// Selection request parameters.
#[derive(Debug, Clone)]
pub struct SelectionRequest {
    pub target_sats: u64,
    pub fee_rate_sats_per_vb: i64,
    pub forbid_inscription_bearing_inputs: bool,
    /// A specific UTXO that must be spent first — the satoshi being
    /// inscribed on. Never selected as, or absorbed into, change.
    pub required_inscription_utxo: Option<Utxo>,
}

/// The outcome of a successful selection.
#[derive(Debug, Clone)]
pub struct SelectionResult {
    pub selected: Vec<Utxo>,
    pub change_sats: u64,
    pub fee_sats: u64,
}

fn fee_for(vbytes: u64, fee_rate_sats_per_vb: i64) -> u64 {
    (vbytes as i64 * fee_rate_sats_per_vb).max(0) as u64
}

/// Select UTXOs satisfying `request` from `utxos`, per spec §4.7's policy.
pub fn select_utxos(utxos: &[Utxo], request: &SelectionRequest) -> Result<SelectionResult, OrdinalsError> {
    if request.fee_rate_sats_per_vb <= 0 {
        return Err(OrdinalsError::TooLowFee(format!(
            "fee rate must be positive, got {}",
            request.fee_rate_sats_per_vb
        )));
    }
    if request.target_sats < DUST_LIMIT {
        return Err(OrdinalsError::DustOutput(format!(
            "target {} is below the dust limit of {DUST_LIMIT}",
            request.target_sats
        )));
    }

    let mut selected: Vec<Utxo> = Vec::new();
    let mut sum = 0u64;

    if let Some(required) = &request.required_inscription_utxo {
        selected.push(required.clone());
        sum += required.value_sats;
    }

    let required_outpoint = request
        .required_inscription_utxo
        .as_ref()
        .map(|u| (u.txid.clone(), u.vout));

    let mut candidates: Vec<&Utxo> = utxos
        .iter()
        .filter(|u| !u.locked)
        .filter(|u| !request.forbid_inscription_bearing_inputs || !u.inscription_bearing)
        .filter(|u| required_outpoint.as_ref() != Some(&(u.txid.clone(), u.vout)))
        .collect();
    candidates.sort_by(|a, b| b.value_sats.cmp(&a.value_sats));

    let mut vbytes = estimate_vsize(selected.len() as u64, None);
    let mut needed = request.target_sats + fee_for(vbytes, request.fee_rate_sats_per_vb);

    let mut idx = 0;
    while sum < needed {
        let Some(candidate) = candidates.get(idx) else {
            return classify_insufficient(utxos, request);
        };
        selected.push((*candidate).clone());
        sum += candidate.value_sats;
        idx += 1;
        vbytes = estimate_vsize(selected.len() as u64, None);
        needed = request.target_sats + fee_for(vbytes, request.fee_rate_sats_per_vb);
    }

    let fee_sats = fee_for(vbytes, request.fee_rate_sats_per_vb);
    let remainder = sum - request.target_sats - fee_sats;
    let change_sats = if remainder < DUST_LIMIT { 0 } else { remainder };

    Ok(SelectionResult { selected, change_sats, fee_sats })
}

/// Distinguish `INSUFFICIENT_FUNDS` from `CONFLICTING_LOCKS`: if the total
/// value of all inputs (ignoring the lock filter) would have been enough,
/// but every sufficient combination includes a locked input, the caller
/// needs to know that unlocking, not funding, is the fix.
fn classify_insufficient(utxos: &[Utxo], request: &SelectionRequest) -> Result<SelectionResult, OrdinalsError> {
    let unlocked_total: u64 = utxos.iter().filter(|u| !u.locked).map(|u| u.value_sats).sum();
    let all_total: u64 = utxos.iter().map(|u| u.value_sats).sum();

    if unlocked_total < request.target_sats && all_total >= request.target_sats {
        return Err(OrdinalsError::ConflictingLocks(
            "a sufficient UTXO set exists but is entirely locked".to_string(),
        ));
    }
    Err(OrdinalsError::InsufficientFunds(format!(
        "no combination of available UTXOs covers target {} sats plus fee",
        request.target_sats
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utxo(value: u64) -> Utxo {
        Utxo { txid: format!("tx{value}"), vout: 0, value_sats: value, locked: false, inscription_bearing: false }
    }

    #[test]
    fn rejects_non_positive_fee_rate() {
        let utxos = vec![utxo(10_000)];
        let req = SelectionRequest {
            target_sats: 1_000,
            fee_rate_sats_per_vb: 0,
            forbid_inscription_bearing_inputs: false,
            required_inscription_utxo: None,
        };
        assert!(select_utxos(&utxos, &req).is_err());
    }

    #[test]
    fn dust_boundary_is_exact() {
        let utxos = vec![utxo(10_000)];
        let accepted = select_utxos(
            &utxos,
            &SelectionRequest {
                target_sats: DUST_LIMIT,
                fee_rate_sats_per_vb: 1,
                forbid_inscription_bearing_inputs: false,
                required_inscription_utxo: None,
            },
        );
        assert!(accepted.is_ok());

        let rejected = select_utxos(
            &utxos,
            &SelectionRequest {
                target_sats: DUST_LIMIT - 1,
                fee_rate_sats_per_vb: 1,
                forbid_inscription_bearing_inputs: false,
                required_inscription_utxo: None,
            },
        );
        assert!(rejected.is_err());
    }

    #[test]
    fn dust_change_is_absorbed_into_fee() {
        let utxos = vec![utxo(10_000)];
        let result = select_utxos(
            &utxos,
            &SelectionRequest {
                target_sats: DUST_LIMIT,
                fee_rate_sats_per_vb: 1,
                forbid_inscription_bearing_inputs: false,
                required_inscription_utxo: None,
            },
        )
        .unwrap();
        assert_eq!(result.selected.len(), 1);
        assert_eq!(result.change_sats, 0);
    }

    #[test]
    fn greedy_descending_prefers_fewest_inputs() {
        let utxos = vec![utxo(1_000), utxo(50_000), utxo(5_000)];
        let result = select_utxos(
            &utxos,
            &SelectionRequest {
                target_sats: 10_000,
                fee_rate_sats_per_vb: 1,
                forbid_inscription_bearing_inputs: false,
                required_inscription_utxo: None,
            },
        )
        .unwrap();
        assert_eq!(result.selected.len(), 1);
        assert_eq!(result.selected[0].value_sats, 50_000);
    }

    #[test]
    fn excludes_locked_inputs() {
        let mut locked = utxo(50_000);
        locked.locked = true;
        let utxos = vec![locked, utxo(1_000)];
        let result = select_utxos(
            &utxos,
            &SelectionRequest {
                target_sats: 10_000,
                fee_rate_sats_per_vb: 1,
                forbid_inscription_bearing_inputs: false,
                required_inscription_utxo: None,
            },
        );
        assert!(matches!(result, Err(OrdinalsError::ConflictingLocks(_))));
    }

    #[test]
    fn excludes_inscription_bearing_inputs_when_forbidden() {
        let mut inscribed = utxo(50_000);
        inscribed.inscription_bearing = true;
        let utxos = vec![inscribed, utxo(1_000)];
        let result = select_utxos(
            &utxos,
            &SelectionRequest {
                target_sats: 10_000,
                fee_rate_sats_per_vb: 1,
                forbid_inscription_bearing_inputs: true,
                required_inscription_utxo: None,
            },
        );
        assert!(matches!(result, Err(OrdinalsError::InsufficientFunds(_))));
    }

    #[test]
    fn required_inscription_utxo_is_always_included_first() {
        let required = utxo(1_000);
        let utxos = vec![utxo(50_000)];
        let result = select_utxos(
            &utxos,
            &SelectionRequest {
                target_sats: 10_000,
                fee_rate_sats_per_vb: 1,
                forbid_inscription_bearing_inputs: false,
                required_inscription_utxo: Some(required.clone()),
            },
        )
        .unwrap();
        assert_eq!(result.selected[0], required);
    }

    #[test]
    fn insufficient_funds_when_no_combination_suffices() {
        let utxos = vec![utxo(1_000)];
        let result = select_utxos(
            &utxos,
            &SelectionRequest {
                target_sats: 100_000,
                fee_rate_sats_per_vb: 1,
                forbid_inscription_bearing_inputs: false,
                required_inscription_utxo: None,
            },
        );
        assert!(matches!(result, Err(OrdinalsError::InsufficientFunds(_))));
    }

    #[test]
    fn selected_sum_always_covers_target_plus_fee() {
        let utxos = vec![utxo(2_000), utxo(3_000), utxo(7_000)];
        let result = select_utxos(
            &utxos,
            &SelectionRequest {
                target_sats: 5_000,
                fee_rate_sats_per_vb: 2,
                forbid_inscription_bearing_inputs: false,
                required_inscription_utxo: None,
            },
        )
        .unwrap();
        let sum: u64 = result.selected.iter().map(|u| u.value_sats).sum();
        assert!(sum >= 5_000 + result.fee_sats);
        assert!(result.change_sats == 0 || result.change_sats >= DUST_LIMIT);
    }
}
