//! UTXO selection at and around the dust boundary, plus the
//! insufficient-funds/conflicting-locks classification split.

use originals_ordinals::{select_utxos, OrdinalsError, SelectionRequest, Utxo, DUST_LIMIT};

fn utxo(value: u64, locked: bool, inscription_bearing: bool) -> Utxo {
    Utxo { txid: format!("tx-{value}-{locked}-{inscription_bearing}"), vout: 0, value_sats: value, locked, inscription_bearing }
}

fn request(target_sats: u64) -> SelectionRequest {
    SelectionRequest { target_sats, fee_rate_sats_per_vb: 2, forbid_inscription_bearing_inputs: false, required_inscription_utxo: None }
}

#[test]
fn target_exactly_at_dust_limit_is_accepted() {
    let utxos = vec![utxo(100_000, false, false)];
    let result = select_utxos(&utxos, &request(DUST_LIMIT));
    assert!(result.is_ok());
}

#[test]
fn target_one_below_dust_limit_is_rejected() {
    let utxos = vec![utxo(100_000, false, false)];
    let result = select_utxos(&utxos, &request(DUST_LIMIT - 1));
    assert!(matches!(result, Err(OrdinalsError::DustOutput(_))));
}

#[test]
fn change_below_dust_is_folded_into_the_fee_not_returned() {
    // A UTXO sized so the leftover after target+fee lands under DUST_LIMIT.
    let utxos = vec![utxo(DUST_LIMIT + 600, false, false)];
    let result = select_utxos(&utxos, &request(DUST_LIMIT)).unwrap();
    assert_eq!(result.change_sats, 0);
}

#[test]
fn sufficient_total_but_entirely_locked_reports_conflicting_locks() {
    let utxos = vec![utxo(1_000_000, true, false)];
    let result = select_utxos(&utxos, &request(10_000));
    assert!(matches!(result, Err(OrdinalsError::ConflictingLocks(_))));
}

#[test]
fn insufficient_across_the_board_reports_insufficient_funds() {
    let utxos = vec![utxo(1_000, false, false)];
    let result = select_utxos(&utxos, &request(1_000_000));
    assert!(matches!(result, Err(OrdinalsError::InsufficientFunds(_))));
}

#[test]
fn required_inscription_utxo_survives_even_when_it_alone_is_dust_sized() {
    let required = utxo(DUST_LIMIT, false, true);
    let funding = utxo(100_000, false, false);
    let result = select_utxos(&[funding.clone()], &SelectionRequest {
        target_sats: DUST_LIMIT,
        fee_rate_sats_per_vb: 2,
        forbid_inscription_bearing_inputs: true,
        required_inscription_utxo: Some(required.clone()),
    })
    .unwrap();
    assert_eq!(result.selected[0], required);
    assert!(result.selected.iter().skip(1).all(|u| !u.inscription_bearing));
}
