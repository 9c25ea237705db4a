//! Inscription envelope construction: the vsize formula, envelope
//! content/ord-tag presence, and the reveal plan's fee computation, wired
//! together the way `originals-lifecycle::LifecycleEngine::inscribe` uses
//! them.

use bitcoin::secp256k1::{Keypair, Secp256k1, SecretKey};
use originals_ordinals::{build_envelope_script, estimate_vsize, plan_reveal, prepare_inscription, BASE_VSIZE};

fn test_reveal_pubkey() -> bitcoin::key::UntweakedPublicKey {
    let secp = Secp256k1::new();
    let secret = SecretKey::from_slice(&[42u8; 32]).unwrap();
    let keypair = Keypair::from_secret_key(&secp, &secret);
    keypair.x_only_public_key().0
}

#[test]
fn envelope_carries_ord_tag_and_exact_content_bytes() {
    let content = b"an inscribed original";
    let script = build_envelope_script(content, "text/plain", None).unwrap();
    let bytes = script.as_bytes();
    assert!(bytes.windows(3).any(|w| w == b"ord"));
    assert!(bytes.windows(content.len()).any(|w| w == content));
}

#[test]
fn prepare_inscription_derives_a_spendable_taproot_commit_address() {
    let secp = Secp256k1::new();
    let reveal_pubkey = test_reveal_pubkey();
    let content = b"hello originals";
    let metadata = serde_json::json!({"resource_id": "r1", "creator": "did:peer:abc"});

    let prepared = prepare_inscription(&secp, content, "text/plain", Some(&metadata), reveal_pubkey, bitcoin::Network::Signet).unwrap();

    assert!(prepared.commit_address.to_string().starts_with("tb1p"));
    assert!(prepared.spend_info.merkle_root().is_some());
}

#[test]
fn reveal_plan_fee_is_vsize_times_rate_and_matches_estimate_vsize() {
    let content_bytes = 2_048u64;
    let fee_rate = 7u64;
    let plan = plan_reveal(content_bytes, fee_rate);

    assert_eq!(plan.vsize, estimate_vsize(1, Some(content_bytes)));
    assert_eq!(plan.fee_sats, plan.vsize * fee_rate);
    assert!(plan.vsize > BASE_VSIZE, "content above 1000 bytes must add witness overhead");
}

#[test]
fn four_thousand_fifty_nine_byte_content_estimates_within_tolerance_of_the_worked_example() {
    // 4059 bytes of `image/png` content, no metadata, at 10 sat/vB: the
    // worked example expects vsize ≈ 1130 vB (± 10%) and fee ≈ 11300 sats.
    let plan = plan_reveal(4_059, 10);

    let expected_vsize = 1130.0;
    assert!(
        (plan.vsize as f64 - expected_vsize).abs() <= expected_vsize * 0.10,
        "vsize {} outside ±10% of {expected_vsize}",
        plan.vsize
    );

    let expected_fee = 11_300.0;
    assert!(
        (plan.fee_sats as f64 - expected_fee).abs() <= expected_fee * 0.10,
        "fee {} outside ±10% of {expected_fee}",
        plan.fee_sats
    );
}
