//! A multi-entry `did:webvh` update log: create, append twice, verify the
//! full chain, and confirm tampering after the fact is detected.

use originals_core::{sha256_bytes, CanonicalBytes};
use originals_crypto::{multikey_decode, KeyManager, Suite};
use originals_did::{DidDocument, VerificationMethod};
use originals_webvh::{LogProof, UpdateLogEntry, WebVHLog};

fn state_builder(public_key: &str) -> impl FnOnce(&str) -> DidDocument + '_ {
    move |did: &str| {
        let vm = VerificationMethod::multikey(format!("{did}#key-1"), did, public_key);
        DidDocument::new_with_single_key(did, vm)
    }
}

#[tokio::test]
async fn three_entry_log_verifies_as_a_whole_chain() {
    let dir = tempfile::tempdir().unwrap();
    let log = WebVHLog::new(dir.path());
    let keypair = KeyManager::generate(Suite::Ed25519);
    let public = keypair.public_multikey();
    let secret = keypair.secret_multikey();

    let genesis = log.create("originals.example", vec![], public.clone(), &secret, state_builder(&public)).await.unwrap();
    assert!(genesis.version_id.starts_with("1-"));

    let mut second_state = genesis.state.clone();
    second_state.service = Some(vec![serde_json::json!({"id": "#svc-1", "type": "LinkedDomains"})]);
    let second = log.append("originals.example", vec![], second_state, &public, &secret).await.unwrap();
    assert!(second.version_id.starts_with("2-"));

    let mut third_state = second.state.clone();
    third_state.service = Some(vec![serde_json::json!({"id": "#svc-1", "type": "LinkedDomains"}), serde_json::json!({"id": "#svc-2", "type": "DIDCommMessaging"})]);
    let third = log.append("originals.example", vec![], third_state, &public, &secret).await.unwrap();
    assert!(third.version_id.starts_with("3-"));

    let verified = log.verify("originals.example", &[]).await.unwrap();
    assert_eq!(verified.len(), 3);
    assert_eq!(verified.last().unwrap().version_id, third.version_id);
}

#[tokio::test]
async fn tampering_with_an_earlier_entry_breaks_verification_of_the_whole_chain() {
    let dir = tempfile::tempdir().unwrap();
    let log = WebVHLog::new(dir.path());
    let keypair = KeyManager::generate(Suite::Ed25519);
    let public = keypair.public_multikey();
    let secret = keypair.secret_multikey();

    let genesis = log.create("originals.example", vec![], public.clone(), &secret, state_builder(&public)).await.unwrap();
    let mut next_state = genesis.state.clone();
    next_state.service = Some(vec![serde_json::json!({"id": "#svc", "type": "LinkedDomains"})]);
    log.append("originals.example", vec![], next_state, &public, &secret).await.unwrap();

    // Tamper with the log file directly, bypassing the API.
    let path = dir.path().join("originals.example").join("did.jsonl");
    let original = std::fs::read_to_string(&path).unwrap();
    let mut lines: Vec<&str> = original.lines().collect();
    let tampered_first = lines[0].replace("originals.example", "originals.tampered");
    lines[0] = &tampered_first;
    std::fs::write(&path, lines.join("\n") + "\n").unwrap();

    let result = log.verify("originals.example", &[]).await;
    assert!(result.is_err());
}

/// Re-sign `entry` from scratch with `signer_key_multibase`, mirroring
/// `WebVHLog`'s own signing discipline: `sha256(canonical(proof_options) ||
/// canonical(entry-without-proof))`. A forged interior entry built this way
/// carries a fully valid signature of its own.
fn resign(mut entry: UpdateLogEntry, signer_key_multibase: &str, secret_key_multibase: &str) -> UpdateLogEntry {
    let decoded = multikey_decode(secret_key_multibase).unwrap();
    let suite = decoded.suite;
    let created = chrono::Utc::now();

    let proof_options = serde_json::json!({
        "type": "DataIntegrityProof",
        "cryptosuite": suite.cryptosuite_id(),
        "created": created.to_rfc3339(),
        "verificationMethod": signer_key_multibase,
        "proofPurpose": "assertionMethod",
    });
    entry.proof = Vec::new();
    let canonical_options = CanonicalBytes::from_value(proof_options).unwrap();
    let canonical_entry = entry.canonical_without_proof().unwrap();
    let preimage = CanonicalBytes::concat(&canonical_options, &canonical_entry);
    let digest = sha256_bytes(&preimage);

    let signature = originals_crypto::sign(suite, &decoded.bytes, &digest).unwrap();
    let proof_value = multibase::encode(multibase::Base::Base58Btc, signature);

    entry.proof.push(LogProof {
        type_: "DataIntegrityProof".to_string(),
        cryptosuite: suite.cryptosuite_id().to_string(),
        created,
        verification_method: signer_key_multibase.to_string(),
        proof_purpose: "assertionMethod".to_string(),
        proof_value,
    });
    entry
}

#[tokio::test]
async fn replacing_an_interior_entry_with_a_validly_resigned_one_still_breaks_the_chain() {
    let dir = tempfile::tempdir().unwrap();
    let log = WebVHLog::new(dir.path());
    let keypair = KeyManager::generate(Suite::Ed25519);
    let public = keypair.public_multikey();
    let secret = keypair.secret_multikey();

    let genesis = log.create("originals.example", vec![], public.clone(), &secret, state_builder(&public)).await.unwrap();
    let mut second_state = genesis.state.clone();
    second_state.service = Some(vec![serde_json::json!({"id": "#svc-1", "type": "LinkedDomains"})]);
    let second = log.append("originals.example", vec![], second_state, &public, &secret).await.unwrap();
    let mut third_state = second.state.clone();
    third_state.service = Some(vec![serde_json::json!({"id": "#svc-2", "type": "DIDCommMessaging"})]);
    log.append("originals.example", vec![], third_state, &public, &secret).await.unwrap();

    // Forge an alternate entry 2: same `parameters` (no key rotation), same
    // `version_time`, different `state`, re-signed from scratch with the
    // same authorized key. Its own hash recomputes correctly against the
    // unchanged genesis entry — only entry 3, still chained against the
    // original entry 2's hash, can catch the substitution.
    let forged_state = {
        let mut s = second.state.clone();
        s.service = Some(vec![serde_json::json!({"id": "#svc-forged", "type": "LinkedDomains"})]);
        s
    };
    let mut forged_second = UpdateLogEntry {
        version_id: String::new(),
        version_time: second.version_time,
        parameters: second.parameters.clone(),
        state: forged_state,
        proof: Vec::new(),
    };
    forged_second = resign(forged_second, &public, &secret);
    let genesis_hash = genesis.version_id.split_once('-').unwrap().1;
    let forged_hash = forged_second.chained_hash(Some(genesis_hash)).unwrap();
    forged_second.version_id = format!("2-{forged_hash}");

    let path = dir.path().join("originals.example").join("did.jsonl");
    let original = std::fs::read_to_string(&path).unwrap();
    let mut lines: Vec<String> = original.lines().map(str::to_string).collect();
    lines[1] = serde_json::to_string(&forged_second).unwrap();
    std::fs::write(&path, lines.join("\n") + "\n").unwrap();

    let result = log.verify("originals.example", &[]).await;
    assert!(result.is_err(), "entry 3's chained hash must still reference the original entry 2");
}
