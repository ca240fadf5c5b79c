//! End-to-end tests for the Aura transaction codec.
//!
//! These exercise the full lifecycle across the public API: build a
//! transaction from params, sign it through a memory account, wrap it as a
//! signed record, push it through the wire string form, and parse it back.
//! Each test stands alone; no shared state, no ordering dependencies.

use std::collections::HashMap;

use aura_protocol::account::MemoryAccount;
use aura_protocol::config::NETWORK_ID_MAINNET;
use aura_protocol::crypto::keys::AuraKeypair;
use aura_protocol::encoding;
use aura_protocol::tx::error::{SignatureError, UsageError};
use aura_protocol::tx::{
    CtVersion, FeeContext, Id, IdKind, TxError, TxKind, TxObject, TxState, Value,
};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn account_id(keypair: &AuraKeypair) -> Id {
    Id::new(IdKind::Account, *keypair.public_key().as_bytes())
}

fn spend_params(sender: &Id, recipient: &Id) -> HashMap<String, Value> {
    let mut params = HashMap::new();
    params.insert("senderId".to_string(), Value::Id(sender.clone()));
    params.insert("recipientId".to_string(), Value::Id(recipient.clone()));
    params.insert("amount".to_string(), Value::int(100));
    params.insert("ttl".to_string(), Value::int(0));
    params.insert("nonce".to_string(), Value::int(1));
    params.insert("fee".to_string(), Value::int(17_000));
    params.insert("payload".to_string(), Value::Bytes(vec![]));
    params
}

fn sample_spend() -> TxObject {
    let keypair = AuraKeypair::from_seed(&[11u8; 32]);
    let id = account_id(&keypair);
    TxObject::from_params(TxKind::Spend, spend_params(&id, &id)).unwrap()
}

// ---------------------------------------------------------------------------
// Build + wire string
// ---------------------------------------------------------------------------

#[test]
fn build_produces_encoded_string_and_bytes() {
    let tx = sample_spend();
    assert!(tx.encoded_tx().starts_with("tx_"));
    assert!(!tx.rlp_encoded().is_empty());
    assert_eq!(tx.state(), TxState::Sealed);
    assert_eq!(tx.version(), 1);
}

#[test]
fn not_enough_arguments_fails_build() {
    let mut params = HashMap::new();
    params.insert(
        "senderId".to_string(),
        Value::Id(Id::new(IdKind::Account, [1; 32])),
    );
    params.insert("amount".to_string(), Value::int(1));
    let err = TxObject::from_params(TxKind::Spend, params).unwrap_err();
    assert!(matches!(
        err,
        TxError::Usage(UsageError::MissingField(_))
    ));
}

#[test]
fn unpack_transaction_from_string_and_bytes() {
    let tx = sample_spend();

    let from_string = TxObject::from_encoded(tx.encoded_tx()).unwrap();
    assert_eq!(from_string.rlp_encoded(), tx.rlp_encoded());
    assert_eq!(from_string.encoded_tx(), tx.encoded_tx());
    assert_eq!(from_string.params(), tx.params());

    let from_bytes = TxObject::from_bytes(tx.rlp_encoded()).unwrap();
    assert_eq!(from_bytes.rlp_encoded(), tx.rlp_encoded());
    assert_eq!(from_bytes.params(), tx.params());
}

#[test]
fn encoding_is_deterministic_across_builds() {
    let tx1 = sample_spend();
    let tx2 = sample_spend();
    assert_eq!(tx1.rlp_encoded(), tx2.rlp_encoded());
    assert_eq!(tx1.encoded_tx(), tx2.encoded_tx());
}

// ---------------------------------------------------------------------------
// Signing lifecycle
// ---------------------------------------------------------------------------

#[test]
fn sign_wrap_and_unpack_signed_transaction() {
    let keypair = AuraKeypair::generate();
    let account = MemoryAccount::with_network_id(keypair.clone(), NETWORK_ID_MAINNET);
    let id = account_id(&keypair);
    let mut tx = TxObject::from_params(TxKind::Spend, spend_params(&id, &id)).unwrap();

    let unsigned_encoding = tx.encoded_tx().to_string();
    let signature = account.sign_transaction(&mut tx).unwrap();

    assert!(tx.is_signed());
    assert_eq!(tx.state(), TxState::Signed);
    assert_eq!(tx.signatures().unwrap().len(), 1);
    assert_ne!(tx.encoded_tx(), unsigned_encoding);

    // The signature covers network_id ++ record bytes, nothing else.
    let payload = tx.signing_payload(NETWORK_ID_MAINNET);
    assert!(keypair.verify(&payload, &signature));

    // Parse back: identical record bytes, identical signature list.
    let parsed = TxObject::from_encoded(tx.encoded_tx()).unwrap();
    assert_eq!(parsed.state(), TxState::Signed);
    assert_eq!(parsed.kind(), TxKind::Spend);
    assert_eq!(parsed.rlp_encoded(), tx.rlp_encoded());
    assert_eq!(parsed.signatures().unwrap(), tx.signatures().unwrap());
    assert_eq!(parsed.encoded_tx(), tx.encoded_tx());
}

#[test]
fn get_signatures_on_unsigned_transaction_fails() {
    let tx = sample_spend();
    assert!(matches!(
        tx.signatures(),
        Err(TxError::Signature(SignatureError::NotSigned))
    ));
}

#[test]
fn invalid_signature_rejected() {
    let mut tx = sample_spend();
    assert!(matches!(
        tx.add_signature(&[1u8; 10]),
        Err(TxError::Signature(SignatureError::InvalidEncoding { .. }))
    ));
}

#[test]
fn two_signers_attach_in_order() {
    let kp1 = AuraKeypair::generate();
    let kp2 = AuraKeypair::generate();
    let a1 = MemoryAccount::with_network_id(kp1.clone(), NETWORK_ID_MAINNET);
    let a2 = MemoryAccount::with_network_id(kp2.clone(), NETWORK_ID_MAINNET);
    let id = account_id(&kp1);
    let mut tx = TxObject::from_params(TxKind::Spend, spend_params(&id, &id)).unwrap();

    let s1 = a1.sign_transaction(&mut tx).unwrap();
    let s2 = a2.sign_transaction(&mut tx).unwrap();

    let sigs = tx.signatures().unwrap();
    assert_eq!(sigs.len(), 2);
    assert_eq!(sigs[0], s1.as_bytes());
    assert_eq!(sigs[1], s2.as_bytes());

    let parsed = TxObject::from_encoded(tx.encoded_tx()).unwrap();
    assert_eq!(parsed.signatures().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Mutation & default fee
// ---------------------------------------------------------------------------

#[test]
fn change_props_of_parsed_signed_transaction_recomputes_fee() {
    let keypair = AuraKeypair::generate();
    let account = MemoryAccount::with_network_id(keypair.clone(), NETWORK_ID_MAINNET);
    let id = account_id(&keypair);
    let mut tx = TxObject::from_params(TxKind::Spend, spend_params(&id, &id)).unwrap();
    account.sign_transaction(&mut tx).unwrap();

    let mut parsed = TxObject::from_encoded(tx.encoded_tx()).unwrap();
    let fee_before = parsed.param("fee").and_then(Value::as_int).unwrap();

    let mut props = HashMap::new();
    props.insert("amount".to_string(), Value::int(10_000));
    parsed.set_props(props).unwrap();

    assert_eq!(parsed.param("amount"), Some(&Value::int(10_000)));
    assert_ne!(
        parsed.param("fee").and_then(Value::as_int).unwrap(),
        fee_before
    );
}

#[test]
fn default_fee_grows_with_payload_and_explicit_fee_does_not() {
    let id = Id::new(IdKind::Account, [5; 32]);
    let mut params = spend_params(&id, &id);
    params.remove("fee");

    let mut derived = TxObject::from_params(TxKind::Spend, params.clone()).unwrap();
    let fee_small = derived.param("fee").and_then(Value::as_int).unwrap();

    let mut props = HashMap::new();
    props.insert("payload".to_string(), Value::Bytes(vec![0xCC; 1_000]));
    derived.set_props(props.clone()).unwrap();
    let fee_large = derived.param("fee").and_then(Value::as_int).unwrap();
    assert!(fee_large > fee_small);

    let mut explicit = TxObject::from_params(TxKind::Spend, spend_params(&id, &id)).unwrap();
    explicit.set_props(props).unwrap();
    assert_eq!(explicit.param("fee"), Some(&Value::int(17_000)));
}

// ---------------------------------------------------------------------------
// Other record kinds round-trip
// ---------------------------------------------------------------------------

#[test]
fn contract_create_roundtrip() {
    let mut params = HashMap::new();
    params.insert(
        "ownerId".to_string(),
        Value::Id(Id::new(IdKind::Account, [1; 32])),
    );
    params.insert("nonce".to_string(), Value::int(1));
    params.insert(
        "code".to_string(),
        Value::String(encoding::encode("cb", b"compiled contract")),
    );
    params.insert(
        "ctVersion".to_string(),
        Value::CtVersion(CtVersion {
            vm_version: 7,
            abi_version: 3,
        }),
    );
    params.insert("deposit".to_string(), Value::int(0));
    params.insert("amount".to_string(), Value::int(0));
    params.insert("gas".to_string(), Value::int(25_000));
    params.insert("gasPrice".to_string(), Value::int(1_000_000_000));
    params.insert(
        "callData".to_string(),
        Value::String(encoding::encode("cb", b"init()")),
    );

    let tx = TxObject::from_params(TxKind::ContractCreate, params).unwrap();
    let parsed = TxObject::from_encoded(tx.encoded_tx()).unwrap();
    assert_eq!(parsed.kind(), TxKind::ContractCreate);
    assert_eq!(parsed.params(), tx.params());
}

#[test]
fn oracle_query_roundtrip() {
    let mut params = HashMap::new();
    params.insert(
        "senderId".to_string(),
        Value::Id(Id::new(IdKind::Account, [1; 32])),
    );
    params.insert("nonce".to_string(), Value::int(3));
    params.insert(
        "oracleId".to_string(),
        Value::Id(Id::new(IdKind::Oracle, [2; 32])),
    );
    params.insert(
        "query".to_string(),
        Value::String("temperature in lisbon?".to_string()),
    );
    params.insert("queryFee".to_string(), Value::int(30_000));
    params.insert("queryTtlType".to_string(), Value::int(0));
    params.insert("queryTtlValue".to_string(), Value::int(10));
    params.insert("responseTtlType".to_string(), Value::int(0));
    params.insert("responseTtlValue".to_string(), Value::int(10));

    let tx = TxObject::from_params(TxKind::OracleQuery, params).unwrap();
    let parsed = TxObject::from_encoded(tx.encoded_tx()).unwrap();
    assert_eq!(parsed.kind(), TxKind::OracleQuery);
    assert_eq!(parsed.params(), tx.params());
}

#[test]
fn channel_deposit_roundtrip() {
    let mut params = HashMap::new();
    params.insert(
        "channelId".to_string(),
        Value::Id(Id::new(IdKind::Channel, [9; 32])),
    );
    params.insert(
        "fromId".to_string(),
        Value::Id(Id::new(IdKind::Account, [1; 32])),
    );
    params.insert("amount".to_string(), Value::int(5_000));
    params.insert(
        "stateHash".to_string(),
        Value::String(encoding::encode("st", &[7u8; 32])),
    );
    params.insert("round".to_string(), Value::int(4));
    params.insert("nonce".to_string(), Value::int(2));

    let tx = TxObject::from_params(TxKind::ChannelDeposit, params).unwrap();
    let parsed = TxObject::from_bytes(tx.rlp_encoded()).unwrap();
    assert_eq!(parsed.kind(), TxKind::ChannelDeposit);
    assert_eq!(parsed.params(), tx.params());
}

#[test]
fn ga_meta_wraps_inner_transaction() {
    let inner = sample_spend();

    let mut params = HashMap::new();
    params.insert(
        "gaId".to_string(),
        Value::Id(Id::new(IdKind::Account, [4; 32])),
    );
    params.insert(
        "authData".to_string(),
        Value::String(encoding::encode("cb", b"auth(1)")),
    );
    params.insert("abiVersion".to_string(), Value::int(3));
    params.insert("gas".to_string(), Value::int(50_000));
    params.insert("gasPrice".to_string(), Value::int(1_000_000_000));
    params.insert("tx".to_string(), Value::Rlp(inner.rlp_encoded().to_vec()));

    let tx = TxObject::from_params(TxKind::GaMeta, params).unwrap();

    // The wrapper is charged only for its own bytes.
    let ctx = FeeContext {
        relative_ttl: 0,
        inner_tx_size: inner.rlp_encoded().len(),
    };
    let expected = aura_protocol::tx::min_fee(TxKind::GaMeta, tx.rlp_encoded().len(), &ctx);
    assert_eq!(
        tx.param("fee").and_then(Value::as_int).unwrap(),
        expected as i128
    );

    // The inner record survives the round trip byte-exact.
    let parsed = TxObject::from_bytes(tx.rlp_encoded()).unwrap();
    let embedded = parsed.param("tx").and_then(Value::as_rlp).unwrap();
    assert_eq!(embedded, inner.rlp_encoded());
    let inner_parsed = TxObject::from_bytes(embedded).unwrap();
    assert_eq!(inner_parsed.kind(), TxKind::Spend);
}

// ---------------------------------------------------------------------------
// Malformed input
// ---------------------------------------------------------------------------

#[test]
fn truncated_records_never_parse_partially() {
    let tx = sample_spend();
    let bytes = tx.rlp_encoded();
    for cut in 1..bytes.len() {
        assert!(
            TxObject::from_bytes(&bytes[..bytes.len() - cut]).is_err(),
            "a record cut by {cut} bytes must not parse"
        );
    }
}

#[test]
fn corrupted_wire_string_rejected() {
    let tx = sample_spend();
    let mut s = tx.encoded_tx().to_string();
    let last = s.pop().unwrap();
    s.push(if last == '1' { '2' } else { '1' });
    assert!(TxObject::from_encoded(&s).is_err());
}

#[test]
fn wrong_prefix_rejected() {
    let tx = sample_spend();
    let payload = encoding::decode(tx.encoded_tx()).unwrap().1;
    let restrung = encoding::encode("cb", &payload);
    assert!(TxObject::from_encoded(&restrung).is_err());
}
