//! # Token Lifecycle Integration Tests
//!
//! Exercises the [`Token`] facade across the repository/primitive-engine
//! seam the unit tests inside `token.rs` stub out implicitly: every call
//! here goes through the same in-memory adapters `token-core`'s CLI binary
//! wires up, so a failure here means the facade and its adapters disagree,
//! not just that one function's logic is wrong in isolation.

use std::sync::Arc;

use token_core::application::{attr_catalog, mechanism_names, Token};
use token_core::infrastructure::repositories::{InMemoryObjectRepository, InMemorySessionRepository, RandPrimitiveEngine};
use token_core_domain::value_objects::{AttrId, AttributeValue, KeyType, MechanismId, ObjectClass, SessionRole};

fn new_token() -> Token {
    Token::new(
        Arc::new(InMemoryObjectRepository::new()),
        Arc::new(InMemorySessionRepository::new()),
        Arc::new(RandPrimitiveEngine::new()),
    )
}

#[test]
fn generate_key_pair_then_derive_a_secret_from_the_private_key() {
    let token = new_token();
    let session = token.open_session(true).unwrap();
    token.login(session, SessionRole::User).unwrap();

    let public_attrs = vec![
        (AttrId::CLASS, AttributeValue::U32(ObjectClass::PublicKey.code())),
        (AttrId::KEY_TYPE, AttributeValue::U32(KeyType::Ec.code())),
        (AttrId::SUBJECT, AttributeValue::Bytes(vec![])),
        (AttrId::EC_PARAMS, AttributeValue::Bytes(vec![0x06, 0x05])),
    ];
    let private_attrs = vec![
        (AttrId::CLASS, AttributeValue::U32(ObjectClass::PrivateKey.code())),
        (AttrId::KEY_TYPE, AttributeValue::U32(KeyType::Ec.code())),
        (AttrId::SUBJECT, AttributeValue::Bytes(vec![])),
        (AttrId::EC_PARAMS, AttributeValue::Bytes(vec![0x06, 0x05])),
        (AttrId::DERIVE, AttributeValue::Bool(true)),
    ];

    let (_public, private) =
        token.generate_key_pair(session, MechanismId::EcKeyPairGen, public_attrs, private_attrs).unwrap();

    let derived = token
        .derive_key(
            session,
            MechanismId::Ecdh1Derive,
            private,
            vec![
                (AttrId::CLASS, AttributeValue::U32(ObjectClass::SecretKey.code())),
                (AttrId::KEY_TYPE, AttributeValue::U32(KeyType::GenericSecret.code())),
                (AttrId::VALUE_LEN, AttributeValue::U32(32)),
            ],
        )
        .unwrap();

    assert_ne!(derived, private);
    let exported = token.show_object(session, derived).unwrap();
    assert!(exported.iter().any(|(id, _)| *id == AttrId::VALUE_LEN));
}

#[test]
fn public_session_cannot_see_a_private_object_created_by_a_logged_in_user() {
    let token = new_token();
    let owner = token.open_session(true).unwrap();
    token.login(owner, SessionRole::User).unwrap();

    let handle = token
        .create_object(
            owner,
            vec![
                (AttrId::CLASS, AttributeValue::U32(ObjectClass::Data.code())),
                (AttrId::PRIVATE, AttributeValue::Bool(true)),
                (AttrId::VALUE, AttributeValue::Bytes(b"secret".to_vec())),
            ],
        )
        .unwrap();

    let stranger = token.open_session(false).unwrap();
    let result = token.show_object(stranger, handle);
    assert!(result.is_err(), "a public session must not be able to read a private object");
}

#[test]
fn mechanism_list_only_reports_mechanisms_this_token_supports() {
    let token = new_token();
    let listed = token.mechanism_list();
    assert!(!listed.is_empty());
    for mechanism in &listed {
        let summary = token.mechanism_info(*mechanism).unwrap();
        assert_ne!(summary.token_supported_functions, 0);
    }
}

#[test]
fn create_object_round_trips_through_the_cli_attribute_grammar() {
    let token = new_token();
    let session = token.open_session(true).unwrap();
    token.login(session, SessionRole::User).unwrap();

    let attrs = ["CLASS=u32:0", "VALUE=hex:cafebabe"]
        .iter()
        .map(|raw| attr_catalog::parse_attr_arg(raw))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let handle = token.create_object(session, attrs).unwrap();
    let value = token.get_attribute_value(session, handle, AttrId::VALUE).unwrap();
    assert_eq!(value, AttributeValue::Bytes(vec![0xca, 0xfe, 0xba, 0xbe]));
}

#[test]
fn every_advertised_mechanism_name_round_trips() {
    for mechanism in MechanismId::ALL {
        let name = mechanism_names::name_of_mechanism(mechanism);
        assert_eq!(mechanism_names::mechanism_by_name(name).unwrap(), mechanism);
    }
}
