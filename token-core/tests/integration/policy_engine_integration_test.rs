//! # Policy Engine Integration Tests
//!
//! Drives the policy engine's checks through the [`Token`] facade end to
//! end rather than calling `token_core_domain::services::policy_engine`
//! directly, so a regression here catches a wiring mistake in `token.rs`
//! (wrong check, wrong order) as well as a logic mistake in the engine
//! itself.

use std::sync::Arc;

use token_core::application::Token;
use token_core::infrastructure::repositories::{InMemoryObjectRepository, InMemorySessionRepository, RandPrimitiveEngine};
use token_core_domain::error::CoreError;
use token_core_domain::value_objects::{AttrId, AttributeValue, Function, KeyType, MechanismId, ObjectClass, SessionRole};

fn new_token() -> Token {
    Token::new(
        Arc::new(InMemoryObjectRepository::new()),
        Arc::new(InMemorySessionRepository::new()),
        Arc::new(RandPrimitiveEngine::new()),
    )
}

#[test]
fn generate_key_out_of_bounds_value_len_is_key_size_range() {
    let token = new_token();
    let session = token.open_session(true).unwrap();
    token.login(session, SessionRole::User).unwrap();

    let attrs = vec![
        (AttrId::CLASS, AttributeValue::U32(ObjectClass::SecretKey.code())),
        (AttrId::KEY_TYPE, AttributeValue::U32(KeyType::Aes.code())),
        (AttrId::VALUE_LEN, AttributeValue::U32(8)), // below the 16-byte AES floor
    ];
    let err = token.generate_key(session, MechanismId::AesKeyGen, attrs).unwrap_err();
    assert!(matches!(err, CoreError::KeySizeRange(_)));
}

#[test]
fn generate_key_with_mismatched_key_type_is_key_function_not_permitted() {
    let token = new_token();
    let session = token.open_session(true).unwrap();
    token.login(session, SessionRole::User).unwrap();

    let attrs = vec![
        (AttrId::CLASS, AttributeValue::U32(ObjectClass::SecretKey.code())),
        (AttrId::KEY_TYPE, AttributeValue::U32(KeyType::GenericSecret.code())),
        (AttrId::VALUE_LEN, AttributeValue::U32(32)),
    ];
    // AES_KEY_GEN demands KEY_TYPE=AES regardless of what the template says.
    let err = token.generate_key(session, MechanismId::AesKeyGen, attrs).unwrap_err();
    assert!(matches!(err, CoreError::KeyFunctionNotPermitted(_)));
}

#[test]
fn trusted_object_requires_a_security_officer_session() {
    let token = new_token();
    let session = token.open_session(true).unwrap();
    token.login(session, SessionRole::User).unwrap();

    let attrs = vec![
        (AttrId::CLASS, AttributeValue::U32(ObjectClass::Data.code())),
        (AttrId::TRUSTED, AttributeValue::Bool(true)),
    ];
    let err = token.create_object(session, attrs.clone()).unwrap_err();
    assert!(matches!(err, CoreError::KeyFunctionNotPermitted(_)));

    token.login(session, SessionRole::SecurityOfficer).unwrap();
    assert!(token.create_object(session, attrs).is_ok());
}

#[test]
fn token_object_requires_a_read_write_session() {
    let token = new_token();
    let session = token.open_session(false).unwrap();
    token.login(session, SessionRole::User).unwrap();

    let attrs =
        vec![(AttrId::CLASS, AttributeValue::U32(ObjectClass::Data.code())), (AttrId::TOKEN, AttributeValue::Bool(true))];
    let err = token.create_object(session, attrs).unwrap_err();
    assert!(matches!(err, CoreError::SessionReadOnly));
}

#[test]
fn begin_processing_with_a_non_signing_key_is_rejected_before_any_step_runs() {
    let token = new_token();
    let session = token.open_session(true).unwrap();
    token.login(session, SessionRole::User).unwrap();

    let attrs = vec![
        (AttrId::CLASS, AttributeValue::U32(ObjectClass::SecretKey.code())),
        (AttrId::KEY_TYPE, AttributeValue::U32(KeyType::Aes.code())),
        (AttrId::VALUE_LEN, AttributeValue::U32(32)),
        (AttrId::SIGN, AttributeValue::Bool(false)),
    ];
    let key = token.generate_key(session, MechanismId::AesKeyGen, attrs).unwrap();

    let err = token.begin_processing(session, MechanismId::AesCmac, Function::Sign, Some(key)).unwrap_err();
    assert!(matches!(err, CoreError::KeyFunctionNotPermitted(_)));
}

#[test]
fn begin_processing_succeeds_once_the_key_permits_the_function() {
    let token = new_token();
    let session = token.open_session(true).unwrap();
    token.login(session, SessionRole::User).unwrap();

    let attrs = vec![
        (AttrId::CLASS, AttributeValue::U32(ObjectClass::SecretKey.code())),
        (AttrId::KEY_TYPE, AttributeValue::U32(KeyType::Aes.code())),
        (AttrId::VALUE_LEN, AttributeValue::U32(32)),
        (AttrId::SIGN, AttributeValue::Bool(true)),
        (AttrId::VERIFY, AttributeValue::Bool(true)),
    ];
    let key = token.generate_key(session, MechanismId::AesKeyGen, attrs).unwrap();

    assert!(token.begin_processing(session, MechanismId::AesCmac, Function::Sign, Some(key)).is_ok());
}
