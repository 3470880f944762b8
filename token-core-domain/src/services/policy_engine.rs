// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Policy Engine
//!
//! The cross-cutting Cryptoki rules: every check here is a
//! total function that returns `OK` or a specific error without mutating
//! anything. None of these checks run the cryptographic primitive itself —
//! that remains an external collaborator.

use super::mechanism_catalog;
use crate::entities::{AttributeBlob, Session};
use crate::error::{CoreError, CoreResult};
use crate::value_objects::{AttrId, AttributeValue, BooleanProperty, Function, KeyType, MechanismId, ObjectClass, Step};

/// `check_mechanism_against_processing`.
pub fn check_mechanism_against_processing(
    session: &Session,
    mechanism: MechanismId,
    function: Function,
    step: Step,
) -> CoreResult<()> {
    match step {
        Step::Init => {
            if mechanism_catalog::allowed_functions(mechanism) & function.bit() == 0 {
                Err(CoreError::KeyFunctionNotPermitted(format!(
                    "{function:?} is not an allowed function of {mechanism:?}"
                )))
            } else {
                Ok(())
            }
        }
        Step::OneShot | Step::Update => {
            check_reauthentication(session)?;
            if let Some(processing) = session.processing() {
                if processing.updated && mechanism_catalog::one_shot_only(mechanism) {
                    return Err(CoreError::KeyFunctionNotPermitted(format!("{mechanism:?} is one-shot only")));
                }
            }
            Ok(())
        }
        Step::Final => check_reauthentication(session),
    }
}

fn check_reauthentication(session: &Session) -> CoreResult<()> {
    match session.processing() {
        Some(processing) if processing.always_authenticate && !processing.reauthenticated => {
            Err(CoreError::UserNotLoggedIn)
        }
        _ => Ok(()),
    }
}

/// `check_created_attrs_against_token`.
pub fn check_created_attrs_against_token(session: &Session, attrs: &AttributeBlob) -> CoreResult<()> {
    check_sensitivity_monotonicity(attrs)?;

    if attrs.get_bool(AttrId::TRUSTED) && !session.is_security_officer() {
        return Err(CoreError::KeyFunctionNotPermitted("TRUSTED objects require a security officer session".into()));
    }
    if attrs.get_bool(AttrId::TOKEN) && !session.is_read_write() {
        return Err(CoreError::SessionReadOnly);
    }
    Ok(())
}

fn check_sensitivity_monotonicity(attrs: &AttributeBlob) -> CoreResult<()> {
    if attrs.get_bool(AttrId::ALWAYS_SENSITIVE) && !attrs.get_bool(AttrId::SENSITIVE) {
        return Err(CoreError::GeneralError);
    }
    if attrs.get_bool(AttrId::NEVER_EXTRACTABLE) && attrs.get_bool(AttrId::EXTRACTABLE) {
        return Err(CoreError::GeneralError);
    }
    Ok(())
}

/// `check_access_attrs_against_token`.
pub fn check_access_attrs_against_token(session: &Session, attrs: &AttributeBlob) -> CoreResult<()> {
    let is_private_key = attrs.get_u32(AttrId::CLASS).ok().and_then(|code| ObjectClass::from_code(code).ok())
        == Some(ObjectClass::PrivateKey);
    let is_private = is_private_key || attrs.get_bool(AttrId::PRIVATE);
    if is_private && !session.is_logged_in() {
        return Err(CoreError::KeyFunctionNotPermitted("private objects are not accessible from a public session".into()));
    }
    Ok(())
}

/// `check_created_attrs_against_processing`.
pub fn check_created_attrs_against_processing(mechanism: MechanismId, attrs: &AttributeBlob) -> CoreResult<()> {
    use MechanismId::*;

    let local = attrs.get_bool(AttrId::LOCAL);
    match mechanism {
        Ecdh1Derive | Ecdh1CofactorDerive | DhPkcsDerive => {
            if local {
                return Err(CoreError::KeyFunctionNotPermitted("derived keys must not be LOCAL".into()));
            }
        }
        AesKeyGen | GenericSecretKeyGen | RsaPkcsKeyPairGen | EcKeyPairGen => {
            if !local {
                return Err(CoreError::KeyFunctionNotPermitted("generated keys must be LOCAL".into()));
            }
        }
        _ => {}
    }

    let key_type = attrs.get_u32(AttrId::KEY_TYPE).ok().and_then(|code| KeyType::from_code(code).ok());
    match mechanism {
        AesKeyGen if key_type != Some(KeyType::Aes) => {
            return Err(CoreError::KeyFunctionNotPermitted("AES_KEY_GEN requires KEY_TYPE=AES".into()))
        }
        EcKeyPairGen if key_type != Some(KeyType::Ec) => {
            return Err(CoreError::KeyFunctionNotPermitted("EC_KEY_PAIR_GEN requires KEY_TYPE=EC".into()))
        }
        RsaPkcsKeyPairGen if key_type != Some(KeyType::Rsa) => {
            return Err(CoreError::KeyFunctionNotPermitted("RSA_PKCS_KEY_PAIR_GEN requires KEY_TYPE=RSA".into()))
        }
        GenericSecretKeyGen if key_type != Some(KeyType::GenericSecret) => {
            return Err(CoreError::KeyFunctionNotPermitted("GENERIC_SECRET_KEY_GEN requires KEY_TYPE=GENERIC_SECRET".into()))
        }
        _ => {}
    }

    if matches!(mechanism, Ecdh1Derive | Ecdh1CofactorDerive | DhPkcsDerive) {
        let class = attrs.get_u32(AttrId::CLASS).ok().and_then(|code| ObjectClass::from_code(code).ok());
        if class != Some(ObjectClass::SecretKey) {
            return Err(CoreError::KeyFunctionNotPermitted("derived objects must be SECRET_KEY".into()));
        }
    }

    Ok(())
}

/// `check_created_attrs`. `second` is the private half of a pair
/// for `GENERATE_PAIR`.
pub fn check_created_attrs(first: &AttributeBlob, second: Option<&AttributeBlob>) -> CoreResult<()> {
    check_key_size(first)?;
    if let Some(second) = second {
        check_key_size(second)?;
        if first.get_u32(AttrId::KEY_TYPE).ok() != second.get_u32(AttrId::KEY_TYPE).ok() {
            return Err(CoreError::TemplateInconsistent("key pair halves must share KEY_TYPE".into()));
        }
    }
    Ok(())
}

fn check_key_size(attrs: &AttributeBlob) -> CoreResult<()> {
    let key_type = match attrs.get_u32(AttrId::KEY_TYPE).ok().and_then(|code| KeyType::from_code(code).ok()) {
        Some(kt) => kt,
        None => return Ok(()),
    };

    match key_type {
        KeyType::Ec => Ok(()),
        KeyType::Rsa | KeyType::Dsa | KeyType::Dh => {
            if let Ok(bits) = attrs.get_u32(AttrId::MODULUS_BITS) {
                let (min, max) = mechanism_catalog::key_size_bounds(MechanismId::RsaPkcsKeyPairGen)?;
                if bits < min || bits > max {
                    return Err(CoreError::KeySizeRange(format!("MODULUS_BITS {bits} out of range [{min}, {max}]")));
                }
            }
            Ok(())
        }
        _ => {
            if let Ok(len) = attrs.get_u32(AttrId::VALUE_LEN) {
                let mechanism = if key_type == KeyType::Aes { MechanismId::AesKeyGen } else { MechanismId::GenericSecretKeyGen };
                let (min, max) = mechanism_catalog::key_size_bounds(mechanism)?;
                if len < min || len > max {
                    return Err(CoreError::KeySizeRange(format!("VALUE_LEN {len} out of range [{min}, {max}]")));
                }
            }
            Ok(())
        }
    }
}

/// `check_parent_attrs_against_processing`.
pub fn check_parent_attrs_against_processing(
    mechanism: MechanismId,
    function: Function,
    parent_attrs: &AttributeBlob,
) -> CoreResult<()> {
    if let Some(required) = function.required_parent_flag() {
        if !parent_attrs.get_bool(required.attr_id()) {
            return Err(CoreError::KeyFunctionNotPermitted(format!("parent object does not permit {function:?}")));
        }
    }

    let key_type = parent_attrs.get_u32(AttrId::KEY_TYPE).ok().and_then(|code| KeyType::from_code(code).ok());
    let class = parent_attrs.get_u32(AttrId::CLASS).ok().and_then(|code| ObjectClass::from_code(code).ok());

    let family_ok = match mechanism {
        MechanismId::AesEcb | MechanismId::AesCbc | MechanismId::AesCbcPad | MechanismId::AesCtr | MechanismId::AesGcm
        | MechanismId::AesCmac | MechanismId::AesMac => class == Some(ObjectClass::SecretKey) && key_type == Some(KeyType::Aes),
        MechanismId::Md5Hmac | MechanismId::Sha1Hmac | MechanismId::Sha224Hmac | MechanismId::Sha256Hmac
        | MechanismId::Sha384Hmac | MechanismId::Sha512Hmac => {
            class == Some(ObjectClass::SecretKey)
                && matches!(
                    key_type,
                    Some(KeyType::GenericSecret)
                        | Some(KeyType::Md5Hmac)
                        | Some(KeyType::Sha1Hmac)
                        | Some(KeyType::Sha224Hmac)
                        | Some(KeyType::Sha256Hmac)
                        | Some(KeyType::Sha384Hmac)
                        | Some(KeyType::Sha512Hmac)
                )
        }
        MechanismId::Ecdsa | MechanismId::EcdsaSha1 | MechanismId::Ecdh1Derive | MechanismId::Ecdh1CofactorDerive => {
            matches!(class, Some(ObjectClass::PublicKey) | Some(ObjectClass::PrivateKey)) && key_type == Some(KeyType::Ec)
        }
        MechanismId::RsaPkcs | MechanismId::RsaPkcsOaep | MechanismId::RsaPkcsPss | MechanismId::RsaX509 => {
            matches!(class, Some(ObjectClass::PublicKey) | Some(ObjectClass::PrivateKey)) && key_type == Some(KeyType::Rsa)
        }
        MechanismId::DhPkcsDerive => {
            matches!(class, Some(ObjectClass::PublicKey) | Some(ObjectClass::PrivateKey)) && key_type == Some(KeyType::Dh)
        }
        _ => false,
    };
    if !family_ok {
        return Err(CoreError::KeyFunctionNotPermitted(format!(
            "{mechanism:?} is not compatible with the parent object's class/key type"
        )));
    }

    if let Some(AttributeValue::Bytes(raw)) = parent_attrs.find(AttrId::ALLOWED_MECHANISMS) {
        let allowed = raw.chunks_exact(4).map(|c| u32::from_le_bytes(c.try_into().unwrap()));
        if !allowed.clone().any(|code| code == mechanism.code()) {
            return Err(CoreError::KeyFunctionNotPermitted(format!(
                "{mechanism:?} is not present in the parent's ALLOWED_MECHANISMS"
            )));
        }
    }

    Ok(())
}

/// `add_missing_attribute_id`, used by `GENERATE_KEY_PAIR`.
pub fn add_missing_attribute_id(first: &mut AttributeBlob, second: Option<&mut AttributeBlob>) -> CoreResult<()> {
    let first_id = first.find(AttrId::ID).and_then(|v| v.as_bytes().map(|b| b.to_vec()));
    let second_id = match &second {
        Some(blob) => blob.find(AttrId::ID).and_then(|v| v.as_bytes().map(|b| b.to_vec())),
        None => None,
    };

    let shared = match (first_id, second_id) {
        (Some(id), _) => id,
        (None, Some(id)) => id,
        (None, None) => {
            use rand::RngCore;
            let mut id = vec![0u8; 16];
            rand::rng().fill_bytes(&mut id);
            id
        }
    };

    if first.find(AttrId::ID).is_none() {
        first.add(AttrId::ID, AttributeValue::Bytes(shared.clone()))?;
    }
    if let Some(second) = second {
        if second.find(AttrId::ID).is_none() {
            second.add(AttrId::ID, AttributeValue::Bytes(shared))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aes_key(encrypt: bool) -> AttributeBlob {
        let mut blob = AttributeBlob::empty();
        blob.add(AttrId::CLASS, AttributeValue::U32(ObjectClass::SecretKey.code())).unwrap();
        blob.add(AttrId::KEY_TYPE, AttributeValue::U32(KeyType::Aes.code())).unwrap();
        blob.add(AttrId::ENCRYPT, AttributeValue::Bool(encrypt)).unwrap();
        blob
    }

    #[test]
    fn mechanism_init_rejects_function_outside_allowed_set() {
        let session = Session::open(true);
        let err = check_mechanism_against_processing(&session, MechanismId::AesKeyGen, Function::Encrypt, Step::Init)
            .unwrap_err();
        assert!(matches!(err, CoreError::KeyFunctionNotPermitted(_)));
    }

    #[test]
    fn mechanism_init_allows_matching_function() {
        let session = Session::open(true);
        assert!(check_mechanism_against_processing(&session, MechanismId::AesEcb, Function::Encrypt, Step::Init).is_ok());
    }

    #[test]
    fn one_shot_mechanism_rejected_after_update() {
        let mut session = Session::open(true);
        session.begin_processing(MechanismId::AesMac, Function::Sign, false);
        session.mark_updated();
        let err = check_mechanism_against_processing(&session, MechanismId::AesMac, Function::Sign, Step::Update).unwrap_err();
        assert!(matches!(err, CoreError::KeyFunctionNotPermitted(_)));
    }

    #[test]
    fn always_authenticate_without_relogin_fails() {
        let mut session = Session::open(true);
        session.begin_processing(MechanismId::RsaPkcs, Function::Sign, true);
        let err = check_mechanism_against_processing(&session, MechanismId::RsaPkcs, Function::Sign, Step::OneShot).unwrap_err();
        assert!(matches!(err, CoreError::UserNotLoggedIn));
    }

    #[test]
    fn trusted_object_requires_security_officer() {
        let session = Session::open(true);
        let mut attrs = AttributeBlob::empty();
        attrs.add(AttrId::TRUSTED, AttributeValue::Bool(true)).unwrap();
        let err = check_created_attrs_against_token(&session, &attrs).unwrap_err();
        assert!(matches!(err, CoreError::KeyFunctionNotPermitted(_)));
    }

    #[test]
    fn token_object_requires_read_write_session() {
        let session = Session::open(false);
        let mut attrs = AttributeBlob::empty();
        attrs.add(AttrId::TOKEN, AttributeValue::Bool(true)).unwrap();
        assert_eq!(check_created_attrs_against_token(&session, &attrs), Err(CoreError::SessionReadOnly));
    }

    #[test]
    fn public_session_cannot_access_private_objects() {
        let session = Session::open(true);
        let mut attrs = AttributeBlob::empty();
        attrs.add(AttrId::CLASS, AttributeValue::U32(ObjectClass::PrivateKey.code())).unwrap();
        assert!(check_access_attrs_against_token(&session, &attrs).is_err());
    }

    #[test]
    fn parent_requires_matching_function_flag() {
        let parent = aes_key(false);
        let err = check_parent_attrs_against_processing(MechanismId::AesEcb, Function::Encrypt, &parent).unwrap_err();
        assert!(matches!(err, CoreError::KeyFunctionNotPermitted(_)));
    }

    #[test]
    fn parent_allowed_mechanisms_list_is_enforced() {
        let mut parent = aes_key(true);
        let allowed: Vec<u8> = MechanismId::AesCbc.code().to_le_bytes().to_vec();
        parent.add(AttrId::ALLOWED_MECHANISMS, AttributeValue::Bytes(allowed)).unwrap();
        let err = check_parent_attrs_against_processing(MechanismId::AesEcb, Function::Encrypt, &parent).unwrap_err();
        assert!(matches!(err, CoreError::KeyFunctionNotPermitted(_)));
        assert!(check_parent_attrs_against_processing(MechanismId::AesCbc, Function::Encrypt, &parent).is_ok());
    }

    #[test]
    fn key_pair_halves_must_share_key_type() {
        let mut pub_key = AttributeBlob::empty();
        pub_key.add(AttrId::KEY_TYPE, AttributeValue::U32(KeyType::Rsa.code())).unwrap();
        let mut priv_key = AttributeBlob::empty();
        priv_key.add(AttrId::KEY_TYPE, AttributeValue::U32(KeyType::Ec.code())).unwrap();
        assert!(matches!(check_created_attrs(&pub_key, Some(&priv_key)), Err(CoreError::TemplateInconsistent(_))));
    }

    #[test]
    fn add_missing_attribute_id_generates_and_shares_one_id() {
        let mut first = AttributeBlob::empty();
        let mut second = AttributeBlob::empty();
        add_missing_attribute_id(&mut first, Some(&mut second)).unwrap();
        assert_eq!(first.find(AttrId::ID), second.find(AttrId::ID));
    }
}
