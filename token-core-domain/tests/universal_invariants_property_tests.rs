// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Property-based tests for the universal invariants lists: they
//! must hold for every input, not just the literal scenarios the unit
//! tests pin down.

use proptest::prelude::*;
use token_core_domain::entities::AttributeBlob;
use token_core_domain::services::wire::encode_blob;
use token_core_domain::services::{object_builder, sanitizer, CreationOrigin};
use token_core_domain::value_objects::{AttrId, AttributeValue, BooleanProperty, KeyType, ObjectClass};

fn arb_key_type() -> impl Strategy<Value = KeyType> {
    prop_oneof![
        Just(KeyType::Aes),
        Just(KeyType::GenericSecret),
        Just(KeyType::Sha256Hmac),
        Just(KeyType::Rsa),
        Just(KeyType::Ec),
    ]
}

/// A secret-key template with a valid symmetric key type and a `VALUE_LEN`
/// inside the catalog's AES/generic-secret bounds, plus optional boolean
/// properties set from arbitrary bits.
fn arb_secret_key_template() -> impl Strategy<Value = AttributeBlob> {
    (16u32..=32, any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(value_len, sensitive, extractable, token)| {
        let mut blob = AttributeBlob::empty();
        blob.add(AttrId::CLASS, AttributeValue::U32(ObjectClass::SecretKey.code())).unwrap();
        blob.add(AttrId::KEY_TYPE, AttributeValue::U32(KeyType::Aes.code())).unwrap();
        blob.add(AttrId::VALUE_LEN, AttributeValue::U32(value_len)).unwrap();
        blob.add(AttrId::SENSITIVE, AttributeValue::Bool(sensitive)).unwrap();
        blob.add(AttrId::EXTRACTABLE, AttributeValue::Bool(extractable)).unwrap();
        blob.add(AttrId::TOKEN, AttributeValue::Bool(token)).unwrap();
        blob
    })
}

proptest! {
    /// property 1: `sanitize ∘ sanitize` is idempotent.
    #[test]
    fn sanitize_is_idempotent(template in arb_secret_key_template()) {
        let raw = encode_blob(&template);
        let once = sanitizer::sanitize(&raw).unwrap();
        let twice = sanitizer::sanitize(&encode_blob(&once)).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// property 2: every built object carries CLASS, and every key
    /// class carries KEY_TYPE and LOCAL.
    #[test]
    fn built_object_always_carries_required_identity_attrs(template in arb_secret_key_template()) {
        let sanitized = sanitizer::sanitize(&encode_blob(&template)).unwrap();
        let built = object_builder::create_attributes_from_template(sanitized, None, CreationOrigin::Generate).unwrap();
        prop_assert!(built.find(AttrId::CLASS).is_some());
        prop_assert!(built.find(AttrId::KEY_TYPE).is_some());
        prop_assert!(built.find(AttrId::LOCAL).is_some());
    }

    /// property 3: ALWAYS_SENSITIVE implies SENSITIVE, and
    /// NEVER_EXTRACTABLE implies not EXTRACTABLE, for every creation origin.
    #[test]
    fn sensitivity_invariants_hold_for_every_origin(
        template in arb_secret_key_template(),
        origin_idx in 0..3u8,
    ) {
        let origin = match origin_idx {
            0 => CreationOrigin::Generate,
            1 => CreationOrigin::Import,
            _ => CreationOrigin::Derive,
        };
        let sanitized = sanitizer::sanitize(&encode_blob(&template)).unwrap();
        let built = object_builder::create_attributes_from_template(sanitized, None, origin).unwrap();

        if built.get_bool(AttrId::ALWAYS_SENSITIVE) {
            prop_assert!(built.get_bool(AttrId::SENSITIVE));
        }
        if built.get_bool(AttrId::NEVER_EXTRACTABLE) {
            prop_assert!(!built.get_bool(AttrId::EXTRACTABLE));
        }
    }

    /// property 4: `add(blob, id, v); find(blob, id)` returns `v`.
    #[test]
    fn add_then_find_round_trips_bytes(value in proptest::collection::vec(any::<u8>(), 0..64)) {
        let mut blob = AttributeBlob::empty();
        blob.add(AttrId::LABEL, AttributeValue::Bytes(value.clone())).unwrap();
        prop_assert_eq!(blob.find(AttrId::LABEL), Some(&AttributeValue::Bytes(value)));
    }

    /// property 5: `match_reference(a, a)` is always true.
    #[test]
    fn match_reference_is_reflexive(template in arb_secret_key_template()) {
        prop_assert!(template.match_reference(&template));
    }

    /// Sanitizing never produces more than one CLASS or KEY_TYPE entry,
    /// regardless of how many duplicate-but-agreeing entries the raw
    /// template carried.
    #[test]
    fn sanitized_class_and_key_type_are_singletons(key_type in arb_key_type(), repeats in 1..5usize) {
        let class = if key_type.is_symmetric() { ObjectClass::SecretKey } else { ObjectClass::PublicKey };
        let mut blob = AttributeBlob::empty();
        for _ in 0..repeats {
            blob.add(AttrId::CLASS, AttributeValue::U32(class.code())).unwrap();
            blob.add(AttrId::KEY_TYPE, AttributeValue::U32(key_type.code())).unwrap();
        }
        if class == ObjectClass::PublicKey {
            blob.add(AttrId::SUBJECT, AttributeValue::Bytes(vec![])).unwrap();
            if key_type == KeyType::Ec {
                blob.add(AttrId::EC_PARAMS, AttributeValue::Bytes(vec![1, 2, 3])).unwrap();
            } else {
                blob.add(AttrId::MODULUS_BITS, AttributeValue::U32(2048)).unwrap();
            }
        }
        let sanitized = sanitizer::sanitize(&encode_blob(&blob)).unwrap();
        prop_assert_eq!(sanitized.find_all(AttrId::CLASS).count(), 1);
        prop_assert_eq!(sanitized.find_all(AttrId::KEY_TYPE).count(), 1);
    }

    /// MODIFIABLE/COPYABLE/DESTROYABLE default to `true` and every other
    /// boolean property defaults to `false` when the template is silent,
    /// for any subset of booleans the template does set explicitly. A
    /// template that omits `EXTRACTABLE` must default it to `false`, which
    /// in turn forces `NEVER_EXTRACTABLE` to `true` (spec.md §8 scenario 2).
    #[test]
    fn unset_booleans_always_take_the_documented_default(set_sensitive in any::<Option<bool>>()) {
        let mut blob = AttributeBlob::empty();
        blob.add(AttrId::CLASS, AttributeValue::U32(ObjectClass::SecretKey.code())).unwrap();
        blob.add(AttrId::KEY_TYPE, AttributeValue::U32(KeyType::Aes.code())).unwrap();
        blob.add(AttrId::VALUE_LEN, AttributeValue::U32(32)).unwrap();
        if let Some(value) = set_sensitive {
            blob.add(AttrId::SENSITIVE, AttributeValue::Bool(value)).unwrap();
        }
        let built = object_builder::create_attributes_from_template(blob, None, CreationOrigin::Generate).unwrap();

        prop_assert!(built.get_bool(AttrId::MODIFIABLE));
        prop_assert!(built.get_bool(AttrId::COPYABLE));
        prop_assert!(built.get_bool(AttrId::DESTROYABLE));
        prop_assert_eq!(built.get_bool(AttrId::SENSITIVE), set_sensitive.unwrap_or(false));
        prop_assert!(!built.get_bool(BooleanProperty::Trusted.attr_id()));
        prop_assert!(!built.get_bool(AttrId::EXTRACTABLE));
        prop_assert!(built.get_bool(AttrId::NEVER_EXTRACTABLE));
    }
}
