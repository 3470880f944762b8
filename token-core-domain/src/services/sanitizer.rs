// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Sanitizer
//!
//! Normalizes a raw client template into a canonical [`AttributeBlob`]
//!: at most one `CLASS`/`KEY_TYPE`, boolean properties
//! collapsed to one canonical byte each, nested templates recursively
//! sanitized, everything else copied verbatim after a catalog check.

use crate::entities::AttributeBlob;
use crate::error::{CoreError, CoreResult};
use crate::value_objects::{value_kind_of, AttrId, AttributeValue, BooleanProperty, KeyType, ObjectClass};

use super::wire;

/// Sanitizes a raw wire-format template into a canonical blob.
pub fn sanitize(raw: &[u8]) -> CoreResult<AttributeBlob> {
    let entries = wire::parse_template(raw)?;
    sanitize_entries(&entries)
}

/// Sanitizes an already-parsed list of `(id, bytes)` pairs, recursively
/// invoked for nested `WRAP_TEMPLATE`/`UNWRAP_TEMPLATE`/`DERIVE_TEMPLATE`
/// values.
fn sanitize_entries(entries: &[(AttrId, Vec<u8>)]) -> CoreResult<AttributeBlob> {
    let mut out = AttributeBlob::empty();

    // Pass A: extract CLASS and KEY_TYPE, rejecting conflicting duplicates.
    let mut class_bytes: Option<&[u8]> = None;
    let mut key_type_bytes: Option<&[u8]> = None;
    for (id, bytes) in entries {
        match *id {
            AttrId::CLASS => {
                if let Some(existing) = class_bytes {
                    if existing != bytes.as_slice() {
                        return Err(CoreError::TemplateInconsistent("conflicting CLASS values".into()));
                    }
                } else {
                    class_bytes = Some(bytes);
                }
            }
            AttrId::KEY_TYPE => {
                if let Some(existing) = key_type_bytes {
                    if existing != bytes.as_slice() {
                        return Err(CoreError::TemplateInconsistent("conflicting KEY_TYPE values".into()));
                    }
                } else {
                    key_type_bytes = Some(bytes);
                }
            }
            _ => {}
        }
    }
    if let Some(bytes) = class_bytes {
        out.add(AttrId::CLASS, wire::decode_value(AttrId::CLASS, bytes)?)?;
    }
    if let Some(bytes) = key_type_bytes {
        out.add(AttrId::KEY_TYPE, wire::decode_value(AttrId::KEY_TYPE, bytes)?)?;
    }

    let is_key_class = match class_bytes {
        Some(bytes) => {
            let code = u32::from_le_bytes(
                bytes.try_into().map_err(|_| CoreError::AttributeValueInvalid("CLASS must be 4 bytes".into()))?,
            );
            ObjectClass::from_code(code)?.is_key_class()
        }
        None => false,
    };

    // Pass B: every other entry, categorized.
    let mut seen_bool: Vec<(BooleanProperty, bool)> = Vec::new();
    for (id, bytes) in entries {
        if *id == AttrId::CLASS || *id == AttrId::KEY_TYPE {
            continue;
        }

        if let Some(property) = id.boolean_property() {
            if bytes.len() != 1 {
                return Err(CoreError::AttributeValueInvalid(format!("{id} must be 1 byte")));
            }
            let value = bytes[0] != 0;
            if let Some((_, existing)) = seen_bool.iter().find(|(p, _)| *p == property) {
                if *existing != value {
                    return Err(CoreError::TemplateInconsistent(format!("conflicting values for {id}")));
                }
                continue;
            }
            seen_bool.push((property, value));
            out.add(*id, AttributeValue::Bool(value))?;
            continue;
        }

        if matches!(*id, AttrId::WRAP_TEMPLATE | AttrId::UNWRAP_TEMPLATE | AttrId::DERIVE_TEMPLATE) {
            if !is_key_class {
                return Err(CoreError::TemplateInconsistent(format!("{id} requires a key class")));
            }
            let nested = wire::parse_template(bytes)?;
            let nested_blob = sanitize_entries(&nested)?;
            out.add(*id, AttributeValue::Template(nested_blob))?;
            continue;
        }

        match value_kind_of(*id) {
            Some(_) => {
                let value = wire::decode_value(*id, bytes)?;
                out.add(*id, value)?;
            }
            None => {
                return Err(CoreError::AttributeTypeInvalid(format!("unrecognized attribute {id}")));
            }
        }
    }

    // Class/type consistency.
    if let (Some(class_bytes), Some(key_type_bytes)) = (class_bytes, key_type_bytes) {
        let class = ObjectClass::from_code(u32::from_le_bytes(class_bytes.try_into().unwrap()))?;
        let key_type = KeyType::from_code(u32::from_le_bytes(key_type_bytes.try_into().unwrap()))?;
        key_type.check_class_consistency(class)?;
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::wire::encode_blob;

    fn raw_template(entries: &[(AttrId, AttributeValue)]) -> Vec<u8> {
        let mut blob = AttributeBlob::empty();
        for (id, value) in entries {
            blob.add(*id, value.clone()).unwrap();
        }
        encode_blob(&blob)
    }

    #[test]
    fn conflicting_class_values_are_inconsistent() {
        let mut blob = AttributeBlob::empty();
        blob.add(AttrId::CLASS, AttributeValue::U32(ObjectClass::Data.code())).unwrap();
        blob.add(AttrId::CLASS, AttributeValue::U32(ObjectClass::SecretKey.code())).unwrap();
        let raw = encode_blob(&blob);
        assert!(matches!(sanitize(&raw), Err(CoreError::TemplateInconsistent(_))));
    }

    #[test]
    fn duplicate_boolean_with_same_value_collapses_to_one_entry() {
        let mut blob = AttributeBlob::empty();
        blob.add(AttrId::TOKEN, AttributeValue::Bool(true)).unwrap();
        blob.add(AttrId::TOKEN, AttributeValue::Bool(true)).unwrap();
        let raw = encode_blob(&blob);
        let out = sanitize(&raw).unwrap();
        assert_eq!(out.find_all(AttrId::TOKEN).count(), 1);
    }

    #[test]
    fn duplicate_boolean_with_conflicting_values_is_inconsistent() {
        let mut blob = AttributeBlob::empty();
        blob.add(AttrId::TOKEN, AttributeValue::Bool(true)).unwrap();
        blob.add(AttrId::TOKEN, AttributeValue::Bool(false)).unwrap();
        let raw = encode_blob(&blob);
        assert!(matches!(sanitize(&raw), Err(CoreError::TemplateInconsistent(_))));
    }

    #[test]
    fn unknown_attribute_id_is_type_invalid() {
        let raw = raw_template(&[(AttrId(0x9abc_def0), AttributeValue::Bytes(vec![1]))]);
        assert!(matches!(sanitize(&raw), Err(CoreError::AttributeTypeInvalid(_))));
    }

    #[test]
    fn secret_key_with_asymmetric_key_type_is_inconsistent() {
        let raw = raw_template(&[
            (AttrId::CLASS, AttributeValue::U32(ObjectClass::SecretKey.code())),
            (AttrId::KEY_TYPE, AttributeValue::U32(crate::value_objects::KeyType::Rsa.code())),
        ]);
        assert!(matches!(sanitize(&raw), Err(CoreError::TemplateInconsistent(_))));
    }

    #[test]
    fn wrap_template_on_non_key_class_is_rejected() {
        let inner = raw_template(&[(AttrId::ENCRYPT, AttributeValue::Bool(true))]);
        let raw = raw_template(&[
            (AttrId::CLASS, AttributeValue::U32(ObjectClass::Data.code())),
            (AttrId::WRAP_TEMPLATE, AttributeValue::Bytes(inner)),
        ]);
        assert!(matches!(sanitize(&raw), Err(CoreError::TemplateInconsistent(_))));
    }

    #[test]
    fn sanitize_is_idempotent_on_its_own_output() {
        let raw = raw_template(&[
            (AttrId::CLASS, AttributeValue::U32(ObjectClass::SecretKey.code())),
            (AttrId::KEY_TYPE, AttributeValue::U32(crate::value_objects::KeyType::Aes.code())),
            (AttrId::TOKEN, AttributeValue::Bool(true)),
        ]);
        let once = sanitize(&raw).unwrap();
        let twice = sanitize(&encode_blob(&once)).unwrap();
        assert_eq!(once, twice);
    }
}
