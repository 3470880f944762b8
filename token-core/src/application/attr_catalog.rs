// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Attribute Name Catalog
//!
//! Maps the `--attr`/`--pub-attr`/`--priv-attr` CLI grammar
//! (`NAME=KIND:VALUE`, `KIND` one of `bool`/`u32`/`hex`) onto typed
//! `(AttrId, AttributeValue)` pairs. `token-core-bootstrap::cli` only
//! guarantees the `NAME=VALUE` shape; this module owns the Cryptoki-specific
//! half, since that's the part that needs the attribute catalog.

use token_core_domain::error::{CoreError, CoreResult};
use token_core_domain::value_objects::{AttrId, AttributeValue};

/// Attribute name ↔ [`AttrId`] table. Intentionally flat (no recognizer
/// generated from `AttrId`'s constants, which carry no name metadata of
/// their own) so a new name is a one-line addition here.
const ATTR_NAMES: &[(&str, AttrId)] = &[
    ("CLASS", AttrId::CLASS),
    ("TOKEN", AttrId::TOKEN),
    ("PRIVATE", AttrId::PRIVATE),
    ("LABEL", AttrId::LABEL),
    ("TRUSTED", AttrId::TRUSTED),
    ("APPLICATION", AttrId::APPLICATION),
    ("VALUE", AttrId::VALUE),
    ("OBJECT_ID", AttrId::OBJECT_ID),
    ("KEY_TYPE", AttrId::KEY_TYPE),
    ("SUBJECT", AttrId::SUBJECT),
    ("ID", AttrId::ID),
    ("SENSITIVE", AttrId::SENSITIVE),
    ("ENCRYPT", AttrId::ENCRYPT),
    ("DECRYPT", AttrId::DECRYPT),
    ("WRAP", AttrId::WRAP),
    ("UNWRAP", AttrId::UNWRAP),
    ("SIGN", AttrId::SIGN),
    ("SIGN_RECOVER", AttrId::SIGN_RECOVER),
    ("VERIFY", AttrId::VERIFY),
    ("VERIFY_RECOVER", AttrId::VERIFY_RECOVER),
    ("DERIVE", AttrId::DERIVE),
    ("START_DATE", AttrId::START_DATE),
    ("END_DATE", AttrId::END_DATE),
    ("MODULUS", AttrId::MODULUS),
    ("MODULUS_BITS", AttrId::MODULUS_BITS),
    ("PUBLIC_EXPONENT", AttrId::PUBLIC_EXPONENT),
    ("PRIVATE_EXPONENT", AttrId::PRIVATE_EXPONENT),
    ("PRIME_1", AttrId::PRIME_1),
    ("PRIME_2", AttrId::PRIME_2),
    ("EXPONENT_1", AttrId::EXPONENT_1),
    ("EXPONENT_2", AttrId::EXPONENT_2),
    ("COEFFICIENT", AttrId::COEFFICIENT),
    ("VALUE_LEN", AttrId::VALUE_LEN),
    ("EXTRACTABLE", AttrId::EXTRACTABLE),
    ("LOCAL", AttrId::LOCAL),
    ("NEVER_EXTRACTABLE", AttrId::NEVER_EXTRACTABLE),
    ("ALWAYS_SENSITIVE", AttrId::ALWAYS_SENSITIVE),
    ("MODIFIABLE", AttrId::MODIFIABLE),
    ("DESTROYABLE", AttrId::DESTROYABLE),
    ("COPYABLE", AttrId::COPYABLE),
    ("EC_PARAMS", AttrId::EC_PARAMS),
    ("EC_POINT", AttrId::EC_POINT),
    ("ALWAYS_AUTHENTICATE", AttrId::ALWAYS_AUTHENTICATE),
    ("WRAP_WITH_TRUSTED", AttrId::WRAP_WITH_TRUSTED),
    ("PUBLIC_KEY_INFO", AttrId::PUBLIC_KEY_INFO),
    ("WRAP_TEMPLATE", AttrId::WRAP_TEMPLATE),
    ("UNWRAP_TEMPLATE", AttrId::UNWRAP_TEMPLATE),
    ("DERIVE_TEMPLATE", AttrId::DERIVE_TEMPLATE),
    ("ALLOWED_MECHANISMS", AttrId::ALLOWED_MECHANISMS),
];

pub fn attr_id_by_name(name: &str) -> CoreResult<AttrId> {
    ATTR_NAMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, id)| *id)
        .ok_or_else(|| CoreError::AttributeTypeInvalid(format!("unknown attribute name {name:?}")))
}

/// Used by the presentation layer to print an attribute back out by name
/// rather than its raw `0x........` form, when the id is recognized.
pub fn name_of_attr(id: AttrId) -> Option<&'static str> {
    ATTR_NAMES.iter().find(|(_, a)| *a == id).map(|(n, _)| *n)
}

/// Parses one `NAME=KIND:VALUE` CLI argument into a typed attribute.
/// `token-core-bootstrap::cli::validate_attr_arg` has already guaranteed
/// `NAME=VALUE` shape; this additionally requires the value half to be
/// `KIND:VALUE` with `KIND` in `{bool, u32, hex}`.
pub fn parse_attr_arg(raw: &str) -> CoreResult<(AttrId, AttributeValue)> {
    let (name, rest) = raw
        .split_once('=')
        .ok_or_else(|| CoreError::AttributeValueInvalid(format!("{raw:?} is not NAME=VALUE")))?;
    let id = attr_id_by_name(name)?;
    let (kind, value) = rest
        .split_once(':')
        .ok_or_else(|| CoreError::AttributeValueInvalid(format!("{rest:?} is not KIND:VALUE")))?;

    let parsed = match kind {
        "bool" => AttributeValue::Bool(parse_bool(value)?),
        "u32" => {
            let v = value.parse::<u32>().map_err(|_| CoreError::AttributeValueInvalid(format!("{value:?} is not a u32")))?;
            AttributeValue::U32(v)
        }
        "hex" => {
            let bytes = hex::decode(value).map_err(|e| CoreError::AttributeValueInvalid(format!("invalid hex: {e}")))?;
            AttributeValue::Bytes(bytes)
        }
        other => return Err(CoreError::AttributeTypeInvalid(format!("unknown value kind {other:?} (expected bool/u32/hex)"))),
    };
    Ok((id, parsed))
}

fn parse_bool(value: &str) -> CoreResult<bool> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(CoreError::AttributeValueInvalid(format!("{other:?} is not a bool"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_u32_attribute() {
        let (id, value) = parse_attr_arg("VALUE_LEN=u32:32").unwrap();
        assert_eq!(id, AttrId::VALUE_LEN);
        assert_eq!(value, AttributeValue::U32(32));
    }

    #[test]
    fn parses_bool_attribute() {
        let (id, value) = parse_attr_arg("SENSITIVE=bool:true").unwrap();
        assert_eq!(id, AttrId::SENSITIVE);
        assert_eq!(value, AttributeValue::Bool(true));
    }

    #[test]
    fn parses_hex_attribute() {
        let (id, value) = parse_attr_arg("VALUE=hex:00112233").unwrap();
        assert_eq!(id, AttrId::VALUE);
        assert_eq!(value, AttributeValue::Bytes(vec![0x00, 0x11, 0x22, 0x33]));
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert!(matches!(parse_attr_arg("NOT_A_THING=u32:1"), Err(CoreError::AttributeTypeInvalid(_))));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!(matches!(parse_attr_arg("CLASS=oct:4"), Err(CoreError::AttributeTypeInvalid(_))));
    }

    #[test]
    fn name_of_attr_round_trips_known_ids() {
        assert_eq!(name_of_attr(AttrId::CLASS), Some("CLASS"));
        assert_eq!(name_of_attr(AttrId(0x1234_5678)), None);
    }
}
