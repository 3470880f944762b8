// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Attribute Value
//!
//! Typed in-memory representation of an attribute's value. The wire format
//! is still the exact 4-byte-size-prefixed byte layout; [`AttributeValue`]
//! is what the Sanitizer and Object Builder actually operate on, with
//! [`crate::services::wire`] converting at the boundary.

use super::attr_id::AttrId;
use crate::entities::AttributeBlob;
use serde::{Deserialize, Serialize};

/// The four shapes an attribute value can take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// A single boolean property byte (0x00 or 0x01).
    Bool(bool),
    /// A 4-byte little-endian unsigned scalar (e.g. `MODULUS_BITS`,
    /// `VALUE_LEN`).
    U32(u32),
    /// Opaque variable-length bytes (e.g. `MODULUS`, `VALUE`, `LABEL`).
    Bytes(Vec<u8>),
    /// A nested attribute template (`WRAP_TEMPLATE`, `UNWRAP_TEMPLATE`,
    /// `DERIVE_TEMPLATE`).
    Template(AttributeBlob),
}

impl AttributeValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self {
            AttributeValue::U32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            AttributeValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_template(&self) -> Option<&AttributeBlob> {
        match self {
            AttributeValue::Template(t) => Some(t),
            _ => None,
        }
    }

    /// Byte length of the value as it appears on the wire.
    pub fn wire_len(&self) -> usize {
        match self {
            AttributeValue::Bool(_) => 1,
            AttributeValue::U32(_) => 4,
            AttributeValue::Bytes(b) => b.len(),
            AttributeValue::Template(t) => t.wire_len(),
        }
    }
}

/// The value-shape class a given [`AttrId`] is allowed to carry. Used by the
/// Sanitizer to validate `(id, size)` pairs against the Cryptoki attribute
/// catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Bool,
    U32,
    Bytes,
    Template,
}

/// Looks up the expected [`ValueKind`] for a known attribute id. Returns
/// `None` for ids outside the closed Cryptoki-derived set this core
/// recognizes (the Sanitizer turns that into `ATTRIBUTE_TYPE_INVALID`).
pub fn value_kind_of(id: AttrId) -> Option<ValueKind> {
    use crate::value_objects::BooleanProperty;

    if BooleanProperty::from_attr_id(id).is_some() {
        return Some(ValueKind::Bool);
    }
    if matches!(id, AttrId::WRAP_TEMPLATE | AttrId::UNWRAP_TEMPLATE | AttrId::DERIVE_TEMPLATE) {
        return Some(ValueKind::Template);
    }
    match id {
        AttrId::CLASS | AttrId::KEY_TYPE | AttrId::MODULUS_BITS | AttrId::VALUE_LEN => Some(ValueKind::U32),
        AttrId::LABEL
        | AttrId::APPLICATION
        | AttrId::VALUE
        | AttrId::OBJECT_ID
        | AttrId::SUBJECT
        | AttrId::ID
        | AttrId::START_DATE
        | AttrId::END_DATE
        | AttrId::MODULUS
        | AttrId::PUBLIC_EXPONENT
        | AttrId::PRIVATE_EXPONENT
        | AttrId::PRIME_1
        | AttrId::PRIME_2
        | AttrId::EXPONENT_1
        | AttrId::EXPONENT_2
        | AttrId::COEFFICIENT
        | AttrId::EC_PARAMS
        | AttrId::EC_POINT
        | AttrId::PUBLIC_KEY_INFO
        // ALLOWED_MECHANISMS is array-valued (top bit set) but holds a flat
        // list of CK_MECHANISM_TYPE scalars, not a nested attribute
        // template; stored as the raw little-endian concatenation and
        // parsed by the policy engine (see check_parent_attrs_against_processing).
        | AttrId::ALLOWED_MECHANISMS => Some(ValueKind::Bytes),
        _ => None,
    }
}
