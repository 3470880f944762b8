// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Attribute Identifier
//!
//! `AttrId` is the 32-bit tag identifying a Cryptoki attribute (`CKA_*`).
//! The top bit (`ARRAY_ATTRIBUTE`) marks attributes whose value is itself a
//! nested attribute template (`WRAP_TEMPLATE`, `UNWRAP_TEMPLATE`,
//! `DERIVE_TEMPLATE`, `ALLOWED_MECHANISMS`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Cryptoki attribute identifier.
///
/// Known identifiers are exposed as associated constants so call sites read
/// like `AttrId::CLASS` rather than a bare integer; unrecognized tags still
/// round-trip through the newtype (the Sanitizer is what rejects them).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttrId(pub u32);

impl AttrId {
    pub const ARRAY_ATTRIBUTE: u32 = 0x4000_0000;

    pub const CLASS: AttrId = AttrId(0x0000_0000);
    pub const TOKEN: AttrId = AttrId(0x0000_0001);
    pub const PRIVATE: AttrId = AttrId(0x0000_0002);
    pub const LABEL: AttrId = AttrId(0x0000_0003);
    pub const TRUSTED: AttrId = AttrId(0x0000_0086);
    pub const APPLICATION: AttrId = AttrId(0x0000_0010);
    pub const VALUE: AttrId = AttrId(0x0000_0011);
    pub const OBJECT_ID: AttrId = AttrId(0x0000_0012);
    pub const KEY_TYPE: AttrId = AttrId(0x0000_0100);
    pub const SUBJECT: AttrId = AttrId(0x0000_0101);
    pub const ID: AttrId = AttrId(0x0000_0102);
    pub const SENSITIVE: AttrId = AttrId(0x0000_0103);
    pub const ENCRYPT: AttrId = AttrId(0x0000_0104);
    pub const DECRYPT: AttrId = AttrId(0x0000_0105);
    pub const WRAP: AttrId = AttrId(0x0000_0106);
    pub const UNWRAP: AttrId = AttrId(0x0000_0107);
    pub const SIGN: AttrId = AttrId(0x0000_0108);
    pub const SIGN_RECOVER: AttrId = AttrId(0x0000_0109);
    pub const VERIFY: AttrId = AttrId(0x0000_010A);
    pub const VERIFY_RECOVER: AttrId = AttrId(0x0000_010B);
    pub const DERIVE: AttrId = AttrId(0x0000_010C);
    pub const START_DATE: AttrId = AttrId(0x0000_0110);
    pub const END_DATE: AttrId = AttrId(0x0000_0111);
    pub const MODULUS: AttrId = AttrId(0x0000_0120);
    pub const MODULUS_BITS: AttrId = AttrId(0x0000_0121);
    pub const PUBLIC_EXPONENT: AttrId = AttrId(0x0000_0122);
    pub const PRIVATE_EXPONENT: AttrId = AttrId(0x0000_0123);
    pub const PRIME_1: AttrId = AttrId(0x0000_0124);
    pub const PRIME_2: AttrId = AttrId(0x0000_0125);
    pub const EXPONENT_1: AttrId = AttrId(0x0000_0126);
    pub const EXPONENT_2: AttrId = AttrId(0x0000_0127);
    pub const COEFFICIENT: AttrId = AttrId(0x0000_0128);
    pub const VALUE_LEN: AttrId = AttrId(0x0000_0161);
    pub const EXTRACTABLE: AttrId = AttrId(0x0000_0162);
    pub const LOCAL: AttrId = AttrId(0x0000_0163);
    pub const NEVER_EXTRACTABLE: AttrId = AttrId(0x0000_0164);
    pub const ALWAYS_SENSITIVE: AttrId = AttrId(0x0000_0165);
    pub const MODIFIABLE: AttrId = AttrId(0x0000_0170);
    pub const DESTROYABLE: AttrId = AttrId(0x0000_0172);
    pub const COPYABLE: AttrId = AttrId(0x0000_017A);
    pub const EC_PARAMS: AttrId = AttrId(0x0000_0180);
    pub const EC_POINT: AttrId = AttrId(0x0000_0181);
    pub const ALWAYS_AUTHENTICATE: AttrId = AttrId(0x0000_0202);
    pub const WRAP_WITH_TRUSTED: AttrId = AttrId(0x0000_0210);
    pub const PUBLIC_KEY_INFO: AttrId = AttrId(0x0000_0129);
    pub const WRAP_TEMPLATE: AttrId = AttrId(Self::ARRAY_ATTRIBUTE | 0x0211);
    pub const UNWRAP_TEMPLATE: AttrId = AttrId(Self::ARRAY_ATTRIBUTE | 0x0212);
    pub const DERIVE_TEMPLATE: AttrId = AttrId(Self::ARRAY_ATTRIBUTE | 0x0213);
    pub const ALLOWED_MECHANISMS: AttrId = AttrId(Self::ARRAY_ATTRIBUTE | 0x0600);

    /// `true` for attributes whose value is itself a nested attribute
    /// template rather than a scalar/byte value.
    pub fn is_array_valued(self) -> bool {
        self.0 & Self::ARRAY_ATTRIBUTE != 0
    }

    /// `true` for one of the 22 named boolean properties (see
    /// [`crate::value_objects::BooleanProperty`]).
    pub fn boolean_property(self) -> Option<crate::value_objects::BooleanProperty> {
        crate::value_objects::BooleanProperty::from_attr_id(self)
    }
}

impl fmt::Display for AttrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08x}", self.0)
    }
}

impl From<u32> for AttrId {
    fn from(value: u32) -> Self {
        AttrId(value)
    }
}
