// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Boolean Properties
//!
//! The 22 named single-byte flags that control object capability/state
//!. Each one lives in the Attribute Blob as a 1-byte attribute;
//! `bit()` gives the position an implementation may use for an optional
//! bit-vector cache without that cache being part of
//! the contract.

use super::attr_id::AttrId;

/// One of the 22 boolean-valued Cryptoki properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanProperty {
    Token,
    Private,
    Trusted,
    Sensitive,
    Encrypt,
    Decrypt,
    Wrap,
    Unwrap,
    Sign,
    SignRecover,
    Verify,
    VerifyRecover,
    Derive,
    Extractable,
    Local,
    NeverExtractable,
    AlwaysSensitive,
    Modifiable,
    Copyable,
    Destroyable,
    AlwaysAuthenticate,
    WrapWithTrusted,
}

impl BooleanProperty {
    pub const ALL: [BooleanProperty; 22] = [
        BooleanProperty::Token,
        BooleanProperty::Private,
        BooleanProperty::Trusted,
        BooleanProperty::Sensitive,
        BooleanProperty::Encrypt,
        BooleanProperty::Decrypt,
        BooleanProperty::Wrap,
        BooleanProperty::Unwrap,
        BooleanProperty::Sign,
        BooleanProperty::SignRecover,
        BooleanProperty::Verify,
        BooleanProperty::VerifyRecover,
        BooleanProperty::Derive,
        BooleanProperty::Extractable,
        BooleanProperty::Local,
        BooleanProperty::NeverExtractable,
        BooleanProperty::AlwaysSensitive,
        BooleanProperty::Modifiable,
        BooleanProperty::Copyable,
        BooleanProperty::Destroyable,
        BooleanProperty::AlwaysAuthenticate,
        BooleanProperty::WrapWithTrusted,
    ];

    /// Position for an optional bit-vector cache; stable but not itself a
    /// contract.
    pub fn bit(self) -> u32 {
        Self::ALL.iter().position(|p| *p == self).expect("exhaustive") as u32
    }

    pub fn attr_id(self) -> AttrId {
        match self {
            BooleanProperty::Token => AttrId::TOKEN,
            BooleanProperty::Private => AttrId::PRIVATE,
            BooleanProperty::Trusted => AttrId::TRUSTED,
            BooleanProperty::Sensitive => AttrId::SENSITIVE,
            BooleanProperty::Encrypt => AttrId::ENCRYPT,
            BooleanProperty::Decrypt => AttrId::DECRYPT,
            BooleanProperty::Wrap => AttrId::WRAP,
            BooleanProperty::Unwrap => AttrId::UNWRAP,
            BooleanProperty::Sign => AttrId::SIGN,
            BooleanProperty::SignRecover => AttrId::SIGN_RECOVER,
            BooleanProperty::Verify => AttrId::VERIFY,
            BooleanProperty::VerifyRecover => AttrId::VERIFY_RECOVER,
            BooleanProperty::Derive => AttrId::DERIVE,
            BooleanProperty::Extractable => AttrId::EXTRACTABLE,
            BooleanProperty::Local => AttrId::LOCAL,
            BooleanProperty::NeverExtractable => AttrId::NEVER_EXTRACTABLE,
            BooleanProperty::AlwaysSensitive => AttrId::ALWAYS_SENSITIVE,
            BooleanProperty::Modifiable => AttrId::MODIFIABLE,
            BooleanProperty::Copyable => AttrId::COPYABLE,
            BooleanProperty::Destroyable => AttrId::DESTROYABLE,
            BooleanProperty::AlwaysAuthenticate => AttrId::ALWAYS_AUTHENTICATE,
            BooleanProperty::WrapWithTrusted => AttrId::WRAP_WITH_TRUSTED,
        }
    }

    pub fn from_attr_id(id: AttrId) -> Option<BooleanProperty> {
        Self::ALL.iter().copied().find(|p| p.attr_id() == id)
    }

    /// The PKCS#11 default for this property when a template omits it
    ///: `MODIFIABLE`, `COPYABLE`, `DESTROYABLE` default
    /// to `true`; everything else defaults to `false`.
    pub fn default_value(self) -> bool {
        matches!(
            self,
            BooleanProperty::Modifiable | BooleanProperty::Copyable | BooleanProperty::Destroyable
        )
    }
}
