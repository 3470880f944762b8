// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Key Type
//!
//! The Cryptoki key types this core recognizes, plus the
//! class/type consistency rule: `SECRET_KEY` pairs with a symmetric type,
//! `PUBLIC_KEY`/`PRIVATE_KEY` with an asymmetric type, `DATA` ignores it.

use super::object_class::ObjectClass;
use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    Rsa,
    Dsa,
    Dh,
    Ec,
    GenericSecret,
    Aes,
    Md5Hmac,
    Sha1Hmac,
    Sha224Hmac,
    Sha256Hmac,
    Sha384Hmac,
    Sha512Hmac,
}

impl KeyType {
    /// Raw `CKK_*` wire value.
    pub fn code(self) -> u32 {
        match self {
            KeyType::Rsa => 0x0000_0000,
            KeyType::Dsa => 0x0000_0001,
            KeyType::Dh => 0x0000_0002,
            KeyType::Ec => 0x0000_0003,
            KeyType::GenericSecret => 0x0000_0010,
            KeyType::Aes => 0x0000_001F,
            KeyType::Md5Hmac => 0x0000_0016,
            KeyType::Sha1Hmac => 0x0000_0017,
            KeyType::Sha256Hmac => 0x0000_002B,
            KeyType::Sha384Hmac => 0x0000_002C,
            KeyType::Sha512Hmac => 0x0000_002D,
            KeyType::Sha224Hmac => 0x0000_002E,
        }
    }

    pub fn from_code(code: u32) -> Result<Self, CoreError> {
        match code {
            0x0000_0000 => Ok(KeyType::Rsa),
            0x0000_0001 => Ok(KeyType::Dsa),
            0x0000_0002 => Ok(KeyType::Dh),
            0x0000_0003 => Ok(KeyType::Ec),
            0x0000_0010 => Ok(KeyType::GenericSecret),
            0x0000_001F => Ok(KeyType::Aes),
            0x0000_0016 => Ok(KeyType::Md5Hmac),
            0x0000_0017 => Ok(KeyType::Sha1Hmac),
            0x0000_002B => Ok(KeyType::Sha256Hmac),
            0x0000_002C => Ok(KeyType::Sha384Hmac),
            0x0000_002D => Ok(KeyType::Sha512Hmac),
            0x0000_002E => Ok(KeyType::Sha224Hmac),
            other => Err(CoreError::TemplateInconsistent(format!("unknown key type 0x{other:08x}"))),
        }
    }

    pub fn is_symmetric(self) -> bool {
        matches!(
            self,
            KeyType::GenericSecret
                | KeyType::Aes
                | KeyType::Md5Hmac
                | KeyType::Sha1Hmac
                | KeyType::Sha224Hmac
                | KeyType::Sha256Hmac
                | KeyType::Sha384Hmac
                | KeyType::Sha512Hmac
        )
    }

    pub fn is_asymmetric(self) -> bool {
        !self.is_symmetric()
    }

    pub fn is_hmac(self) -> bool {
        matches!(
            self,
            KeyType::Md5Hmac
                | KeyType::Sha1Hmac
                | KeyType::Sha224Hmac
                | KeyType::Sha256Hmac
                | KeyType::Sha384Hmac
                | KeyType::Sha512Hmac
        )
    }

    /// Validates the (class, key_type) consistency rule: `SECRET_KEY` pairs
    /// with a symmetric type, `PUBLIC_KEY`/`PRIVATE_KEY` with an asymmetric
    /// one.
    pub fn check_class_consistency(self, class: ObjectClass) -> Result<(), CoreError> {
        let ok = match class {
            ObjectClass::Data => true,
            ObjectClass::SecretKey => self.is_symmetric(),
            ObjectClass::PublicKey | ObjectClass::PrivateKey => self.is_asymmetric(),
        };
        if ok {
            Ok(())
        } else {
            Err(CoreError::TemplateInconsistent(format!(
                "key type {self:?} is not consistent with class {class:?}"
            )))
        }
    }
}
