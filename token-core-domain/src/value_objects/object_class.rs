// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Object Class
//!
//! The accepted Cryptoki object classes. Deprecated object kinds
//! (certificates, OTP, HW features, domain parameters) are a non-goal and
//! are rejected by the Sanitizer rather than modeled here.

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectClass {
    Data,
    SecretKey,
    PublicKey,
    PrivateKey,
}

impl ObjectClass {
    /// Raw `CKO_*` wire value.
    pub fn code(self) -> u32 {
        match self {
            ObjectClass::Data => 0x0000_0000,
            ObjectClass::SecretKey => 0x0000_0004,
            ObjectClass::PublicKey => 0x0000_0002,
            ObjectClass::PrivateKey => 0x0000_0003,
        }
    }

    pub fn from_code(code: u32) -> Result<Self, CoreError> {
        match code {
            0x0000_0000 => Ok(ObjectClass::Data),
            0x0000_0002 => Ok(ObjectClass::PublicKey),
            0x0000_0003 => Ok(ObjectClass::PrivateKey),
            0x0000_0004 => Ok(ObjectClass::SecretKey),
            other => Err(CoreError::TemplateInconsistent(format!(
                "unsupported or deprecated object class 0x{other:08x}"
            ))),
        }
    }

    pub fn is_key_class(self) -> bool {
        !matches!(self, ObjectClass::Data)
    }
}
