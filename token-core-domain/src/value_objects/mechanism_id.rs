// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Mechanism Identifier
//!
//! The fixed, concrete enumeration of `CKM_*` mechanisms the Mechanism
//! Catalog carries. The numeric values match the standard Cryptoki
//! assignments so they round-trip against real PKCS#11 client templates.

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MechanismId {
    AesKeyGen,
    AesEcb,
    AesCbc,
    AesCbcPad,
    AesCtr,
    AesGcm,
    AesCmac,
    AesMac,
    GenericSecretKeyGen,
    Md5Hmac,
    Sha1Hmac,
    Sha224Hmac,
    Sha256Hmac,
    Sha384Hmac,
    Sha512Hmac,
    RsaPkcsKeyPairGen,
    RsaPkcs,
    RsaPkcsOaep,
    RsaPkcsPss,
    RsaX509,
    EcKeyPairGen,
    Ecdsa,
    EcdsaSha1,
    Ecdh1Derive,
    Ecdh1CofactorDerive,
    DhPkcsDerive,
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl MechanismId {
    pub const ALL: [MechanismId; 30] = [
        MechanismId::AesKeyGen,
        MechanismId::AesEcb,
        MechanismId::AesCbc,
        MechanismId::AesCbcPad,
        MechanismId::AesCtr,
        MechanismId::AesGcm,
        MechanismId::AesCmac,
        MechanismId::AesMac,
        MechanismId::GenericSecretKeyGen,
        MechanismId::Md5Hmac,
        MechanismId::Sha1Hmac,
        MechanismId::Sha224Hmac,
        MechanismId::Sha256Hmac,
        MechanismId::Sha384Hmac,
        MechanismId::Sha512Hmac,
        MechanismId::RsaPkcsKeyPairGen,
        MechanismId::RsaPkcs,
        MechanismId::RsaPkcsOaep,
        MechanismId::RsaPkcsPss,
        MechanismId::RsaX509,
        MechanismId::EcKeyPairGen,
        MechanismId::Ecdsa,
        MechanismId::EcdsaSha1,
        MechanismId::Ecdh1Derive,
        MechanismId::Ecdh1CofactorDerive,
        MechanismId::DhPkcsDerive,
        MechanismId::Md5,
        MechanismId::Sha1,
        MechanismId::Sha256,
        MechanismId::Sha384,
        MechanismId::Sha512,
    ];

    /// Raw `CKM_*` wire value.
    pub fn code(self) -> u32 {
        match self {
            MechanismId::RsaPkcsKeyPairGen => 0x0000_0000,
            MechanismId::RsaPkcs => 0x0000_0001,
            MechanismId::RsaX509 => 0x0000_0003,
            MechanismId::RsaPkcsOaep => 0x0000_0009,
            MechanismId::RsaPkcsPss => 0x0000_000D,
            MechanismId::Md5 => 0x0000_0210,
            MechanismId::Sha1 => 0x0000_0220,
            MechanismId::Sha256 => 0x0000_0250,
            MechanismId::Sha384 => 0x0000_0260,
            MechanismId::Sha512 => 0x0000_0270,
            MechanismId::Md5Hmac => 0x0000_0211,
            MechanismId::Sha1Hmac => 0x0000_0221,
            MechanismId::Sha256Hmac => 0x0000_0251,
            MechanismId::Sha384Hmac => 0x0000_0261,
            MechanismId::Sha512Hmac => 0x0000_0271,
            MechanismId::Sha224Hmac => 0x0000_0256,
            MechanismId::DhPkcsDerive => 0x0000_0025,
            MechanismId::Ecdsa => 0x0000_1041,
            MechanismId::EcdsaSha1 => 0x0000_1042,
            MechanismId::EcKeyPairGen => 0x0000_1040,
            MechanismId::Ecdh1Derive => 0x0000_1050,
            MechanismId::Ecdh1CofactorDerive => 0x0000_1051,
            MechanismId::AesKeyGen => 0x0000_1080,
            MechanismId::AesEcb => 0x0000_1081,
            MechanismId::AesCbc => 0x0000_1082,
            MechanismId::AesCbcPad => 0x0000_1085,
            MechanismId::AesCtr => 0x0000_1086,
            MechanismId::AesGcm => 0x0000_1087,
            MechanismId::AesMac => 0x0000_1083,
            MechanismId::AesCmac => 0x0000_108A,
            MechanismId::GenericSecretKeyGen => 0x0000_0350,
        }
    }

    pub fn from_code(code: u32) -> Result<Self, CoreError> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.code() == code)
            .ok_or_else(|| CoreError::MechanismInvalid(format!("unknown mechanism 0x{code:08x}")))
    }
}
