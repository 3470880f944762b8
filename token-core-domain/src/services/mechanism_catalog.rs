// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Mechanism Catalog
//!
//! A static table mapping each [`MechanismId`] to its allowed functions,
//! one-shot-only flag, the subset of functions this token actually exposes,
//! and key-size bounds for generation.

use crate::error::CoreError;
use crate::value_objects::{Function, MechanismId};

/// One catalog entry. `allowed_functions`/`token_supported_functions` are
/// bitsets built from [`Function::bit`].
#[derive(Debug, Clone, Copy)]
pub struct MechanismInfo {
    pub allowed_functions: u32,
    pub token_supported_functions: u32,
    pub one_shot_only: bool,
    /// Inclusive `(min, max)` bounds for `GENERATE`/`GENERATE_KEY_PAIR` on
    /// this mechanism's key type — bits for asymmetric, bytes for
    /// symmetric. `None` for mechanisms that do not generate keys.
    pub key_size_bounds: Option<(u32, u32)>,
}

fn functions(flags: &[Function]) -> u32 {
    flags.iter().fold(0u32, |acc, f| acc | f.bit())
}

fn entry(id: MechanismId) -> MechanismInfo {
    use Function::*;
    use MechanismId::*;
    match id {
        AesKeyGen => MechanismInfo {
            allowed_functions: functions(&[Generate]),
            token_supported_functions: functions(&[Generate]),
            one_shot_only: false,
            key_size_bounds: Some((16, 32)),
        },
        AesEcb | AesCbc | AesCbcPad | AesCtr => MechanismInfo {
            allowed_functions: functions(&[Encrypt, Decrypt, Wrap, Unwrap]),
            token_supported_functions: functions(&[Encrypt, Decrypt, Wrap, Unwrap]),
            one_shot_only: false,
            key_size_bounds: None,
        },
        AesGcm => MechanismInfo {
            allowed_functions: functions(&[Encrypt, Decrypt]),
            token_supported_functions: functions(&[Encrypt, Decrypt]),
            one_shot_only: false,
            key_size_bounds: None,
        },
        AesCmac => MechanismInfo {
            allowed_functions: functions(&[Sign, Verify]),
            token_supported_functions: functions(&[Sign, Verify]),
            one_shot_only: false,
            key_size_bounds: None,
        },
        AesMac => MechanismInfo {
            allowed_functions: functions(&[Sign, Verify]),
            token_supported_functions: functions(&[Sign, Verify]),
            one_shot_only: true,
            key_size_bounds: None,
        },
        GenericSecretKeyGen => MechanismInfo {
            allowed_functions: functions(&[Generate]),
            token_supported_functions: functions(&[Generate]),
            one_shot_only: false,
            key_size_bounds: Some((1, 128)),
        },
        Md5Hmac | Sha1Hmac | Sha224Hmac | Sha256Hmac | Sha384Hmac | Sha512Hmac => MechanismInfo {
            allowed_functions: functions(&[Sign, Verify]),
            token_supported_functions: functions(&[Sign, Verify]),
            one_shot_only: false,
            key_size_bounds: None,
        },
        RsaPkcsKeyPairGen => MechanismInfo {
            allowed_functions: functions(&[GenerateKeyPair]),
            token_supported_functions: functions(&[GenerateKeyPair]),
            one_shot_only: false,
            key_size_bounds: Some((1024, 4096)),
        },
        RsaPkcs | RsaX509 => MechanismInfo {
            allowed_functions: functions(&[Encrypt, Decrypt, Sign, Verify, Wrap, Unwrap]),
            token_supported_functions: functions(&[Encrypt, Decrypt, Sign, Verify, Wrap, Unwrap]),
            one_shot_only: false,
            key_size_bounds: None,
        },
        RsaPkcsOaep => MechanismInfo {
            allowed_functions: functions(&[Encrypt, Decrypt, Wrap, Unwrap]),
            token_supported_functions: functions(&[Encrypt, Decrypt, Wrap, Unwrap]),
            one_shot_only: false,
            key_size_bounds: None,
        },
        RsaPkcsPss => MechanismInfo {
            allowed_functions: functions(&[Sign, Verify]),
            token_supported_functions: functions(&[Sign, Verify]),
            one_shot_only: false,
            key_size_bounds: None,
        },
        EcKeyPairGen => MechanismInfo {
            allowed_functions: functions(&[GenerateKeyPair]),
            token_supported_functions: functions(&[GenerateKeyPair]),
            one_shot_only: false,
            key_size_bounds: None,
        },
        Ecdsa | EcdsaSha1 => MechanismInfo {
            allowed_functions: functions(&[Sign, Verify]),
            token_supported_functions: functions(&[Sign, Verify]),
            one_shot_only: true,
            key_size_bounds: None,
        },
        Ecdh1Derive | Ecdh1CofactorDerive | DhPkcsDerive => MechanismInfo {
            allowed_functions: functions(&[Derive]),
            token_supported_functions: functions(&[Derive]),
            one_shot_only: true,
            key_size_bounds: None,
        },
        Md5 | Sha1 | Sha256 | Sha384 | Sha512 => MechanismInfo {
            allowed_functions: functions(&[Digest]),
            token_supported_functions: functions(&[Digest]),
            one_shot_only: false,
            key_size_bounds: None,
        },
    }
}

pub fn is_valid(id: MechanismId) -> bool {
    MechanismId::ALL.contains(&id)
}

pub fn supported_flags(id: MechanismId) -> u32 {
    entry(id).token_supported_functions
}

pub fn allowed_functions(id: MechanismId) -> u32 {
    entry(id).allowed_functions
}

pub fn one_shot_only(id: MechanismId) -> bool {
    entry(id).one_shot_only
}

pub fn key_size_bounds(id: MechanismId) -> Result<(u32, u32), CoreError> {
    entry(id)
        .key_size_bounds
        .ok_or_else(|| CoreError::MechanismInvalid(format!("{id:?} does not generate keys")))
}

/// Mechanisms with at least one token-supported function.
pub fn enumerate_supported() -> Vec<MechanismId> {
    MechanismId::ALL.iter().copied().filter(|id| supported_flags(*id) != 0).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mechanism_id_is_valid() {
        for id in MechanismId::ALL {
            assert!(is_valid(id), "{id:?} missing from ALL/entry table");
        }
    }

    #[test]
    fn enumerate_supported_excludes_nothing_in_this_catalog() {
        // Every current entry sets at least one supported function.
        assert_eq!(enumerate_supported().len(), MechanismId::ALL.len());
    }

    #[test]
    fn digest_mechanisms_allow_only_digest() {
        for id in [MechanismId::Md5, MechanismId::Sha1, MechanismId::Sha256, MechanismId::Sha384, MechanismId::Sha512] {
            assert_eq!(allowed_functions(id), Function::Digest.bit());
            assert!(key_size_bounds(id).is_err());
        }
    }

    #[test]
    fn key_generation_mechanisms_expose_bounds() {
        assert_eq!(key_size_bounds(MechanismId::AesKeyGen).unwrap(), (16, 32));
        assert_eq!(key_size_bounds(MechanismId::RsaPkcsKeyPairGen).unwrap(), (1024, 4096));
    }

    #[test]
    fn derive_mechanisms_are_one_shot_only() {
        for id in [MechanismId::Ecdh1Derive, MechanismId::Ecdh1CofactorDerive, MechanismId::DhPkcsDerive] {
            assert!(one_shot_only(id));
        }
    }
}
