// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Mechanism Name Catalog
//!
//! Maps the `CKM_*`-style mechanism name strings the CLI accepts (e.g.
//! `"AES_KEY_GEN"`) onto [`MechanismId`]. Kept in the application layer for
//! the same reason as [`super::attr_catalog`]: `token-core-domain` models the
//! closed numeric/enum set, not its display names.

use token_core_domain::error::{CoreError, CoreResult};
use token_core_domain::value_objects::MechanismId;

const MECHANISM_NAMES: &[(&str, MechanismId)] = &[
    ("AES_KEY_GEN", MechanismId::AesKeyGen),
    ("AES_ECB", MechanismId::AesEcb),
    ("AES_CBC", MechanismId::AesCbc),
    ("AES_CBC_PAD", MechanismId::AesCbcPad),
    ("AES_CTR", MechanismId::AesCtr),
    ("AES_GCM", MechanismId::AesGcm),
    ("AES_CMAC", MechanismId::AesCmac),
    ("AES_MAC", MechanismId::AesMac),
    ("GENERIC_SECRET_KEY_GEN", MechanismId::GenericSecretKeyGen),
    ("MD5_HMAC", MechanismId::Md5Hmac),
    ("SHA1_HMAC", MechanismId::Sha1Hmac),
    ("SHA224_HMAC", MechanismId::Sha224Hmac),
    ("SHA256_HMAC", MechanismId::Sha256Hmac),
    ("SHA384_HMAC", MechanismId::Sha384Hmac),
    ("SHA512_HMAC", MechanismId::Sha512Hmac),
    ("RSA_PKCS_KEY_PAIR_GEN", MechanismId::RsaPkcsKeyPairGen),
    ("RSA_PKCS", MechanismId::RsaPkcs),
    ("RSA_PKCS_OAEP", MechanismId::RsaPkcsOaep),
    ("RSA_PKCS_PSS", MechanismId::RsaPkcsPss),
    ("RSA_X_509", MechanismId::RsaX509),
    ("EC_KEY_PAIR_GEN", MechanismId::EcKeyPairGen),
    ("ECDSA", MechanismId::Ecdsa),
    ("ECDSA_SHA1", MechanismId::EcdsaSha1),
    ("ECDH1_DERIVE", MechanismId::Ecdh1Derive),
    ("ECDH1_COFACTOR_DERIVE", MechanismId::Ecdh1CofactorDerive),
    ("DH_PKCS_DERIVE", MechanismId::DhPkcsDerive),
    ("MD5", MechanismId::Md5),
    ("SHA_1", MechanismId::Sha1),
    ("SHA256", MechanismId::Sha256),
    ("SHA384", MechanismId::Sha384),
    ("SHA512", MechanismId::Sha512),
];

pub fn mechanism_by_name(name: &str) -> CoreResult<MechanismId> {
    MECHANISM_NAMES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, id)| *id)
        .ok_or_else(|| CoreError::MechanismInvalid(format!("unknown mechanism name {name:?}")))
}

pub fn name_of_mechanism(id: MechanismId) -> &'static str {
    MECHANISM_NAMES.iter().find(|(_, m)| *m == id).map(|(n, _)| *n).unwrap_or("UNKNOWN")
}

/// The three `CKM_*_DERIVE` mechanisms the policy engine's
/// `check_created_attrs_against_processing` singles out as requiring
/// `LOCAL=false` and a `SECRET_KEY` target class.
pub fn is_derive_mechanism(id: MechanismId) -> bool {
    matches!(id, MechanismId::Ecdh1Derive | MechanismId::Ecdh1CofactorDerive | MechanismId::DhPkcsDerive)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mechanism_id_has_a_name() {
        for id in MechanismId::ALL {
            let name = name_of_mechanism(id);
            assert_ne!(name, "UNKNOWN", "{id:?} is missing a display name");
            assert_eq!(mechanism_by_name(name).unwrap(), id);
        }
    }

    #[test]
    fn unknown_mechanism_name_is_rejected() {
        assert!(matches!(mechanism_by_name("NOT_A_MECHANISM"), Err(CoreError::MechanismInvalid(_))));
    }

    #[test]
    fn derive_mechanisms_are_flagged() {
        assert!(is_derive_mechanism(MechanismId::Ecdh1Derive));
        assert!(!is_derive_mechanism(MechanismId::AesKeyGen));
    }
}
