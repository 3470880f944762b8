// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # RNG-Backed Primitive Engine
//!
//! The in-process stand-in for the named-but-unmodeled primitive crypto
//! engine: fills key material with bytes from the process RNG rather than
//! running any actual AES/RSA/EC/HMAC algorithm. Good enough to exercise
//! `GENERATE`/`GENERATE_PAIR`/`DERIVE` end to end; a real deployment swaps
//! this adapter for one backed by an HSM or software crypto library.

use rand::RngCore;

use token_core_domain::error::CoreResult;
use token_core_domain::repositories::PrimitiveEngine;

#[derive(Default)]
pub struct RandPrimitiveEngine;

impl RandPrimitiveEngine {
    pub fn new() -> Self {
        Self
    }
}

impl PrimitiveEngine for RandPrimitiveEngine {
    fn random_bytes(&self, len: usize) -> CoreResult<Vec<u8>> {
        let mut bytes = vec![0u8; len];
        rand::rng().fill_bytes(&mut bytes);
        Ok(bytes)
    }
}
