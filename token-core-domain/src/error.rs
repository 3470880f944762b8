// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Error System
//!
//! Errors produced by the attribute/object subsystem and the policy engine.
//! Every variant carries the exact Cryptoki `CKR_*` (or internal sentinel)
//! value it maps to so the façade can return it to a client verbatim.
//!
//! ## Error Categories
//!
//! - **Template errors** — malformed client input (`AttributeTypeInvalid`,
//!   `AttributeValueInvalid`, `TemplateInconsistent`, `TemplateIncomplete`).
//! - **Policy errors** — allowed operation denied by state
//!   (`KeyFunctionNotPermitted`, `SessionReadOnly`, `UserNotLoggedIn`).
//! - **Resource errors** — allocation failures (`DeviceMemory`).
//! - **Invariant violations** — surfaced as `GeneralError`, never silently
//!   corrected.
//! - **Internal sentinels** — `NotFound`/`NotImplemented` carry their own
//!   wire values and are returned to callers as-is; they are
//!   "internal" only in the sense of having no dedicated category of their
//!   own, not in being filtered out before the façade boundary.

use thiserror::Error;

/// Domain-specific errors for the token core, one-to-one with Cryptoki
/// `CKR_*` status codes (see ) plus two internal sentinels that
/// never cross the façade boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("general error")]
    GeneralError,

    #[error("attribute is read-only: {0:?}")]
    AttributeReadOnly(String),

    /// `CKR_ATTRIBUTE_SENSITIVE`: the requested attribute exists but its
    /// value cannot leave the token.
    #[error("attribute is sensitive: {0:?}")]
    AttributeSensitive(String),

    #[error("attribute type invalid: {0}")]
    AttributeTypeInvalid(String),

    #[error("attribute value invalid: {0}")]
    AttributeValueInvalid(String),

    #[error("template incomplete: {0}")]
    TemplateIncomplete(String),

    #[error("template inconsistent: {0}")]
    TemplateInconsistent(String),

    #[error("key function not permitted: {0}")]
    KeyFunctionNotPermitted(String),

    #[error("key size out of range: {0}")]
    KeySizeRange(String),

    #[error("mechanism invalid: {0}")]
    MechanismInvalid(String),

    #[error("mechanism parameter invalid: {0}")]
    MechanismParamInvalid(String),

    #[error("session is read-only")]
    SessionReadOnly,

    #[error("user not logged in")]
    UserNotLoggedIn,

    #[error("action prohibited: {0}")]
    ActionProhibited(String),

    #[error("device memory exhausted")]
    DeviceMemory,

    #[error("device error: {0}")]
    DeviceError(String),

    #[error("buffer too small")]
    BufferTooSmall,

    /// Session or object handle does not resolve to a live repository entry.
    #[error("not found")]
    NotFound,

    /// Unimplemented extension point (e.g. the wrap/unwrap/derive-template
    /// parent check stub, see DESIGN.md).
    #[error("not implemented")]
    NotImplemented,
}

impl CoreError {
    /// The exact wire value from 
    pub fn code(&self) -> u32 {
        match self {
            CoreError::GeneralError => 0x0000_0005,
            CoreError::AttributeReadOnly(_) => 0x0000_0010,
            CoreError::AttributeSensitive(_) => 0x0000_0011,
            CoreError::AttributeTypeInvalid(_) => 0x0000_0012,
            CoreError::AttributeValueInvalid(_) => 0x0000_0013,
            CoreError::TemplateIncomplete(_) => 0x0000_00D0,
            CoreError::TemplateInconsistent(_) => 0x0000_00D1,
            CoreError::KeyFunctionNotPermitted(_) => 0x0000_0068,
            CoreError::KeySizeRange(_) => 0x0000_0062,
            CoreError::MechanismInvalid(_) => 0x0000_0070,
            CoreError::MechanismParamInvalid(_) => 0x0000_0071,
            CoreError::SessionReadOnly => 0x0000_00B5,
            CoreError::UserNotLoggedIn => 0x0000_0101,
            CoreError::ActionProhibited(_) => 0x0000_001B,
            CoreError::DeviceMemory => 0x0000_0031,
            CoreError::DeviceError(_) => 0x0000_0030,
            CoreError::BufferTooSmall => 0x0000_0150,
            CoreError::NotFound => 0x8000_0000,
            CoreError::NotImplemented => 0x8000_0001,
        }
    }

    /// Category used for logging/metrics.
    pub fn category(&self) -> &'static str {
        match self {
            CoreError::AttributeTypeInvalid(_)
            | CoreError::AttributeValueInvalid(_)
            | CoreError::TemplateIncomplete(_)
            | CoreError::TemplateInconsistent(_) => "template",
            CoreError::KeyFunctionNotPermitted(_)
            | CoreError::SessionReadOnly
            | CoreError::UserNotLoggedIn
            | CoreError::ActionProhibited(_) => "policy",
            CoreError::DeviceMemory | CoreError::DeviceError(_) => "resource",
            CoreError::GeneralError | CoreError::AttributeReadOnly(_) | CoreError::AttributeSensitive(_) => "invariant",
            CoreError::MechanismInvalid(_) | CoreError::MechanismParamInvalid(_) | CoreError::KeySizeRange(_) => {
                "mechanism"
            }
            CoreError::BufferTooSmall => "buffer",
            CoreError::NotFound | CoreError::NotImplemented => "internal",
        }
    }

    /// Whether this is one of the access/state-policy errors (as opposed to
    /// a malformed-input template error).
    pub fn is_policy_error(&self) -> bool {
        self.category() == "policy"
    }

    /// Whether this is a malformed-client-input error.
    pub fn is_template_error(&self) -> bool {
        self.category() == "template"
    }
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::DeviceError(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::AttributeValueInvalid(format!("json: {err}"))
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
