// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Token Core Domain
//!
//! The object/attribute subsystem and mechanism/policy gatekeeper of a
//! PKCS#11 (Cryptoki v2.40) token service, independent of any transport,
//! persistence, or cryptographic primitive implementation.
//!
//! ## Module structure
//!
//! - [`value_objects`] — `AttrId`, `AttributeValue`, `ObjectClass`,
//!   `KeyType`, `BooleanProperty`, `Function`, `Step`, `MechanismId`, and
//!   the session/object identifiers.
//! - [`entities`] — `AttributeBlob`, `Object`, `Session`.
//! - [`services`] — the Sanitizer, Object Builder, Mechanism Catalog,
//!   Policy Engine, and the wire codec.
//! - [`repositories`] — storage ports the infrastructure layer implements.
//! - [`error`] — `CoreError`, the Cryptoki `CKR_*`-mapped error type.
//!
//! ## Invariants
//!
//! Every object built through [`services::object_builder`] satisfies the
//! class/key-type consistency and sensitivity-monotonicity rules this
//! layer encodes; nothing outside the domain is trusted to re-derive them.

pub mod entities;
pub mod error;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::{AttributeBlob, Object, Session};
pub use error::{CoreError, CoreResult};
