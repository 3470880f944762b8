// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Domain services: the Sanitizer, Object Builder, Mechanism Catalog,
//! Policy Engine and the wire codec.

pub mod mechanism_catalog;
pub mod object_builder;
pub mod policy_engine;
pub mod sanitizer;
pub mod wire;

pub use object_builder::CreationOrigin;
