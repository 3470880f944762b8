// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Object Repository
//!
//! Port for the token's object table: `handle → Object`. Kept synchronous, not `async_trait`-based, matching the
//! single-threaded-per-token discipline mandates for the domain —
//! the infrastructure layer is free to wrap an implementation in whatever
//! concurrency primitive its environment needs.

use crate::entities::Object;
use crate::error::CoreResult;
use crate::value_objects::ObjectHandle;

/// Storage port for [`Object`]s, implemented by the infrastructure layer
///.
pub trait ObjectRepository: Send + Sync {
    fn insert(&self, object: Object) -> CoreResult<ObjectHandle>;
    fn find(&self, handle: ObjectHandle) -> CoreResult<Object>;
    fn update(&self, object: Object) -> CoreResult<()>;
    fn remove(&self, handle: ObjectHandle) -> CoreResult<()>;
    fn list(&self) -> CoreResult<Vec<ObjectHandle>>;
}
