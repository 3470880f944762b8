// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Session Repository
//!
//! Port for the token's session table.

use crate::entities::Session;
use crate::error::CoreResult;
use crate::value_objects::SessionId;

pub trait SessionRepository: Send + Sync {
    fn insert(&self, session: Session) -> CoreResult<SessionId>;
    fn find(&self, id: SessionId) -> CoreResult<Session>;
    fn update(&self, session: Session) -> CoreResult<()>;
    fn remove(&self, id: SessionId) -> CoreResult<()>;
}
