// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Repository ports for shared token state: interfaces the domain
//! depends on and the infrastructure layer implements.

pub mod object_repository;
pub mod primitive_engine;
pub mod session_repository;

pub use object_repository::ObjectRepository;
pub use primitive_engine::PrimitiveEngine;
pub use session_repository::SessionRepository;
