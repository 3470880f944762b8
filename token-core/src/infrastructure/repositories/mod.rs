// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! In-memory [`token_core_domain::repositories`] implementations.

pub mod in_memory_object_repository;
pub mod in_memory_session_repository;
pub mod rand_primitive_engine;

pub use in_memory_object_repository::InMemoryObjectRepository;
pub use in_memory_session_repository::InMemorySessionRepository;
pub use rand_primitive_engine::RandPrimitiveEngine;
