// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! End-to-End Tests
//!
//! This module aggregates all E2E tests for the `token-core` CLI binary.

mod common;

#[path = "e2e/cli_demo_test.rs"]
mod cli_demo_test;
