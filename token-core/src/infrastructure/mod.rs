// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Adapters for the domain's repository ports, plus the config loading and
//! tracing setup the CLI binary needs to actually run.

pub mod config;
pub mod logging;
pub mod repositories;
