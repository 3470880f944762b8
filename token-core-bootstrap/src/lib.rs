// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Bootstrap Module
//!
//! The bootstrap module sits **outside** the domain/application/infrastructure
//! layers of `token-core` and provides:
//!
//! - **Entry point** - CLI parsing and security validation
//! - **Error handling** - Unix exit code mapping from `CoreError` categories
//! - **Logging** - Bootstrap-phase logging, separate from application logging
//!
//! Signal handling and platform abstraction are out of scope.
//!
//! ## Architecture Position
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │          BOOTSTRAP (This Module)            │
//! │  - Entry Point                              │
//! │  - Secure Arg Parsing                       │
//! │  - Exit Code Mapping                        │
//! └─────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────┐
//! │         token-core (application +           │
//! │         infrastructure + CLI wiring)        │
//! └─────────────────────────────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────────┐
//! │         token-core-domain                   │
//! │  - Attribute Blob / Sanitizer / Builder     │
//! │  - Mechanism Catalog / Policy Engine        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - `cli` - Secure argument parsing
//! - `exit_code` - Unix exit code enumeration
//! - `logger` - Bootstrap-specific logging

pub mod cli;
pub mod exit_code;
pub mod logger;

pub use cli::{Cli, Commands, LoginRole, ParseError};
pub use exit_code::ExitCode;

/// Bootstrap entry point: parses argv and applies the bootstrap layer's
/// security validation. The caller (`token-core`'s `main.rs`) is responsible
/// for running the application logic and mapping the result to an exit code
/// via [`ExitCode::from_error_category`].
///
/// Clap handles `--help`/`--version` and exits the process on its own.
pub fn bootstrap_cli() -> Result<Cli, cli::ParseError> {
    cli::parse_and_validate()
}
