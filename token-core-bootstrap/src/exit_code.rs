// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Exit Code Management
//!
//! Standardized Unix exit codes following BSD `sysexits.h` conventions,
//! mapped from the token core's error categories.
//!
//! ## Exit Code Conventions
//!
//! - **0**: Success
//! - **1**: General error
//! - **64-78**: Specific error conditions (BSD sysexits.h)

use std::fmt;

/// Exit codes following Unix conventions (BSD sysexits.h).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum ExitCode {
    /// Successful termination (0).
    #[default]
    Success = 0,

    /// General error (1) — unmapped/unexpected failure.
    Error = 1,

    /// Command line usage error (64) — malformed CLI arguments.
    UsageError = 64,

    /// Data format error (65) — a *template* error: malformed
    /// attribute template, unknown attribute, inconsistent values.
    DataError = 65,

    /// Service unavailable (69) — mechanism not advertised/supported.
    Unavailable = 69,

    /// Internal software error (70) — an invariant violation.
    Software = 70,

    /// Temporary failure (75) — a *resource* error.
    TempFail = 75,

    /// Permission denied (77) — a *policy* error.
    NoPerm = 77,
}

impl ExitCode {
    /// Convert to `i32` for use with `std::process::exit`.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Maps a [`token_core_domain::error::CoreError`] category to an exit
    /// code. Takes the category string rather than the error type itself
    /// so this crate does not need to depend on the domain crate.
    pub fn from_error_category(category: &str) -> Self {
        match category {
            "template" => ExitCode::DataError,
            "policy" => ExitCode::NoPerm,
            "resource" => ExitCode::TempFail,
            "invariant" => ExitCode::Software,
            "mechanism" => ExitCode::Unavailable,
            "buffer" => ExitCode::DataError,
            _ => ExitCode::Error,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ExitCode::Success => "Success",
            ExitCode::Error => "General error",
            ExitCode::UsageError => "Command line usage error",
            ExitCode::DataError => "Data format error",
            ExitCode::Unavailable => "Service unavailable",
            ExitCode::Software => "Internal software error",
            ExitCode::TempFail => "Temporary failure, retry",
            ExitCode::NoPerm => "Permission denied",
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Success)
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description(), self.as_i32())
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code.as_i32()
    }
}
