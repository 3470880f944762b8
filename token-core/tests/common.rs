// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Common Test Helpers
//!
//! Shared utilities for end-to-end tests that exercise the compiled CLI
//! binary as a subprocess rather than the `Token` facade in-process.

/// Path to the compiled `token-core` binary, the way `cargo test` exposes
/// it to integration/e2e test binaries.
pub fn get_token_core_bin() -> String {
    if let Ok(path) = std::env::var("CARGO_BIN_EXE_token-core") {
        return path;
    }

    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let mut bin_path = std::path::PathBuf::from(manifest_dir);
    bin_path.push("target");
    bin_path.push(if cfg!(debug_assertions) { "debug" } else { "release" });
    bin_path.push("token-core");
    bin_path.to_str().expect("invalid UTF-8 in binary path").to_string()
}
