// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # End-to-End CLI Demo Tests
//!
//! Runs the real `token-core` binary as a subprocess. Each invocation
//! starts a brand-new in-memory token, so these
//! tests check one command's observable behavior and exit code rather
//! than chaining state across invocations.

use std::process::Command;

use crate::common::get_token_core_bin;

#[test]
fn mechanisms_lists_at_least_aes_key_gen() {
    let output = Command::new(get_token_core_bin()).arg("mechanisms").output().expect("failed to run token-core");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|line| line.trim() == "AES_KEY_GEN"));
}

#[test]
fn mechanism_info_prints_key_size_bounds_for_aes_key_gen() {
    let output = Command::new(get_token_core_bin())
        .args(["mechanism-info", "AES_KEY_GEN"])
        .output()
        .expect("failed to run token-core");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("key_size_bounds:   16..=32"));
}

#[test]
fn mechanism_info_for_unknown_mechanism_exits_with_unavailable() {
    let output = Command::new(get_token_core_bin())
        .args(["mechanism-info", "NOT_A_MECHANISM"])
        .output()
        .expect("failed to run token-core");
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(69)); // ExitCode::Unavailable
}

#[test]
fn generate_key_prints_a_ulid_shaped_handle() {
    let output = Command::new(get_token_core_bin())
        .args([
            "--login",
            "user",
            "generate-key",
            "AES_KEY_GEN",
            "--attr",
            "CLASS=u32:4",
            "--attr",
            "KEY_TYPE=u32:31",
            "--attr",
            "VALUE_LEN=u32:32",
        ])
        .output()
        .expect("failed to run token-core");
    assert!(output.status.success());
    let handle = String::from_utf8_lossy(&output.stdout).trim().to_string();
    assert_eq!(handle.len(), 26, "ULIDs are 26 Crockford-base32 characters: {handle:?}");
}

#[test]
fn create_object_with_a_malformed_attr_exits_with_data_error() {
    let output = Command::new(get_token_core_bin())
        .args(["create-object", "--attr", "NOT_AN_ATTR_NAME=u32:1"])
        .output()
        .expect("failed to run token-core");
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(65)); // ExitCode::DataError
}

#[test]
fn show_object_for_an_unknown_handle_exits_with_internal_error() {
    // A missing handle surfaces the repository's internal NOT_FOUND sentinel
    // (category "internal"), which the CLI maps to the unmapped/general exit
    // code rather than one of the more specific categories.
    let output = Command::new(get_token_core_bin())
        .args(["show-object", "01ARZ3NDEKTSV4RRFFQ69G5FAV"])
        .output()
        .expect("failed to run token-core");
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1)); // ExitCode::Error
}
