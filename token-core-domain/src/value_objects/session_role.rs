// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Session Role
//!
//! The authentication state of a session (: "Public session",
//! "Security Officer"). Consulted by `check_created_attrs_against_token` and
//! `check_access_attrs_against_token`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionRole {
    /// No user authenticated; cannot access private objects or create
    /// `TRUSTED` objects.
    #[default]
    Public,
    /// The normal authenticated user.
    User,
    /// The privileged role that may create `TRUSTED` objects and
    /// re-initialize the token.
    SecurityOfficer,
}

impl SessionRole {
    pub fn is_logged_in(self) -> bool {
        !matches!(self, SessionRole::Public)
    }

    pub fn is_security_officer(self) -> bool {
        matches!(self, SessionRole::SecurityOfficer)
    }
}
