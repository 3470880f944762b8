// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Session
//!
//! A session-bound authentication and processing-state holder. Session
//! objects are private to the session that created them and are destroyed
//! when it closes.

use crate::value_objects::{Function, MechanismId, ObjectHandle, SessionId, SessionRole};
use serde::{Deserialize, Serialize};

/// State of one running multi-part cryptographic operation (:
/// "Processing"). A session holds at most one active processing at a time;
/// Cryptoki's dual-operation simultaneity rules are out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Processing {
    pub mechanism: MechanismId,
    pub function: Function,
    /// Whether the parent key carries `ALWAYS_AUTHENTICATE`; if so, every
    /// `UPDATE`/`FINAL`/one-shot step re-checks login freshness.
    pub always_authenticate: bool,
    /// `true` once this processing has been re-authenticated since INIT.
    pub reauthenticated: bool,
    /// `true` once at least one `UPDATE` has run; used to reject a
    /// one-shot-only mechanism from being driven across multiple steps.
    pub updated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    role: SessionRole,
    read_write: bool,
    session_objects: Vec<ObjectHandle>,
    processing: Option<Processing>,
}

impl Session {
    pub fn open(read_write: bool) -> Self {
        Session {
            id: SessionId::new(),
            role: SessionRole::Public,
            read_write,
            session_objects: Vec::new(),
            processing: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn role(&self) -> SessionRole {
        self.role
    }

    pub fn is_read_write(&self) -> bool {
        self.read_write
    }

    pub fn is_logged_in(&self) -> bool {
        self.role.is_logged_in()
    }

    pub fn is_security_officer(&self) -> bool {
        self.role.is_security_officer()
    }

    pub fn login(&mut self, role: SessionRole) {
        self.role = role;
        if let Some(processing) = self.processing.as_mut() {
            processing.reauthenticated = true;
        }
    }

    pub fn logout(&mut self) {
        self.role = SessionRole::Public;
    }

    pub fn begin_processing(&mut self, mechanism: MechanismId, function: Function, always_authenticate: bool) {
        self.processing = Some(Processing {
            mechanism,
            function,
            always_authenticate,
            reauthenticated: self.is_logged_in(),
            updated: false,
        });
    }

    pub fn processing(&self) -> Option<&Processing> {
        self.processing.as_ref()
    }

    pub fn mark_updated(&mut self) {
        if let Some(processing) = self.processing.as_mut() {
            processing.updated = true;
        }
    }

    pub fn end_processing(&mut self) {
        self.processing = None;
    }

    pub fn adopt_object(&mut self, handle: ObjectHandle) {
        self.session_objects.push(handle);
    }

    pub fn owns_object(&self, handle: ObjectHandle) -> bool {
        self.session_objects.contains(&handle)
    }

    pub fn disown_object(&mut self, handle: ObjectHandle) {
        self.session_objects.retain(|existing| *existing != handle);
    }

    /// The set of session-private object handles to be destroyed when this
    /// session closes ( "destroyed when the owning session closes
    /// (if not a token object)").
    pub fn session_objects(&self) -> &[ObjectHandle] {
        &self.session_objects
    }
}
