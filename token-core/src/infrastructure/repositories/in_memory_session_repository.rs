// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # In-Memory Session Repository
//!
//! Mirrors [`super::in_memory_object_repository::InMemoryObjectRepository`]
//! for the session table.

use std::collections::HashMap;
use std::sync::Mutex;

use token_core_domain::entities::Session;
use token_core_domain::error::{CoreError, CoreResult};
use token_core_domain::repositories::SessionRepository;
use token_core_domain::value_objects::SessionId;

#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: Mutex<HashMap<SessionId, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, session: Session) -> CoreResult<SessionId> {
        let id = session.id();
        self.sessions.lock().expect("session table lock poisoned").insert(id, session);
        Ok(id)
    }

    fn find(&self, id: SessionId) -> CoreResult<Session> {
        self.sessions.lock().expect("session table lock poisoned").get(&id).cloned().ok_or(CoreError::NotFound)
    }

    fn update(&self, session: Session) -> CoreResult<()> {
        let mut table = self.sessions.lock().expect("session table lock poisoned");
        if !table.contains_key(&session.id()) {
            return Err(CoreError::NotFound);
        }
        table.insert(session.id(), session);
        Ok(())
    }

    fn remove(&self, id: SessionId) -> CoreResult<()> {
        self.sessions.lock().expect("session table lock poisoned").remove(&id).map(|_| ()).ok_or(CoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_find_round_trips() {
        let repo = InMemorySessionRepository::new();
        let session = Session::open(true);
        let id = session.id();
        repo.insert(session).unwrap();
        assert_eq!(repo.find(id).unwrap().id(), id);
    }

    #[test]
    fn find_missing_id_is_not_found() {
        let repo = InMemorySessionRepository::new();
        assert_eq!(repo.find(SessionId::new()), Err(CoreError::NotFound));
    }

    #[test]
    fn update_persists_mutated_state() {
        let repo = InMemorySessionRepository::new();
        let session = Session::open(true);
        let id = session.id();
        repo.insert(session).unwrap();

        let mut updated = repo.find(id).unwrap();
        updated.login(token_core_domain::value_objects::SessionRole::User);
        repo.update(updated).unwrap();

        assert!(repo.find(id).unwrap().is_logged_in());
    }

    #[test]
    fn remove_then_find_is_not_found() {
        let repo = InMemorySessionRepository::new();
        let session = Session::open(false);
        let id = session.id();
        repo.insert(session).unwrap();
        repo.remove(id).unwrap();
        assert_eq!(repo.find(id), Err(CoreError::NotFound));
    }
}
