// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # In-Memory Object Repository
//!
//! Implements [`ObjectRepository`] as a `Mutex<HashMap>`. Persistent blob
//! storage is a named external collaborator; this adapter is the
//! in-process stand-in that lets the façade be exercised end to end
//! without one.

use std::collections::HashMap;
use std::sync::Mutex;

use token_core_domain::entities::Object;
use token_core_domain::error::{CoreError, CoreResult};
use token_core_domain::repositories::ObjectRepository;
use token_core_domain::value_objects::ObjectHandle;

#[derive(Default)]
pub struct InMemoryObjectRepository {
    objects: Mutex<HashMap<ObjectHandle, Object>>,
}

impl InMemoryObjectRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ObjectRepository for InMemoryObjectRepository {
    fn insert(&self, object: Object) -> CoreResult<ObjectHandle> {
        let handle = object.handle();
        self.objects.lock().expect("object table lock poisoned").insert(handle, object);
        Ok(handle)
    }

    fn find(&self, handle: ObjectHandle) -> CoreResult<Object> {
        self.objects.lock().expect("object table lock poisoned").get(&handle).cloned().ok_or(CoreError::NotFound)
    }

    fn update(&self, object: Object) -> CoreResult<()> {
        let mut table = self.objects.lock().expect("object table lock poisoned");
        if !table.contains_key(&object.handle()) {
            return Err(CoreError::NotFound);
        }
        table.insert(object.handle(), object);
        Ok(())
    }

    fn remove(&self, handle: ObjectHandle) -> CoreResult<()> {
        self.objects
            .lock()
            .expect("object table lock poisoned")
            .remove(&handle)
            .map(|_| ())
            .ok_or(CoreError::NotFound)
    }

    fn list(&self) -> CoreResult<Vec<ObjectHandle>> {
        Ok(self.objects.lock().expect("object table lock poisoned").keys().copied().collect())
    }
}
