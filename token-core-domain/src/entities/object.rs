// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Object
//!
//! A Cryptoki object: an opaque handle paired with exactly one
//! [`AttributeBlob`]. Created by the Object Builder, mutated in place by
//! `SET_ATTRIBUTE_VALUE` when `MODIFIABLE`, destroyed when its owning
//! session closes (session objects) or on explicit destroy (governed by
//! `DESTROYABLE`).

use super::attribute_blob::AttributeBlob;
use crate::error::{CoreError, CoreResult};
use crate::value_objects::{AttrId, AttributeValue, BooleanProperty, KeyType, ObjectClass, ObjectHandle};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Object {
    handle: ObjectHandle,
    blob: AttributeBlob,
}

impl Object {
    /// Wraps an already-sanitized, already-built blob under a fresh handle.
    /// The Object Builder is responsible for the blob satisfying the
    /// class/key-type/sensitivity invariants before calling this.
    pub fn new(blob: AttributeBlob) -> Self {
        Object { handle: ObjectHandle::new(), blob }
    }

    pub fn handle(&self) -> ObjectHandle {
        self.handle
    }

    pub fn blob(&self) -> &AttributeBlob {
        &self.blob
    }

    pub fn class(&self) -> CoreResult<ObjectClass> {
        let code = self.blob.get_u32(AttrId::CLASS)?;
        ObjectClass::from_code(code)
    }

    pub fn key_type(&self) -> CoreResult<KeyType> {
        let code = self.blob.get_u32(AttrId::KEY_TYPE)?;
        KeyType::from_code(code)
    }

    pub fn is_token_object(&self) -> bool {
        self.blob.get_bool(AttrId::TOKEN)
    }

    pub fn is_private(&self) -> bool {
        self.blob.get_bool(AttrId::PRIVATE) || self.class() == Ok(ObjectClass::PrivateKey)
    }

    pub fn property(&self, property: BooleanProperty) -> bool {
        self.blob.get_bool(property.attr_id())
    }

    /// Whether the object may be modified by `SET_ATTRIBUTE_VALUE`.
    pub fn is_modifiable(&self) -> bool {
        self.property(BooleanProperty::Modifiable)
    }

    /// Whether the object may be explicitly destroyed.
    pub fn is_destroyable(&self) -> bool {
        self.property(BooleanProperty::Destroyable)
    }

    /// Applies an in-place attribute update, governed by `MODIFIABLE`.
    /// Callers are expected to have already checked any attribute-specific
    /// read-only rule (e.g. `CLASS` is never settable after creation).
    pub fn set_attribute(&mut self, id: AttrId, value: AttributeValue) -> CoreResult<()> {
        if !self.is_modifiable() {
            return Err(CoreError::AttributeReadOnly(format!("{id} is not modifiable")));
        }
        let _ = self.blob.remove(id);
        self.blob.add(id, value)
    }

    /// The private-key attributes "Sensitive material" names as
    /// non-exportable once the object is `SENSITIVE` or not `EXTRACTABLE`.
    pub const SENSITIVE_PRIVATE_ATTRS: &'static [AttrId] = &[
        AttrId::PRIVATE_EXPONENT,
        AttrId::PRIME_1,
        AttrId::PRIME_2,
        AttrId::EXPONENT_1,
        AttrId::EXPONENT_2,
        AttrId::COEFFICIENT,
    ];

    /// The exportability predicate consulted by `GET_ATTRIBUTE_VALUE`:
    /// non-sensitive attributes, and sensitive
    /// attributes of non-private-key objects, are always exportable; the
    /// listed private-key attributes are denied once `SENSITIVE=true` or
    /// `EXTRACTABLE=false`.
    pub fn is_exportable(&self, id: AttrId) -> bool {
        if !Self::SENSITIVE_PRIVATE_ATTRS.contains(&id) {
            return true;
        }
        !self.property(BooleanProperty::Sensitive) && self.property(BooleanProperty::Extractable)
    }

    /// `GET_ATTRIBUTE_VALUE`'s read path: denies sensitive private-key
    /// material per [`Object::is_exportable`] before looking the value up.
    pub fn get_attribute_value(&self, id: AttrId) -> CoreResult<&AttributeValue> {
        if !self.is_exportable(id) {
            return Err(CoreError::AttributeSensitive(format!("{id}")));
        }
        self.blob.find(id).ok_or(CoreError::NotFound)
    }
}
