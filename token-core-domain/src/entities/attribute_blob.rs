// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Attribute Blob
//!
//! The central container every [`crate::entities::Object`] owns:
//! an ordered sequence of `(AttrId, AttributeValue)` entries, preceded
//! conceptually by a `{total_value_bytes, count}` header. Insertion order is
//! preserved but carries no semantic weight; the Sanitizer is what
//! guarantees at-most-one entry per id in practice, not this type.

use crate::error::{CoreError, CoreResult};
use crate::value_objects::{AttrId, AttributeValue};
use serde::{Deserialize, Serialize};

/// Size in bytes of the `{total_value_bytes, count}` header this blob
/// reports through [`AttributeBlob::wire_len`].
const HEADER_BYTES: usize = 8;
/// Per-entry `{id, size}` prefix preceding each value on the wire.
const ENTRY_PREFIX_BYTES: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttributeBlob {
    entries: Vec<(AttrId, AttributeValue)>,
}

impl AttributeBlob {
    /// An empty blob (header zeroed).
    pub fn empty() -> Self {
        AttributeBlob { entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(AttrId, AttributeValue)> {
        self.entries.iter()
    }

    /// Appends `(id, value)` at the tail. The only documented failure is
    /// `DEVICE_MEMORY`, which an in-process `Vec` never raises; the
    /// `CoreResult` return is kept so callers don't need to special-case
    /// this entity against the rest of the Attribute Blob API.
    pub fn add(&mut self, id: AttrId, value: AttributeValue) -> CoreResult<()> {
        self.entries.push((id, value));
        Ok(())
    }

    /// Removes the first entry with the given id.
    pub fn remove(&mut self, id: AttrId) -> CoreResult<()> {
        let pos = self.entries.iter().position(|(existing, _)| *existing == id);
        match pos {
            Some(i) => {
                self.entries.remove(i);
                Ok(())
            }
            None => Err(CoreError::NotFound),
        }
    }

    /// Removes the first entry with the given id only if its value carries
    /// zero wire bytes (a placeholder slot left by a builder). Returns
    /// `true` if an entry was removed.
    pub fn remove_empty(&mut self, id: AttrId) -> bool {
        let pos = self
            .entries
            .iter()
            .position(|(existing, value)| *existing == id && value.wire_len() == 0);
        if let Some(i) = pos {
            self.entries.remove(i);
            true
        } else {
            false
        }
    }

    /// Removes up to `max` occurrences of `id`, returning the number
    /// actually removed. Fails `NOT_FOUND` if none were present.
    pub fn remove_check(&mut self, id: AttrId, max: usize) -> CoreResult<usize> {
        let mut removed = 0;
        while removed < max {
            if self.remove(id).is_ok() {
                removed += 1;
            } else {
                break;
            }
        }
        if removed == 0 {
            Err(CoreError::NotFound)
        } else {
            Ok(removed)
        }
    }

    /// Borrowed view of the value of the first entry with the given id.
    pub fn find(&self, id: AttrId) -> Option<&AttributeValue> {
        self.entries.iter().find(|(existing, _)| *existing == id).map(|(_, v)| v)
    }

    /// All entries with the given id, in insertion order.
    pub fn find_all(&self, id: AttrId) -> impl Iterator<Item = &AttributeValue> {
        self.entries.iter().filter(move |(existing, _)| *existing == id).map(|(_, v)| v)
    }

    /// The `u32` value of the first entry with the given id.
    pub fn get_u32(&self, id: AttrId) -> CoreResult<u32> {
        match self.find(id) {
            Some(AttributeValue::U32(v)) => Ok(*v),
            Some(_) => Err(CoreError::GeneralError),
            None => Err(CoreError::NotFound),
        }
    }

    /// The boolean value of the first entry with the given id, or `false`
    /// if absent. The Policy Engine never distinguishes "absent" from
    /// "present and false" through this accessor.
    pub fn get_bool(&self, id: AttrId) -> bool {
        matches!(self.find(id), Some(AttributeValue::Bool(true)))
    }

    /// `true` iff every attribute in `self` (treated as the reference
    /// template) appears in `candidate` with an identical value.
    pub fn match_reference(&self, candidate: &AttributeBlob) -> bool {
        self.entries
            .iter()
            .all(|(id, value)| candidate.find(*id).is_some_and(|other| other == value))
    }

    /// Total size in bytes this blob would occupy on the wire, including
    /// the blob header and each entry's `{id, size}` prefix.
    pub fn wire_len(&self) -> usize {
        HEADER_BYTES
            + self
                .entries
                .iter()
                .map(|(_, value)| ENTRY_PREFIX_BYTES + value.wire_len())
                .sum::<usize>()
    }
}

impl FromIterator<(AttrId, AttributeValue)> for AttributeBlob {
    fn from_iter<I: IntoIterator<Item = (AttrId, AttributeValue)>>(iter: I) -> Self {
        AttributeBlob { entries: iter.into_iter().collect() }
    }
}
