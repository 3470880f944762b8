// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Generic Identifier
//!
//! A phantom-typed wrapper around [`Ulid`] so `SessionId` and `ObjectHandle`
//! cannot be mixed up at a call site despite sharing the same
//! underlying representation. Time-ordering from the ULID is a side benefit,
//! not load-bearing: the core never relies on handle ordering for policy.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use ulid::Ulid;

/// Per-category validation hook for [`GenericId`]. The core's two
/// categories (sessions, objects) both accept nil ids.
pub trait IdCategory {
    fn category_name() -> &'static str;

    fn validate_id(_ulid: &Ulid) -> Result<(), CoreError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct GenericId<T: IdCategory> {
    value: Ulid,
    _phantom: PhantomData<T>,
}

impl<T: IdCategory> GenericId<T> {
    pub fn new() -> Self {
        GenericId { value: Ulid::new(), _phantom: PhantomData }
    }

    pub fn from_ulid(ulid: Ulid) -> Result<Self, CoreError> {
        T::validate_id(&ulid)?;
        Ok(GenericId { value: ulid, _phantom: PhantomData })
    }

    pub fn as_ulid(&self) -> Ulid {
        self.value
    }
}

impl<T: IdCategory> Default for GenericId<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: IdCategory> fmt::Display for GenericId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T: IdCategory> FromStr for GenericId<T> {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ulid = Ulid::from_str(s)
            .map_err(|e| CoreError::AttributeValueInvalid(format!("invalid {} id: {e}", T::category_name())))?;
        Self::from_ulid(ulid)
    }
}

impl<T: IdCategory> Serialize for GenericId<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.value.to_string().serialize(serializer)
    }
}

impl<'de, T: IdCategory> Deserialize<'de> for GenericId<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let ulid = Ulid::from_str(&s).map_err(serde::de::Error::custom)?;
        Ok(GenericId { value: ulid, _phantom: PhantomData })
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct SessionCategory;

impl IdCategory for SessionCategory {
    fn category_name() -> &'static str {
        "session"
    }
}

pub type SessionId = GenericId<SessionCategory>;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ObjectCategory;

impl IdCategory for ObjectCategory {
    fn category_name() -> &'static str {
        "object"
    }
}

/// Opaque handle the façade hands back to the client for a created object
///.
pub type ObjectHandle = GenericId<ObjectCategory>;
