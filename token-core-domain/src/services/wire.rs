// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Wire Codec
//!
//! Converts between the serialized attribute template layout
//! and the typed [`AttributeBlob`]/[`AttributeValue`] in-memory
//! representation. Nothing here knows about
//! Cryptoki policy — that's the Sanitizer's job downstream.

use crate::entities::AttributeBlob;
use crate::error::{CoreError, CoreResult};
use crate::value_objects::{value_kind_of, AttrId, AttributeValue, ValueKind};

const TEMPLATE_HEADER_LEN: usize = 8;
const ENTRY_HEADER_LEN: usize = 8;

/// Parses a raw client template (`u32 attrs_size, u32 attrs_count,
/// entry[attrs_count]`) into a flat, untyped list of `(id, bytes)` pairs.
/// Does not interpret or validate attribute semantics — the Sanitizer does
/// that over this output.
pub fn parse_template(raw: &[u8]) -> CoreResult<Vec<(AttrId, Vec<u8>)>> {
    if raw.len() < TEMPLATE_HEADER_LEN {
        return Err(CoreError::AttributeValueInvalid("template shorter than header".into()));
    }
    let attrs_size = u32::from_le_bytes(raw[0..4].try_into().unwrap()) as usize;
    let attrs_count = u32::from_le_bytes(raw[4..8].try_into().unwrap()) as usize;
    let body = &raw[TEMPLATE_HEADER_LEN..];
    if body.len() < attrs_size {
        return Err(CoreError::AttributeValueInvalid("template shorter than declared size".into()));
    }

    let mut entries = Vec::with_capacity(attrs_count);
    let mut offset = 0usize;
    for _ in 0..attrs_count {
        if body.len() < offset + ENTRY_HEADER_LEN {
            return Err(CoreError::AttributeValueInvalid("truncated attribute entry".into()));
        }
        let id = u32::from_le_bytes(body[offset..offset + 4].try_into().unwrap());
        let size = u32::from_le_bytes(body[offset + 4..offset + 8].try_into().unwrap()) as usize;
        offset += ENTRY_HEADER_LEN;
        if body.len() < offset + size {
            return Err(CoreError::AttributeValueInvalid("attribute value exceeds template bounds".into()));
        }
        entries.push((AttrId(id), body[offset..offset + size].to_vec()));
        offset += size;
    }
    Ok(entries)
}

/// Interprets one raw `(id, bytes)` pair as a typed [`AttributeValue`]
/// using the attribute catalog. Template-valued attributes recurse through
/// [`parse_template`] and this function together.
pub fn decode_value(id: AttrId, bytes: &[u8]) -> CoreResult<AttributeValue> {
    let kind = value_kind_of(id).ok_or_else(|| CoreError::AttributeTypeInvalid(format!("unknown attribute {id}")))?;
    match kind {
        ValueKind::Bool => {
            if bytes.len() != 1 {
                return Err(CoreError::AttributeValueInvalid(format!("{id} must be 1 byte")));
            }
            Ok(AttributeValue::Bool(bytes[0] != 0))
        }
        ValueKind::U32 => {
            if bytes.len() != 4 {
                return Err(CoreError::AttributeValueInvalid(format!("{id} must be 4 bytes")));
            }
            Ok(AttributeValue::U32(u32::from_le_bytes(bytes.try_into().unwrap())))
        }
        ValueKind::Bytes => Ok(AttributeValue::Bytes(bytes.to_vec())),
        ValueKind::Template => {
            let nested = parse_template(bytes)?;
            let mut blob = AttributeBlob::empty();
            for (nested_id, nested_bytes) in nested {
                let value = decode_value(nested_id, &nested_bytes)?;
                blob.add(nested_id, value)?;
            }
            Ok(AttributeValue::Template(blob))
        }
    }
}

/// Serializes a blob back into the wire layout, e.g. for
/// `GET_ATTRIBUTE_VALUE` responses.
pub fn encode_blob(blob: &AttributeBlob) -> Vec<u8> {
    let entries: Vec<(AttrId, Vec<u8>)> = blob.iter().map(|(id, value)| (*id, encode_value(value))).collect();
    let attrs_size: u32 = entries.iter().map(|(_, bytes)| (ENTRY_HEADER_LEN + bytes.len()) as u32).sum();

    let mut out = Vec::with_capacity(TEMPLATE_HEADER_LEN + attrs_size as usize);
    out.extend_from_slice(&attrs_size.to_le_bytes());
    out.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    for (id, bytes) in entries {
        out.extend_from_slice(&id.0.to_le_bytes());
        out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
        out.extend_from_slice(&bytes);
    }
    out
}

fn encode_value(value: &AttributeValue) -> Vec<u8> {
    match value {
        AttributeValue::Bool(b) => vec![if *b { 1 } else { 0 }],
        AttributeValue::U32(v) => v.to_le_bytes().to_vec(),
        AttributeValue::Bytes(b) => b.clone(),
        AttributeValue::Template(t) => encode_blob(t),
    }
}
