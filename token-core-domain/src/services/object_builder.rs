// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Object Builder
//!
//! Turns a sanitized template into a complete, invariant-satisfying object
//! blob: applies class/key-type-specific mandatory/optional
//! attribute sets, derives `LOCAL`, `ALWAYS_SENSITIVE`, `NEVER_EXTRACTABLE`,
//! and fills in boolean-property defaults. Transactional: any failure
//! releases the partially built blob and returns the error.

use crate::entities::{AttributeBlob, Object};
use crate::error::{CoreError, CoreResult};
use crate::value_objects::{AttrId, BooleanProperty, KeyType, ObjectClass};

/// How the object being built came into existence; governs `LOCAL`
/// derivation. Distinct from
/// [`crate::value_objects::Function`], which names the cryptographic
/// operation rather than the creation pathway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationOrigin {
    Generate,
    GeneratePair,
    Copy,
    Derive,
    Import,
}

impl CreationOrigin {
    fn local(self, parent: Option<&Object>) -> bool {
        match self {
            CreationOrigin::Generate | CreationOrigin::GeneratePair => true,
            CreationOrigin::Derive | CreationOrigin::Import => false,
            CreationOrigin::Copy => parent.map(|p| p.property(BooleanProperty::Local)).unwrap_or(false),
        }
    }
}

/// Attribute ids mandatory/optional for a given (class, key_type)
/// combination. A static table rather than per-call-site
/// branching, as requires.
struct ClassSchema {
    mandatory: &'static [AttrId],
    optional: &'static [AttrId],
}

fn schema_for(class: ObjectClass, key_type: Option<KeyType>) -> ClassSchema {
    match class {
        ObjectClass::Data => ClassSchema { mandatory: &[], optional: &[AttrId::OBJECT_ID, AttrId::APPLICATION, AttrId::VALUE] },
        ObjectClass::SecretKey => ClassSchema {
            mandatory: &[],
            optional: &[AttrId::VALUE, AttrId::VALUE_LEN, AttrId::WRAP_TEMPLATE, AttrId::UNWRAP_TEMPLATE, AttrId::DERIVE_TEMPLATE],
        },
        ObjectClass::PublicKey => match key_type {
            Some(KeyType::Rsa) => ClassSchema {
                mandatory: &[AttrId::SUBJECT, AttrId::MODULUS_BITS],
                optional: &[AttrId::WRAP_TEMPLATE, AttrId::PUBLIC_KEY_INFO, AttrId::MODULUS, AttrId::PUBLIC_EXPONENT],
            },
            Some(KeyType::Ec) => ClassSchema {
                mandatory: &[AttrId::SUBJECT, AttrId::EC_PARAMS],
                optional: &[AttrId::WRAP_TEMPLATE, AttrId::PUBLIC_KEY_INFO, AttrId::EC_POINT],
            },
            _ => ClassSchema { mandatory: &[AttrId::SUBJECT], optional: &[AttrId::WRAP_TEMPLATE, AttrId::PUBLIC_KEY_INFO] },
        },
        ObjectClass::PrivateKey => match key_type {
            Some(KeyType::Rsa) => ClassSchema {
                mandatory: &[AttrId::SUBJECT],
                optional: &[
                    AttrId::UNWRAP_TEMPLATE,
                    AttrId::PUBLIC_KEY_INFO,
                    AttrId::MODULUS,
                    AttrId::PUBLIC_EXPONENT,
                    AttrId::PRIVATE_EXPONENT,
                    AttrId::PRIME_1,
                    AttrId::PRIME_2,
                    AttrId::EXPONENT_1,
                    AttrId::EXPONENT_2,
                    AttrId::COEFFICIENT,
                ],
            },
            Some(KeyType::Ec) => ClassSchema {
                mandatory: &[AttrId::SUBJECT, AttrId::EC_PARAMS],
                optional: &[AttrId::UNWRAP_TEMPLATE, AttrId::PUBLIC_KEY_INFO, AttrId::VALUE],
            },
            _ => ClassSchema { mandatory: &[AttrId::SUBJECT], optional: &[AttrId::UNWRAP_TEMPLATE, AttrId::PUBLIC_KEY_INFO] },
        },
    }
}

/// Boolean-property defaults beyond the universal storage defaults (the
/// storage, any-key, symm-key, public-key, private-key category names).
/// Every class gets the universal storage defaults; key classes
/// additionally get the any-key defaults.
fn universal_storage_properties() -> &'static [BooleanProperty] {
    &[BooleanProperty::Token, BooleanProperty::Private, BooleanProperty::Modifiable, BooleanProperty::Destroyable]
}

fn any_key_properties() -> &'static [BooleanProperty] {
    &[BooleanProperty::Local, BooleanProperty::Copyable]
}

/// Builds a complete object attribute blob from a sanitized template.
pub fn create_attributes_from_template(
    template: AttributeBlob,
    parent: Option<&Object>,
    origin: CreationOrigin,
) -> CoreResult<AttributeBlob> {
    let mut blob = template;

    let class_code = blob.get_u32(AttrId::CLASS).map_err(|_| CoreError::TemplateIncomplete("CLASS is required".into()))?;
    let class = ObjectClass::from_code(class_code)?;

    let key_type = if class.is_key_class() {
        let code = blob
            .get_u32(AttrId::KEY_TYPE)
            .map_err(|_| CoreError::TemplateIncomplete("KEY_TYPE is required for key classes".into()))?;
        let key_type = KeyType::from_code(code)?;
        key_type.check_class_consistency(class)?;
        Some(key_type)
    } else {
        None
    };

    let schema = schema_for(class, key_type);
    for mandatory in schema.mandatory {
        if blob.find(*mandatory).is_none() {
            return Err(CoreError::TemplateIncomplete(format!("{mandatory} is mandatory for this class/key type")));
        }
    }
    for (id, _) in template_entries_outside_schema(&blob, class, &schema) {
        return Err(CoreError::TemplateInconsistent(format!("{id} is not valid for this class/key type")));
    }

    // Step 3: LOCAL.
    let local = origin.local(parent);
    set_bool_default(&mut blob, BooleanProperty::Local, local)?;

    // Step 4: ALWAYS_SENSITIVE / NEVER_EXTRACTABLE.
    if class.is_key_class() {
        let sensitive = blob.get_bool(AttrId::SENSITIVE);
        apply_default(&mut blob, BooleanProperty::Extractable)?;
        let extractable = blob.get_bool(AttrId::EXTRACTABLE);

        let (always_sensitive, never_extractable) = match origin {
            CreationOrigin::Copy | CreationOrigin::Derive => {
                let parent_always_sensitive = parent.map(|p| p.property(BooleanProperty::AlwaysSensitive)).unwrap_or(false);
                let parent_never_extractable = parent.map(|p| p.property(BooleanProperty::NeverExtractable)).unwrap_or(false);
                (parent_always_sensitive && sensitive, parent_never_extractable && !extractable)
            }
            CreationOrigin::Generate | CreationOrigin::GeneratePair | CreationOrigin::Import => (sensitive, !extractable),
        };
        set_bool_default(&mut blob, BooleanProperty::AlwaysSensitive, always_sensitive)?;
        set_bool_default(&mut blob, BooleanProperty::NeverExtractable, never_extractable)?;
    }

    // Step 5: remaining boolean-property defaults.
    for property in universal_storage_properties() {
        apply_default(&mut blob, *property)?;
    }
    if class.is_key_class() {
        for property in any_key_properties() {
            apply_default(&mut blob, *property)?;
        }
    }
    for property in BooleanProperty::ALL {
        apply_default(&mut blob, property)?;
    }

    Ok(blob)
}

fn apply_default(blob: &mut AttributeBlob, property: BooleanProperty) -> CoreResult<()> {
    if blob.find(property.attr_id()).is_some() {
        return Ok(());
    }
    set_bool_default(blob, property, property.default_value())
}

fn set_bool_default(blob: &mut AttributeBlob, property: BooleanProperty, value: bool) -> CoreResult<()> {
    let id = property.attr_id();
    let _ = blob.remove(id);
    blob.add(id, crate::value_objects::AttributeValue::Bool(value))
}

/// Entries that are neither `CLASS`/`KEY_TYPE` nor a boolean property nor
/// named in the class's mandatory/optional lists — rejected as
/// inconsistent with the declared class.
fn template_entries_outside_schema<'a>(
    blob: &'a AttributeBlob,
    class: ObjectClass,
    schema: &ClassSchema,
) -> Vec<(AttrId, ())> {
    blob.iter()
        .filter_map(|(id, _)| {
            if *id == AttrId::CLASS || *id == AttrId::KEY_TYPE || id.boolean_property().is_some() {
                return None;
            }
            if class.is_key_class() && matches!(*id, AttrId::ID | AttrId::START_DATE | AttrId::END_DATE) {
                return None;
            }
            if schema.mandatory.contains(id) || schema.optional.contains(id) {
                return None;
            }
            Some((*id, ()))
        })
        .collect()
}
