// /////////////////////////////////////////////////////////////////////////////
// Token Core
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Session-Facing Façade
//!
//! Composes the Sanitizer/Object Builder/Mechanism Catalog/Policy Engine
//! (none of which know about each other) in the order the create/generate/
//! derive/processing entry points require. `Token` owns no state of its
//! own beyond the repository handles — every method is a thin, ordered
//! pipeline over the domain crate.

use std::collections::HashMap;
use std::sync::Arc;

use token_core_domain::entities::{AttributeBlob, Object};
use token_core_domain::error::{CoreError, CoreResult};
use token_core_domain::repositories::{ObjectRepository, PrimitiveEngine, SessionRepository};
use token_core_domain::services::object_builder::CreationOrigin;
use token_core_domain::services::{mechanism_catalog, object_builder, policy_engine};
use token_core_domain::value_objects::{
    AttrId, AttributeValue, Function, KeyType, MechanismId, ObjectClass, ObjectHandle, SessionId, SessionRole, Step,
};

use super::mechanism_names;

/// Display-friendly projection of [`mechanism_catalog`]'s per-mechanism
/// entry, returned by [`Token::mechanism_info`].
#[derive(Debug, Clone)]
pub struct MechanismSummary {
    pub mechanism: MechanismId,
    pub allowed_functions: u32,
    pub token_supported_functions: u32,
    pub one_shot_only: bool,
    pub key_size_bounds: Option<(u32, u32)>,
}

pub struct Token {
    objects: Arc<dyn ObjectRepository>,
    sessions: Arc<dyn SessionRepository>,
    primitives: Arc<dyn PrimitiveEngine>,
    key_size_overrides: HashMap<MechanismId, (u32, u32)>,
}

impl Token {
    pub fn new(
        objects: Arc<dyn ObjectRepository>,
        sessions: Arc<dyn SessionRepository>,
        primitives: Arc<dyn PrimitiveEngine>,
    ) -> Self {
        Token { objects, sessions, primitives, key_size_overrides: HashMap::new() }
    }

    /// Layers deployment-time key-size bounds (`infrastructure::config`'s
    /// `KeySizeOverride`) over the mechanism catalog's compiled-in defaults.
    /// A mechanism with no override keeps using `mechanism_catalog`'s bounds
    /// unchanged.
    pub fn with_key_size_overrides(mut self, overrides: impl IntoIterator<Item = (MechanismId, u32, u32)>) -> Self {
        self.key_size_overrides = overrides.into_iter().map(|(id, min, max)| (id, (min, max))).collect();
        self
    }

    fn key_size_bounds(&self, mechanism: MechanismId) -> CoreResult<(u32, u32)> {
        match self.key_size_overrides.get(&mechanism) {
            Some(bounds) => Ok(*bounds),
            None => mechanism_catalog::key_size_bounds(mechanism),
        }
    }

    // -- Sessions ---------------------------------------------------------

    pub fn open_session(&self, read_write: bool) -> CoreResult<SessionId> {
        let session = token_core_domain::entities::Session::open(read_write);
        self.sessions.insert(session)
    }

    pub fn login(&self, session_id: SessionId, role: SessionRole) -> CoreResult<()> {
        let mut session = self.sessions.find(session_id)?;
        session.login(role);
        self.sessions.update(session)
    }

    // -- Mechanism catalog --------------------------------------------------

    pub fn mechanism_list(&self) -> Vec<MechanismId> {
        mechanism_catalog::enumerate_supported()
    }

    pub fn mechanism_info(&self, mechanism: MechanismId) -> CoreResult<MechanismSummary> {
        if !mechanism_catalog::is_valid(mechanism) {
            return Err(CoreError::MechanismInvalid(format!("{mechanism:?} is not a recognized mechanism")));
        }
        let allowed_functions = mechanism_catalog::allowed_functions(mechanism);
        let token_supported_functions = mechanism_catalog::supported_flags(mechanism);
        let one_shot_only = mechanism_catalog::one_shot_only(mechanism);
        let key_size_bounds = self.key_size_bounds(mechanism).ok();
        Ok(MechanismSummary { mechanism, allowed_functions, token_supported_functions, one_shot_only, key_size_bounds })
    }

    // -- Object creation ----------------------------------------------------

    /// `CREATE_OBJECT`: build → check_created_attrs_against_token →
    /// check_created_attrs. There is no synthetic `IMPORT` `MechanismId`, so
    /// `check_created_attrs_against_processing` has nothing to check against
    /// here — `CreationOrigin::Import` already forces `LOCAL=false`
    /// structurally at the build step.
    pub fn create_object(&self, session_id: SessionId, attrs: Vec<(AttrId, AttributeValue)>) -> CoreResult<ObjectHandle> {
        let session = self.sessions.find(session_id)?;
        let template: AttributeBlob = attrs.into_iter().collect();
        let built = object_builder::create_attributes_from_template(template, None, CreationOrigin::Import)?;
        policy_engine::check_created_attrs_against_token(&session, &built)?;
        policy_engine::check_created_attrs(&built, None)?;
        self.persist_new_object(session_id, built)
    }

    /// `GENERATE`: build → check_created_attrs_against_token →
    /// check_created_attrs_against_processing(mechanism) → check_created_attrs
    /// → primitive + persist.
    pub fn generate_key(
        &self,
        session_id: SessionId,
        mechanism: MechanismId,
        attrs: Vec<(AttrId, AttributeValue)>,
    ) -> CoreResult<ObjectHandle> {
        self.require_generate_capable(mechanism, Function::Generate)?;
        let session = self.sessions.find(session_id)?;
        let template: AttributeBlob = attrs.into_iter().collect();
        let mut built = object_builder::create_attributes_from_template(template, None, CreationOrigin::Generate)?;
        policy_engine::check_created_attrs_against_token(&session, &built)?;
        policy_engine::check_created_attrs_against_processing(mechanism, &built)?;
        policy_engine::check_created_attrs(&built, None)?;
        self.check_key_size_override(mechanism, &built)?;
        self.fill_secret_material(mechanism, &mut built)?;
        self.persist_new_object(session_id, built)
    }

    /// `GENERATE_KEY_PAIR`: build(pub), build(priv) →
    /// check_created_attrs_against_token ×2 →
    /// check_created_attrs_against_processing(mechanism) ×2 →
    /// check_created_attrs(pub, priv) → primitive + add_missing_attribute_id.
    pub fn generate_key_pair(
        &self,
        session_id: SessionId,
        mechanism: MechanismId,
        public_attrs: Vec<(AttrId, AttributeValue)>,
        private_attrs: Vec<(AttrId, AttributeValue)>,
    ) -> CoreResult<(ObjectHandle, ObjectHandle)> {
        self.require_generate_capable(mechanism, Function::GenerateKeyPair)?;
        let session = self.sessions.find(session_id)?;

        let public_template: AttributeBlob = public_attrs.into_iter().collect();
        let private_template: AttributeBlob = private_attrs.into_iter().collect();
        let mut public_built = object_builder::create_attributes_from_template(public_template, None, CreationOrigin::GeneratePair)?;
        let mut private_built =
            object_builder::create_attributes_from_template(private_template, None, CreationOrigin::GeneratePair)?;

        policy_engine::check_created_attrs_against_token(&session, &public_built)?;
        policy_engine::check_created_attrs_against_token(&session, &private_built)?;
        policy_engine::check_created_attrs_against_processing(mechanism, &public_built)?;
        policy_engine::check_created_attrs_against_processing(mechanism, &private_built)?;
        policy_engine::check_created_attrs(&public_built, Some(&private_built))?;
        self.check_key_size_override(mechanism, &public_built)?;
        self.check_key_size_override(mechanism, &private_built)?;

        policy_engine::add_missing_attribute_id(&mut public_built, Some(&mut private_built))?;

        let public_handle = self.persist_new_object(session_id, public_built)?;
        let private_handle = self.persist_new_object(session_id, private_built)?;
        Ok((public_handle, private_handle))
    }

    /// `DERIVE`: parent checks → build(attrs, parent) →
    /// check_created_attrs_against_token → check_created_attrs_against_processing
    /// → primitive.
    ///
    /// The derive-mechanism `CLASS` rule is checked against the raw template
    /// before `build` runs: a template missing `KEY_TYPE` would otherwise
    /// fail `TEMPLATE_INCOMPLETE` inside the Object Builder, masking the
    /// more specific `TEMPLATE_INCONSISTENT` a wrong `CLASS` should produce.
    pub fn derive_key(
        &self,
        session_id: SessionId,
        mechanism: MechanismId,
        parent_handle: ObjectHandle,
        attrs: Vec<(AttrId, AttributeValue)>,
    ) -> CoreResult<ObjectHandle> {
        let session = self.sessions.find(session_id)?;
        let parent = self.objects.find(parent_handle)?;
        policy_engine::check_access_attrs_against_token(&session, parent.blob())?;
        policy_engine::check_parent_attrs_against_processing(mechanism, Function::Derive, parent.blob())?;

        let template: AttributeBlob = attrs.into_iter().collect();
        if mechanism_names::is_derive_mechanism(mechanism) {
            if let Ok(class_code) = template.get_u32(AttrId::CLASS) {
                if ObjectClass::from_code(class_code)? != ObjectClass::SecretKey {
                    return Err(CoreError::TemplateInconsistent("derived objects must be SECRET_KEY".into()));
                }
            }
        }

        let mut built = object_builder::create_attributes_from_template(template, Some(&parent), CreationOrigin::Derive)?;
        policy_engine::check_created_attrs_against_token(&session, &built)?;
        policy_engine::check_created_attrs_against_processing(mechanism, &built)?;
        self.fill_secret_material(mechanism, &mut built)?;
        self.persist_new_object(session_id, built)
    }

    // -- Object inspection ----------------------------------------------------

    pub fn list_objects(&self) -> CoreResult<Vec<ObjectHandle>> {
        self.objects.list()
    }

    /// Every attribute [`Object::is_exportable`] allows out, for display.
    pub fn show_object(&self, session_id: SessionId, handle: ObjectHandle) -> CoreResult<Vec<(AttrId, AttributeValue)>> {
        let session = self.sessions.find(session_id)?;
        let object = self.objects.find(handle)?;
        policy_engine::check_access_attrs_against_token(&session, object.blob())?;
        Ok(object
            .blob()
            .iter()
            .filter(|(id, _)| object.is_exportable(*id))
            .map(|(id, value)| (*id, value.clone()))
            .collect())
    }

    pub fn get_attribute_value(&self, session_id: SessionId, handle: ObjectHandle, id: AttrId) -> CoreResult<AttributeValue> {
        let session = self.sessions.find(session_id)?;
        let object = self.objects.find(handle)?;
        policy_engine::check_access_attrs_against_token(&session, object.blob())?;
        object.get_attribute_value(id).cloned()
    }

    pub fn set_attribute_value(
        &self,
        session_id: SessionId,
        handle: ObjectHandle,
        id: AttrId,
        value: AttributeValue,
    ) -> CoreResult<()> {
        let session = self.sessions.find(session_id)?;
        let mut object = self.objects.find(handle)?;
        policy_engine::check_access_attrs_against_token(&session, object.blob())?;
        object.set_attribute(id, value)?;
        self.objects.update(object)
    }

    // -- Multi-part processing ------------------------------------------------

    /// `ENCRYPT_INIT`/`SIGN_INIT`/etc: check_mechanism_against_processing(INIT)
    /// → check_parent_attrs_against_processing → allocate processing.
    pub fn begin_processing(
        &self,
        session_id: SessionId,
        mechanism: MechanismId,
        function: Function,
        parent_handle: Option<ObjectHandle>,
    ) -> CoreResult<()> {
        let mut session = self.sessions.find(session_id)?;
        policy_engine::check_mechanism_against_processing(&session, mechanism, function, Step::Init)?;

        let always_authenticate = match parent_handle {
            Some(handle) => {
                let parent = self.objects.find(handle)?;
                policy_engine::check_access_attrs_against_token(&session, parent.blob())?;
                policy_engine::check_parent_attrs_against_processing(mechanism, function, parent.blob())?;
                parent.blob().get_bool(AttrId::ALWAYS_AUTHENTICATE)
            }
            None => false,
        };

        session.begin_processing(mechanism, function, always_authenticate);
        self.sessions.update(session)
    }

    /// Drives one `UPDATE`/`FINAL`/one-shot step of the session's active
    /// processing through `check_mechanism_against_processing`.
    pub fn step_processing(&self, session_id: SessionId, step: Step) -> CoreResult<()> {
        let mut session = self.sessions.find(session_id)?;
        let processing = session
            .processing()
            .cloned()
            .ok_or_else(|| CoreError::ActionProhibited("no active processing on this session".into()))?;

        policy_engine::check_mechanism_against_processing(&session, processing.mechanism, processing.function, step)?;

        if step.is_active() {
            session.mark_updated();
        }
        if matches!(step, Step::Final) {
            session.end_processing();
        }
        self.sessions.update(session)
    }

    // -- Internals --------------------------------------------------------

    fn persist_new_object(&self, session_id: SessionId, blob: AttributeBlob) -> CoreResult<ObjectHandle> {
        let is_token_object = blob.get_bool(AttrId::TOKEN);
        let object = Object::new(blob);
        let handle = self.objects.insert(object)?;
        if !is_token_object {
            let mut session = self.sessions.find(session_id)?;
            session.adopt_object(handle);
            self.sessions.update(session)?;
        }
        Ok(handle)
    }

    /// Façade-level routing guard: the mechanism named for a
    /// `GENERATE`/`GENERATE_KEY_PAIR` request must actually be capable of
    /// that function, the same `allowed_functions` test
    /// `check_mechanism_against_processing` applies at `INIT`.
    fn require_generate_capable(&self, mechanism: MechanismId, function: Function) -> CoreResult<()> {
        if mechanism_catalog::allowed_functions(mechanism) & function.bit() == 0 {
            return Err(CoreError::KeyFunctionNotPermitted(format!("{mechanism:?} does not support {function:?}")));
        }
        Ok(())
    }

    /// Re-validates `VALUE_LEN`/`MODULUS_BITS` against a deployment-time
    /// override for `mechanism`. A no-op when no override is configured for `mechanism`.
    fn check_key_size_override(&self, mechanism: MechanismId, attrs: &AttributeBlob) -> CoreResult<()> {
        let Some((min, max)) = self.key_size_overrides.get(&mechanism).copied() else {
            return Ok(());
        };
        if let Ok(len) = attrs.get_u32(AttrId::VALUE_LEN) {
            if len < min || len > max {
                return Err(CoreError::KeySizeRange(format!(
                    "VALUE_LEN {len} out of configured range [{min}, {max}] for {mechanism:?}"
                )));
            }
        }
        if let Ok(bits) = attrs.get_u32(AttrId::MODULUS_BITS) {
            if bits < min || bits > max {
                return Err(CoreError::KeySizeRange(format!(
                    "MODULUS_BITS {bits} out of configured range [{min}, {max}] for {mechanism:?}"
                )));
            }
        }
        Ok(())
    }

    /// Fills `VALUE` with RNG-sourced bytes for symmetric key material the
    /// template left unset — the `primitive` half of the `GENERATE`/`DERIVE`
    /// ordering table steps. Asymmetric (RSA/EC) material is left to the
    /// caller's template, since this core does not model the math.
    fn fill_secret_material(&self, mechanism: MechanismId, blob: &mut AttributeBlob) -> CoreResult<()> {
        if blob.find(AttrId::VALUE).is_some() {
            return Ok(());
        }
        let class = blob.get_u32(AttrId::CLASS).ok().and_then(|c| ObjectClass::from_code(c).ok());
        if class != Some(ObjectClass::SecretKey) {
            return Ok(());
        }
        let key_type = blob.get_u32(AttrId::KEY_TYPE).ok().and_then(|c| KeyType::from_code(c).ok());
        if key_type.map(|kt| kt.is_hmac()).unwrap_or(false) {
            return Ok(());
        }

        let len = if let Ok(value_len) = blob.get_u32(AttrId::VALUE_LEN) {
            value_len as usize
        } else {
            mechanism_catalog::key_size_bounds(mechanism).map(|(min, _)| min as usize).unwrap_or(32)
        };
        let material = self.primitives.random_bytes(len)?;
        blob.add(AttrId::VALUE, AttributeValue::Bytes(material))
    }
}
