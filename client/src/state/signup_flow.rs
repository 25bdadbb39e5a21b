//! Multi-step signup wizard state.
//!
//! SYSTEM CONTEXT
//! ==============
//! The signup page drives this store step by step. It persists under its own
//! key so an in-progress signup survives a reload without touching an
//! existing session. `reset_flow` must run once per finished or abandoned
//! attempt.

#[cfg(test)]
#[path = "signup_flow_test.rs"]
mod signup_flow_test;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::durable::Durable;
use crate::net::types::User;
use crate::util::storage::StorageBackend;

/// Storage key of the persisted signup-flow record.
pub const SIGNUP_FLOW_STORAGE_KEY: &str = "merchant-portal/signup-flow";

/// Form fields collected across wizard steps. Absent fields serialize as
/// missing keys, so an empty form is `{}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupFormData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirm_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stores: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
}

impl SignupFormData {
    /// Shallow merge: fields present in `partial` win.
    pub fn merge(&mut self, partial: SignupFormData) {
        self.national_id = partial.national_id.or(self.national_id.take());
        self.password = partial.password.or(self.password.take());
        self.confirm_password = partial.confirm_password.or(self.confirm_password.take());
        self.stores = partial.stores.or(self.stores.take());
        self.iban = partial.iban.or(self.iban.take());
    }
}

/// Persisted signup-flow record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignupFlowState {
    pub active_step: u32,
    pub form_data: SignupFormData,
    pub access_token: String,
    #[serde(with = "empty_object")]
    pub user: Option<User>,
}

/// Durable signup-flow container.
#[derive(Clone, Debug)]
pub struct SignupFlowStore {
    inner: Durable<SignupFlowState>,
    restored: bool,
}

impl SignupFlowStore {
    pub fn load(backend: Arc<dyn StorageBackend>) -> Self {
        Self { inner: Durable::load(SIGNUP_FLOW_STORAGE_KEY, backend), restored: true }
    }

    /// Empty store that has not read `backend` yet. Form inputs seeded from it
    /// must wait for [`SignupFlowStore::is_restored`].
    pub fn pending(backend: Arc<dyn StorageBackend>) -> Self {
        Self { inner: Durable::detached(SIGNUP_FLOW_STORAGE_KEY, backend), restored: false }
    }

    pub fn restore(&mut self) {
        self.inner.reload();
        self.restored = true;
    }

    pub fn is_restored(&self) -> bool {
        self.restored
    }

    /// Read-only snapshot.
    pub fn state(&self) -> &SignupFlowState {
        self.inner.get()
    }

    pub fn active_step(&self) -> u32 {
        self.state().active_step
    }

    pub fn form_data(&self) -> &SignupFormData {
        &self.state().form_data
    }

    /// Set the step index verbatim. Sequencing is the wizard's job.
    pub fn set_active_step(&mut self, step: u32) {
        self.inner.mutate(|s| s.active_step = step);
    }

    pub fn update_form_data(&mut self, partial: SignupFormData) {
        self.inner.mutate(|s| s.form_data.merge(partial));
    }

    pub fn set_access_token(&mut self, token: impl Into<String>) {
        let token = token.into();
        self.inner.mutate(|s| s.access_token = token);
    }

    pub fn set_user(&mut self, user: User) {
        self.inner.mutate(|s| s.user = Some(user));
    }

    /// Restore every field to its initial value in one write.
    pub fn reset_flow(&mut self) {
        self.inner.mutate(|s| *s = SignupFlowState::default());
    }
}

/// `Option<User>` persisted as `{}` when empty.
mod empty_object {
    use serde::de::Error as _;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::net::types::User;

    pub fn serialize<S: Serializer>(user: &Option<User>, serializer: S) -> Result<S::Ok, S::Error> {
        match user {
            Some(user) => user.serialize(serializer),
            None => serializer.serialize_map(Some(0))?.end(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<User>, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        match &value {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::Object(map) if map.is_empty() => Ok(None),
            _ => serde_json::from_value(value).map(Some).map_err(D::Error::custom),
        }
    }
}
