//! Session state for the signed-in principal.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided once through context as `RwSignal<SessionStore>`. Route guards,
//! the dashboard, and the login/signup pages read snapshots; only the command
//! methods below mutate, and each mutation is persisted before it returns.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::durable::Durable;
use crate::net::types::{ActorKind, Business, User};
use crate::util::storage::StorageBackend;

/// Storage key of the persisted session record.
pub const SESSION_STORAGE_KEY: &str = "merchant-portal/session";

/// Persisted session record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionState {
    pub user: Option<User>,
    pub access_token: String,
    pub is_authenticated: bool,
    pub selected_business: Option<Business>,
}

/// Field-wise partial update for the current [`User`].
///
/// `Some` fields overwrite, `None` fields leave the user untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserPatch {
    pub national_id: Option<String>,
    pub iqama_id: Option<String>,
    pub cr_number: Option<String>,
    pub access_token: Option<String>,
    pub full_name_ar: Option<String>,
    pub full_name_en: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<String>,
    pub businesses: Option<Vec<Business>>,
    pub actor_type: Option<ActorKind>,
}

impl UserPatch {
    pub fn apply(self, user: &mut User) {
        if let Some(v) = self.national_id {
            user.national_id = Some(v);
        }
        if let Some(v) = self.iqama_id {
            user.iqama_id = Some(v);
        }
        if let Some(v) = self.cr_number {
            user.cr_number = Some(v);
        }
        if let Some(v) = self.access_token {
            user.access_token = v;
        }
        if let Some(v) = self.full_name_ar {
            user.full_name_ar = v;
        }
        if let Some(v) = self.full_name_en {
            user.full_name_en = v;
        }
        if let Some(v) = self.nationality {
            user.nationality = Some(v);
        }
        if let Some(v) = self.date_of_birth {
            user.date_of_birth = Some(v);
        }
        if let Some(v) = self.businesses {
            user.businesses = v;
        }
        if let Some(v) = self.actor_type {
            user.actor_type = v;
        }
    }
}

/// Durable session container.
#[derive(Clone, Debug)]
pub struct SessionStore {
    inner: Durable<SessionState>,
    restored: bool,
}

impl SessionStore {
    /// Store hydrated from `backend`.
    pub fn load(backend: Arc<dyn StorageBackend>) -> Self {
        Self { inner: Durable::load(SESSION_STORAGE_KEY, backend), restored: true }
    }

    /// Empty store that has not read `backend` yet; see [`SessionStore::restore`].
    pub fn pending(backend: Arc<dyn StorageBackend>) -> Self {
        Self { inner: Durable::detached(SESSION_STORAGE_KEY, backend), restored: false }
    }

    /// Re-read the persisted record. Used once after hydration.
    pub fn restore(&mut self) {
        self.inner.reload();
        self.restored = true;
    }

    pub fn is_restored(&self) -> bool {
        self.restored
    }

    /// Read-only snapshot.
    pub fn state(&self) -> &SessionState {
        self.inner.get()
    }

    pub fn user(&self) -> Option<&User> {
        self.state().user.as_ref()
    }

    pub fn access_token(&self) -> &str {
        &self.state().access_token
    }

    pub fn is_authenticated(&self) -> bool {
        self.state().is_authenticated
    }

    pub fn selected_business(&self) -> Option<&Business> {
        self.state().selected_business.as_ref()
    }

    /// Replace the user wholesale and adopt its token. The token is trusted
    /// as given.
    pub fn set_user(&mut self, user: User) {
        self.inner.mutate(|s| {
            s.access_token.clone_from(&user.access_token);
            s.user = Some(user);
            s.is_authenticated = true;
        });
    }

    pub fn set_access_token(&mut self, token: impl Into<String>) {
        let token = token.into();
        self.inner.mutate(|s| {
            s.is_authenticated = !token.is_empty();
            s.access_token = token;
        });
    }

    /// Drop user and token. The selected business is kept.
    pub fn clear_user(&mut self) {
        self.inner.mutate(|s| {
            s.user = None;
            s.access_token.clear();
            s.is_authenticated = false;
        });
    }

    /// Merge `patch` into the current user; does nothing when signed out.
    pub fn update_user(&mut self, patch: UserPatch) {
        if self.state().user.is_none() {
            return;
        }
        self.inner.mutate(|s| {
            if let Some(user) = s.user.as_mut() {
                patch.apply(user);
            }
        });
    }

    pub fn set_selected_business(&mut self, business: Option<Business>) {
        self.inner.mutate(|s| s.selected_business = business);
    }
}
