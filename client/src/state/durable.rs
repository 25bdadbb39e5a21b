//! Generic durable state container.
//!
//! DESIGN
//! ======
//! A `Durable<T>` owns one serde value and the storage key it lives under.
//! Every mutation goes through [`Durable::mutate`], which writes the full
//! value back before returning. Startup reads fall back to `T::default()` when
//! nothing is stored or the stored shape no longer decodes. Write failures are
//! logged and dropped so UI interaction never breaks on a full quota.

#[cfg(test)]
#[path = "durable_test.rs"]
mod durable_test;

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::util::storage::{StorageBackend, StorageError};

pub struct Durable<T> {
    key: &'static str,
    value: T,
    backend: Arc<dyn StorageBackend>,
}

impl<T> Durable<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Container holding `T::default()` without reading storage.
    pub fn detached(key: &'static str, backend: Arc<dyn StorageBackend>) -> Self {
        Self { key, value: T::default(), backend }
    }

    /// Container hydrated from whatever is stored under `key`.
    pub fn load(key: &'static str, backend: Arc<dyn StorageBackend>) -> Self {
        let mut durable = Self::detached(key, backend);
        durable.reload();
        durable
    }

    /// Replace the in-memory value with the stored one, or the default.
    pub fn reload(&mut self) {
        self.value = match self.read() {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                leptos::logging::warn!("discarding persisted state: {e}");
                T::default()
            }
        };
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Apply `f` to the value, then persist the whole value.
    pub fn mutate<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let out = f(&mut self.value);
        self.persist();
        out
    }

    /// Persist the current value, logging and swallowing any failure.
    pub fn persist(&self) {
        if let Err(e) = self.try_persist() {
            leptos::logging::warn!("state not persisted: {e}");
        }
    }

    /// Persist the current value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be encoded or the backend rejects
    /// the write.
    pub fn try_persist(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&self.value)
            .map_err(|source| StorageError::Encode { key: self.key.to_owned(), source })?;
        self.backend.set_item(self.key, &raw)
    }

    /// Reset to the default value and drop the stored record.
    pub fn forget(&mut self) {
        self.value = T::default();
        if let Err(e) = self.backend.remove_item(self.key) {
            leptos::logging::warn!("state not removed: {e}");
        }
    }

    fn read(&self) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.backend.get_item(self.key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Decode { key: self.key.to_owned(), source })
    }
}

impl<T: Clone> Clone for Durable<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            value: self.value.clone(),
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Durable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Durable").field("key", &self.key).field("value", &self.value).finish_non_exhaustive()
    }
}
