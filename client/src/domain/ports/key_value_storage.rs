//! Driven port for the durable key-value store backing session state.
//!
//! The session cache persists exactly two string keys (token and serialized
//! user record), so the contract mirrors a browser's local storage: plain
//! string reads and writes plus an idempotent remove.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::define_port_error;

define_port_error! {
    /// Errors raised by key-value storage adapters.
    pub enum KeyValueStorageError {
        /// Stored value could not be read.
        Read { message: String } =>
            "key-value read failed: {message}",
        /// Value could not be written or removed.
        Write { message: String } =>
            "key-value write failed: {message}",
        /// Key is not usable by this store.
        InvalidKey { key: String } =>
            "storage key '{key}' is not a plain file name",
    }
}

/// Port for persisting session strings across process restarts.
///
/// `remove` succeeds when the key is already absent; callers rely on that
/// to make session clearing safe to repeat.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, KeyValueStorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), KeyValueStorageError>;

    /// Remove `key` and its value; absent keys are not an error.
    fn remove(&self, key: &str) -> Result<(), KeyValueStorageError>;
}

/// In-memory implementation used as a test double and for ephemeral sessions.
#[derive(Debug, Default)]
pub struct FixtureKeyValueStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl FixtureKeyValueStorage {
    /// Build a store pre-populated with the given entries.
    pub fn with_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            entries: Mutex::new(entries.into_iter().collect()),
        }
    }

    fn lock_entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStorage for FixtureKeyValueStorage {
    fn read(&self, key: &str) -> Result<Option<String>, KeyValueStorageError> {
        Ok(self.lock_entries().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), KeyValueStorageError> {
        self.lock_entries()
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KeyValueStorageError> {
        self.lock_entries().remove(key);
        Ok(())
    }
}
