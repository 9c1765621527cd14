//! Session cache holding the bearer token and signed-in user record.
//!
//! [`SessionStore`] is the single source of truth for "is a user logged
//! in". It keeps the in-memory state and the durable key-value store
//! aligned on every mutation: a write that cannot be persisted does not
//! leave a half-applied session behind. Services receive the store as an
//! explicit dependency; there is no process-global token.

use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::ports::{KeyValueStorage, KeyValueStorageError};
use crate::domain::{ApiError, ApiResult, UserAccount};

/// Durable storage key holding the bearer token.
pub const TOKEN_KEY: &str = "fitgym_token";
/// Durable storage key holding the serialized signed-in user.
pub const USER_KEY: &str = "fitgym_user";

/// One authenticated session.
///
/// A user record exists only inside a session, so "user present without a
/// token" is unrepresentable. The reverse is legal: a session restored from
/// storage may carry a token with no readable user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    user: Option<UserAccount>,
}

impl Session {
    /// Bearer token issued by the server.
    pub fn token(&self) -> &str {
        self.token.as_str()
    }

    /// Signed-in user record, when one was stored alongside the token.
    pub fn user(&self) -> Option<&UserAccount> {
        self.user.as_ref()
    }
}

/// Token and current-user cache backed by a durable key-value store.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    state: RwLock<Option<Session>>,
}

fn map_storage_error(error: KeyValueStorageError) -> ApiError {
    ApiError::storage(error.to_string())
}

fn restore_from(storage: &dyn KeyValueStorage) -> Option<Session> {
    let token = match storage.read(TOKEN_KEY) {
        Ok(Some(token)) if !token.is_empty() => token,
        Ok(_) => return None,
        Err(error) => {
            tracing::warn!(%error, "stored session token could not be read; starting signed out");
            return None;
        }
    };

    let user = match storage.read(USER_KEY) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(error) => {
                tracing::warn!(%error, "stored user record is not valid JSON; keeping the token only");
                None
            }
        },
        Ok(None) => None,
        Err(error) => {
            tracing::warn!(%error, "stored user record could not be read; keeping the token only");
            None
        }
    };

    Some(Session { token, user })
}

impl SessionStore {
    /// Build a store, restoring any session the durable storage holds.
    ///
    /// Restore is tolerant: an unreadable token means starting signed out,
    /// and a corrupt user record keeps the token while dropping the record.
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        let restored = restore_from(storage.as_ref());
        Self {
            storage,
            state: RwLock::new(restored),
        }
    }

    /// Bearer token of the current session, if one exists.
    pub fn token(&self) -> Option<String> {
        self.read_state()
            .as_ref()
            .map(|session| session.token.clone())
    }

    /// Signed-in user record, if the current session carries one.
    pub fn current_user(&self) -> Option<UserAccount> {
        self.read_state()
            .as_ref()
            .and_then(|session| session.user.clone())
    }

    /// Whether a session (valid or stale) is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.read_state().is_some()
    }

    /// `Authorization` header value for the current session.
    ///
    /// Returns `None` when signed out so callers can omit the header
    /// entirely instead of sending an empty value.
    pub fn bearer_header(&self) -> Option<String> {
        self.read_state()
            .as_ref()
            .map(|session| format!("Bearer {}", session.token))
    }

    /// Replace the current session with a freshly issued one.
    ///
    /// Both keys are written to durable storage before memory is updated.
    /// If persistence fails midway the partial write is rolled back and the
    /// store ends up signed out, so memory never claims a session the
    /// storage does not hold.
    pub fn set_session(&self, token: &str, user: &UserAccount) -> ApiResult<()> {
        if token.is_empty() {
            return Err(ApiError::validation("session token must not be empty"));
        }
        let serialized = serde_json::to_string(user).map_err(|error| {
            ApiError::storage(format!("user record could not be serialised: {error}"))
        })?;

        let persisted = self
            .storage
            .write(TOKEN_KEY, token)
            .and_then(|()| self.storage.write(USER_KEY, &serialized));
        if let Err(error) = persisted {
            self.abandon_partial_write();
            return Err(map_storage_error(error));
        }

        *self.write_state() = Some(Session {
            token: token.to_owned(),
            user: Some(user.clone()),
        });
        Ok(())
    }

    /// Drop the current session from memory and durable storage.
    ///
    /// Memory is cleared first so the caller is signed out even when the
    /// storage removal fails; the error then reports the stale durable
    /// state. Safe to call when no session exists.
    pub fn clear_session(&self) -> ApiResult<()> {
        *self.write_state() = None;
        self.storage.remove(USER_KEY).map_err(map_storage_error)?;
        self.storage.remove(TOKEN_KEY).map_err(map_storage_error)?;
        Ok(())
    }

    /// Validate a restored session against the server.
    ///
    /// Without a stored token this reports `false` and never invokes the
    /// probe. An HTTP error from the probe (typically 401) clears the
    /// session; a failure without a server verdict (network or decode)
    /// keeps the stored session for a later attempt but still reports
    /// `false`.
    pub async fn restore_and_validate<F, Fut>(&self, probe: F) -> bool
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<()>>,
    {
        if !self.is_authenticated() {
            return false;
        }

        match probe().await {
            Ok(()) => true,
            Err(error @ ApiError::Http { .. }) => {
                tracing::warn!(%error, "stored session rejected by the server; clearing it");
                if let Err(clear_error) = self.clear_session() {
                    tracing::warn!(%clear_error, "stale session could not be removed from storage");
                }
                false
            }
            Err(error) => {
                tracing::warn!(
                    %error,
                    "session probe failed without a server verdict; keeping stored session"
                );
                false
            }
        }
    }

    fn abandon_partial_write(&self) {
        *self.write_state() = None;
        for key in [USER_KEY, TOKEN_KEY] {
            if let Err(error) = self.storage.remove(key) {
                tracing::warn!(key, %error, "partial session write could not be rolled back");
            }
        }
    }

    fn read_state(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
