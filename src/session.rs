//! Signed-in user session.
//!
//! One explicit service object instead of a process global. The current
//! user is held in memory and mirrored to the `user` key so a restart can
//! pick the session back up.
//!
//! Key properties:
//! - Login waits out the simulated call before checking credentials
//! - Mirroring the user on login is best effort; a failed write is logged
//!   and the session lives in memory only
//! - Logout removes the stored key first and only then clears memory, so a
//!   failed removal leaves the user signed in instead of coming back later
//! - A malformed stored user is removed on restore, never surfaced

use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::auth;
use crate::config::SESSION_USER_KEY;
use crate::latency::simulated_call;
use crate::models::User;
use crate::storage::{save_json, KeyValueStore, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Not signed in")]
    NotAuthenticated,
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("Session lock poisoned")]
    LockPoisoned,
}

pub struct SessionService {
    store: Arc<dyn KeyValueStore>,
    user: RwLock<Option<User>>,
    latency: Duration,
}

impl SessionService {
    /// Empty session; call [`SessionService::restore`] to pick up a stored user.
    pub fn new(store: Arc<dyn KeyValueStore>, latency: Duration) -> Self {
        Self {
            store,
            user: RwLock::new(None),
            latency,
        }
    }

    pub fn current_user(&self) -> Result<Option<User>, SessionError> {
        let guard = self.user.read().map_err(|_| SessionError::LockPoisoned)?;
        Ok(guard.clone())
    }

    /// Signed-in user or `NotAuthenticated`.
    pub fn require_user(&self) -> Result<User, SessionError> {
        self.current_user()?.ok_or(SessionError::NotAuthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.current_user(), Ok(Some(_)))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        simulated_call(self.latency).await;

        let user = match auth::authenticate(email.trim(), password) {
            Some(user) => user,
            None => {
                tracing::warn!("Login rejected");
                return Err(SessionError::InvalidCredentials);
            }
        };

        if let Err(e) = save_json(self.store.as_ref(), SESSION_USER_KEY, &user) {
            tracing::warn!(error = %e, "Could not persist session");
        }
        let mut guard = self.user.write().map_err(|_| SessionError::LockPoisoned)?;
        *guard = Some(user.clone());
        tracing::info!(user_id = %user.id, role = %user.role, "Signed in");
        Ok(user)
    }

    pub fn logout(&self) -> Result<(), SessionError> {
        let mut guard = self.user.write().map_err(|_| SessionError::LockPoisoned)?;
        self.store.remove_item(SESSION_USER_KEY)?;
        let previous = guard.take();
        if let Some(user) = previous {
            tracing::info!(user_id = %user.id, "Signed out");
        }
        Ok(())
    }

    /// Load the stored user, if any. Unreadable or malformed data yields
    /// no session; malformed data is also deleted.
    pub fn restore(&self) -> Result<Option<User>, SessionError> {
        let restored = match self.store.get_item(SESSION_USER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to parse stored user");
                    if let Err(e) = self.store.remove_item(SESSION_USER_KEY) {
                        tracing::warn!(error = %e, "Could not remove stored user");
                    }
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read stored user");
                None
            }
        };

        let mut guard = self.user.write().map_err(|_| SessionError::LockPoisoned)?;
        *guard = restored.clone();
        if let Some(user) = &restored {
            tracing::debug!(user_id = %user.id, "Session restored");
        }
        Ok(restored)
    }
}
