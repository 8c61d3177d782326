//! Session manager — current user, durable slot mirror, post-login redirect.
//!
//! ARCHITECTURE
//! ============
//! The session is an explicit object injected where needed (see
//! `state::AppState`), not ambient global state. Its lifecycle is
//! `init` (read the durable slot) → `login`/`register`/`logout` → process exit.
//! The durable slot is a serialized mirror of the in-memory user; the
//! in-memory value is authoritative.
//!
//! TRADE-OFFS
//! ==========
//! There is no credential check. Any non-empty email/password pair logs in,
//! and the role is derived from the email text. This simulates a backend and
//! is a placeholder for real credential and role verification.
//!
//! ERROR HANDLING
//! ==============
//! Slot read/parse failures at init are logged and the session starts
//! unauthenticated. Slot write failures after login/logout are logged and do
//! not fail the operation: the in-memory session still changed.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{info, warn};

use crate::clock::{Clock, epoch_millis};
use crate::routes::HOME_PATH;
use crate::storage::KeyValueStore;

/// Durable slot key holding the serialized current user.
pub const SESSION_SLOT_KEY: &str = "user";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("All fields are required")]
    MissingFields,
}

impl crate::error::ErrorCode for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "E_INVALID_CREDENTIALS",
            Self::MissingFields => "E_MISSING_FIELDS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    /// Role granted at login: any email containing `admin` (case-sensitive) is an admin.
    #[must_use]
    pub fn for_login_email(email: &str) -> Self {
        if email.contains("admin") { Self::Admin } else { Self::User }
    }
}

/// The signed-in user. Field names match the durable slot's JSON record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

struct SessionInner {
    user: Option<User>,
    redirect_path: String,
    last_user_id: i64,
}

pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    delay: Duration,
    inner: Mutex<SessionInner>,
}

// =============================================================================
// LIFECYCLE
// =============================================================================

impl SessionManager {
    /// Restore the session from the durable slot.
    ///
    /// An unreadable or corrupt slot is discarded and the session starts
    /// unauthenticated; this never fails.
    pub fn init(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>, delay: Duration) -> Self {
        let user = restore_user(store.as_ref());
        let last_user_id = user.as_ref().map_or(0, |u| u.id);
        Self {
            store,
            clock,
            delay,
            inner: Mutex::new(SessionInner { user, redirect_path: HOME_PATH.to_owned(), last_user_id }),
        }
    }

    /// Sign in. Resolves after the simulated round-trip delay.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidCredentials`] if `email` or `password` is empty.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        self.clock.sleep(self.delay).await;

        if email.is_empty() || password.is_empty() {
            return Err(SessionError::InvalidCredentials);
        }

        let name = email.split('@').next().unwrap_or(email).to_owned();
        let user = self.start_session(email, name, Role::for_login_email(email));
        info!(user_id = user.id, role = ?user.role, "user logged in");
        Ok(user)
    }

    /// Create an account and sign in. Registration never grants admin.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::MissingFields`] if any argument is empty.
    pub async fn register(&self, email: &str, password: &str, name: &str) -> Result<User, SessionError> {
        self.clock.sleep(self.delay).await;

        if email.is_empty() || password.is_empty() || name.is_empty() {
            return Err(SessionError::MissingFields);
        }

        let user = self.start_session(email, name.to_owned(), Role::User);
        info!(user_id = user.id, "user registered");
        Ok(user)
    }

    /// Sign out: clear the user, drop the durable slot, reset the redirect target.
    pub fn logout(&self) {
        let previous = {
            let mut inner = self.lock();
            inner.redirect_path = HOME_PATH.to_owned();
            inner.user.take()
        };
        if let Err(e) = self.store.remove(SESSION_SLOT_KEY) {
            warn!(error = %e, "failed to clear session slot");
        }
        if let Some(user) = previous {
            info!(user_id = user.id, "user logged out");
        }
    }

    fn start_session(&self, email: &str, name: String, role: Role) -> User {
        let created_at = self.clock.now();
        let user = {
            let mut inner = self.lock();
            let id = epoch_millis(created_at).max(inner.last_user_id + 1);
            inner.last_user_id = id;
            let user = User { id, email: email.to_owned(), name, role, created_at };
            inner.user = Some(user.clone());
            user
        };

        match serde_json::to_string(&user) {
            Ok(json) => {
                if let Err(e) = self.store.set(SESSION_SLOT_KEY, &json) {
                    warn!(error = %e, user_id = user.id, "failed to persist session slot");
                }
            }
            Err(e) => warn!(error = %e, user_id = user.id, "failed to serialize session user"),
        }
        user
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

// =============================================================================
// QUERIES
// =============================================================================

impl SessionManager {
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.lock().user.clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.lock().user.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.lock().user.as_ref().is_some_and(User::is_admin)
    }

    /// Pending post-login destination. `/` unless a guard recorded one.
    #[must_use]
    pub fn redirect_path(&self) -> String {
        self.lock().redirect_path.clone()
    }

    pub fn set_redirect_path(&self, path: impl Into<String>) {
        self.lock().redirect_path = path.into();
    }
}

fn restore_user(store: &dyn KeyValueStore) -> Option<User> {
    let raw = match store.get(SESSION_SLOT_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(error = %e, "session slot unreadable; starting signed out");
            return None;
        }
    };

    match serde_json::from_str::<User>(&raw) {
        Ok(user) => {
            info!(user_id = user.id, "restored session");
            Some(user)
        }
        Err(e) => {
            warn!(error = %e, "corrupt session slot discarded");
            if let Err(e) = store.remove(SESSION_SLOT_KEY) {
                warn!(error = %e, "failed to discard corrupt session slot");
            }
            None
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
