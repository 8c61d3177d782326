//! Access guard — per-navigation allow/redirect decision for protected views.
//!
//! The guard owns no state. It is evaluated fresh on every navigation
//! attempt against the current session; its only side effect is recording
//! the requested path as the session's redirect target when the visitor is
//! signed out.

use serde::Serialize;
use tracing::debug;

use crate::routes::{HOME_PATH, LOGIN_PATH};
use crate::services::session::SessionManager;

/// Outcome of a guarded navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Access {
    /// Render the requested view.
    Allow,
    /// Signed out: go to `/login`, carrying the original path for the return trip.
    RedirectToLogin { from: String },
    /// Signed in without the required role: go home.
    RedirectHome,
}

impl Access {
    /// Path to redirect to, or `None` when access is allowed.
    #[must_use]
    pub fn redirect_target(&self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::RedirectToLogin { .. } => Some(LOGIN_PATH),
            Self::RedirectHome => Some(HOME_PATH),
        }
    }

    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Decide whether the current session may view `path`.
pub fn authorize(session: &SessionManager, require_admin: bool, path: &str) -> Access {
    let access = if !session.is_authenticated() {
        session.set_redirect_path(path);
        Access::RedirectToLogin { from: path.to_owned() }
    } else if require_admin && !session.is_admin() {
        Access::RedirectHome
    } else {
        Access::Allow
    };
    debug!(%path, require_admin, ?access, "access decision");
    access
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
