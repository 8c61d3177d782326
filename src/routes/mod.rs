//! Route table and guarded navigation.
//!
//! DESIGN
//! ======
//! `Route::recognize` maps a path to a named route, extracting `:slug` and
//! `:id` params. Every `/admin` route requires an admin session; everything
//! else is public. `navigate` combines the two so a caller gets the matched
//! route and the access decision in one step.

pub mod breadcrumbs;

use serde::Serialize;

use crate::services::guard::{self, Access};
use crate::services::session::SessionManager;

pub const HOME_PATH: &str = "/";
pub const BLOG_PATH: &str = "/blog";
pub const ABOUT_PATH: &str = "/about";
pub const CONTACT_PATH: &str = "/contact";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const ADMIN_PATH: &str = "/admin";
pub const ADMIN_POSTS_PATH: &str = "/admin/posts";
pub const ADMIN_POST_NEW_PATH: &str = "/admin/posts/new";
pub const ADMIN_SETTINGS_PATH: &str = "/admin/settings";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: &'static str,
    pub path: &'static str,
}

pub const NAVIGATION_ITEMS: [NavItem; 4] = [
    NavItem { name: "Home", path: HOME_PATH },
    NavItem { name: "Blog", path: BLOG_PATH },
    NavItem { name: "About", path: ABOUT_PATH },
    NavItem { name: "Contact", path: CONTACT_PATH },
];

pub const ADMIN_NAVIGATION_ITEMS: [NavItem; 3] = [
    NavItem { name: "Dashboard", path: ADMIN_PATH },
    NavItem { name: "Posts", path: ADMIN_POSTS_PATH },
    NavItem { name: "Settings", path: ADMIN_SETTINGS_PATH },
];

// =============================================================================
// ROUTES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum Route {
    Home,
    Blog,
    BlogPost { slug: String },
    About,
    Contact,
    Login,
    Register,
    AdminDashboard,
    AdminPosts,
    AdminPostNew,
    AdminPostEdit { id: String },
    AdminSettings,
    NotFound,
}

impl Route {
    /// Match a path against the route table. A trailing slash is ignored;
    /// unmatched paths are `NotFound`.
    #[must_use]
    pub fn recognize(path: &str) -> Self {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Self::Home,
            ["blog"] => Self::Blog,
            ["blog", slug] => Self::BlogPost { slug: (*slug).to_owned() },
            ["about"] => Self::About,
            ["contact"] => Self::Contact,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["admin"] => Self::AdminDashboard,
            ["admin", "posts"] => Self::AdminPosts,
            ["admin", "posts", "new"] => Self::AdminPostNew,
            ["admin", "posts", id, "edit"] => Self::AdminPostEdit { id: (*id).to_owned() },
            ["admin", "settings"] => Self::AdminSettings,
            _ => Self::NotFound,
        }
    }

    /// `Some(require_admin)` for guarded routes, `None` for public ones.
    #[must_use]
    pub fn protection(&self) -> Option<bool> {
        match self {
            Self::AdminDashboard | Self::AdminPosts | Self::AdminPostNew | Self::AdminPostEdit { .. } | Self::AdminSettings => {
                Some(true)
            }
            _ => None,
        }
    }
}

/// A recognized route plus the guard's verdict on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Navigation {
    pub route: Route,
    pub access: Access,
}

/// Resolve `path` for the current session. Public routes are always allowed.
pub fn navigate(session: &SessionManager, path: &str) -> Navigation {
    let route = Route::recognize(path);
    let access = match route.protection() {
        Some(require_admin) => guard::authorize(session, require_admin, path),
        None => Access::Allow,
    };
    Navigation { route, access }
}

/// Where to send a user after a successful login: the path carried by the
/// login redirect, else the session's recorded target, else home.
#[must_use]
pub fn login_destination(carried: Option<&str>, session: &SessionManager) -> String {
    if let Some(from) = carried.filter(|p| !p.is_empty()) {
        return from.to_owned();
    }
    let recorded = session.redirect_path();
    if recorded.is_empty() { HOME_PATH.to_owned() } else { recorded }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
