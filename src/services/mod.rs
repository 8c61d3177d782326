//! Domain services used by the command handlers.
//!
//! ARCHITECTURE
//! ============
//! `session` and `posts` are independent leaves. `guard` reads the session;
//! `dashboard` and `forms` sit on top of `posts` for the admin views.

pub mod dashboard;
pub mod fixture;
pub mod forms;
pub mod guard;
pub mod posts;
pub mod session;
