//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` wires the capabilities (clock, durable store) into the two
//! services and is handed to every command handler. Clone is cheap: the
//! services are `Arc`-wrapped and share one clock.

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;
use crate::services::posts::PostRepository;
use crate::services::session::SessionManager;
use crate::storage::{FileStore, KeyValueStore};

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<SessionManager>,
    pub posts: Arc<PostRepository>,
}

impl AppState {
    /// Wire services over explicit capabilities. The repository starts from the demo fixture.
    #[must_use]
    pub fn new(config: &AppConfig, store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let session = SessionManager::init(store, clock.clone(), config.latency.auth);
        let posts = PostRepository::seeded(clock, config.latency);
        Self { session: Arc::new(session), posts: Arc::new(posts) }
    }

    /// Production wiring: wall clock and the file-backed session slot.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.session_file.clone()));
        Self::new(config, store, Arc::new(SystemClock))
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
