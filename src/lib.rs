//! Blog core: session/authorization model and an in-memory content repository.
//!
//! ARCHITECTURE
//! ============
//! - `services::session` holds the signed-in user and mirrors it to a durable slot.
//! - `services::guard` decides allow/redirect for protected navigations.
//! - `services::posts` is the post repository with simulated async latency.
//! - `routes` maps paths to named routes and runs the guard where required.
//!
//! Capabilities (`clock::Clock`, `storage::KeyValueStore`) are injected so
//! tests run deterministically with zero delay.

pub mod clock;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
