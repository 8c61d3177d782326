//! Runtime configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_SESSION_FILE: &str = ".blogdesk/session.json";
pub const DEFAULT_AUTH_DELAY_MS: u64 = 800;
pub const DEFAULT_CONTENT_DELAY_MS: u64 = 500;
pub const DEFAULT_CATEGORY_DELAY_MS: u64 = 300;

/// Simulated round-trip delays for each class of operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyConfig {
    /// Login and register.
    pub auth: Duration,
    /// Post reads and writes.
    pub content: Duration,
    /// Category listing.
    pub categories: Duration,
}

impl LatencyConfig {
    #[must_use]
    pub const fn none() -> Self {
        Self { auth: Duration::ZERO, content: Duration::ZERO, categories: Duration::ZERO }
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            auth: Duration::from_millis(DEFAULT_AUTH_DELAY_MS),
            content: Duration::from_millis(DEFAULT_CONTENT_DELAY_MS),
            categories: Duration::from_millis(DEFAULT_CATEGORY_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Location of the durable session slot file.
    pub session_file: PathBuf,
    pub latency: LatencyConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { session_file: PathBuf::from(DEFAULT_SESSION_FILE), latency: LatencyConfig::default() }
    }
}

impl AppConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `BLOGDESK_SESSION_FILE`: default `.blogdesk/session.json`
    /// - `BLOGDESK_AUTH_DELAY_MS`: default 800
    /// - `BLOGDESK_CONTENT_DELAY_MS`: default 500
    /// - `BLOGDESK_CATEGORY_DELAY_MS`: default 300
    ///
    /// Unparseable numbers fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let session_file = std::env::var("BLOGDESK_SESSION_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE), PathBuf::from);

        let latency = LatencyConfig {
            auth: Duration::from_millis(env_parse("BLOGDESK_AUTH_DELAY_MS", DEFAULT_AUTH_DELAY_MS)),
            content: Duration::from_millis(env_parse("BLOGDESK_CONTENT_DELAY_MS", DEFAULT_CONTENT_DELAY_MS)),
            categories: Duration::from_millis(env_parse("BLOGDESK_CATEGORY_DELAY_MS", DEFAULT_CATEGORY_DELAY_MS)),
        };

        Self { session_file, latency }
    }

    /// Same config with every simulated delay zeroed.
    #[must_use]
    pub fn without_latency(mut self) -> Self {
        self.latency = LatencyConfig::none();
        self
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
