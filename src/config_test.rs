use super::*;
use std::sync::Mutex;

// =============================================================================
// AppConfig::from_env (env mutation is unsafe in edition 2024)
// ENV_LOCK serializes the tests in this file; nothing else reads these vars.
// =============================================================================

static ENV_LOCK: Mutex<()> = Mutex::new(());

const VARS: [&str; 4] = [
    "BLOGDESK_SESSION_FILE",
    "BLOGDESK_AUTH_DELAY_MS",
    "BLOGDESK_CONTENT_DELAY_MS",
    "BLOGDESK_CATEGORY_DELAY_MS",
];

/// # Safety
/// Caller must hold `ENV_LOCK`.
unsafe fn clear_env() {
    for var in VARS {
        unsafe { std::env::remove_var(var) };
    }
}

#[test]
fn from_env_defaults_when_unset() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { clear_env() };

    let config = AppConfig::from_env();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.latency.auth, Duration::from_millis(800));
    assert_eq!(config.latency.content, Duration::from_millis(500));
    assert_eq!(config.latency.categories, Duration::from_millis(300));
    assert_eq!(config.session_file, PathBuf::from(".blogdesk/session.json"));
}

#[test]
fn from_env_reads_overrides() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_env();
        std::env::set_var("BLOGDESK_SESSION_FILE", "/tmp/blogdesk-test/session.json");
        std::env::set_var("BLOGDESK_AUTH_DELAY_MS", "10");
        std::env::set_var("BLOGDESK_CONTENT_DELAY_MS", " 20 ");
        std::env::set_var("BLOGDESK_CATEGORY_DELAY_MS", "0");
    }

    let config = AppConfig::from_env();
    assert_eq!(config.session_file, PathBuf::from("/tmp/blogdesk-test/session.json"));
    assert_eq!(config.latency.auth, Duration::from_millis(10));
    assert_eq!(config.latency.content, Duration::from_millis(20));
    assert_eq!(config.latency.categories, Duration::ZERO);

    unsafe { clear_env() };
}

#[test]
fn from_env_bad_numbers_fall_back() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_env();
        std::env::set_var("BLOGDESK_AUTH_DELAY_MS", "soon");
        std::env::set_var("BLOGDESK_CONTENT_DELAY_MS", "-5");
        std::env::set_var("BLOGDESK_SESSION_FILE", "  ");
    }

    let config = AppConfig::from_env();
    assert_eq!(config.latency.auth, Duration::from_millis(DEFAULT_AUTH_DELAY_MS));
    assert_eq!(config.latency.content, Duration::from_millis(DEFAULT_CONTENT_DELAY_MS));
    assert_eq!(config.session_file, PathBuf::from(DEFAULT_SESSION_FILE));

    unsafe { clear_env() };
}

// =============================================================================
// without_latency
// =============================================================================

#[test]
fn without_latency_zeroes_delays_and_keeps_path() {
    let config = AppConfig { session_file: PathBuf::from("s.json"), latency: LatencyConfig::default() }.without_latency();
    assert_eq!(config.latency, LatencyConfig::none());
    assert_eq!(config.session_file, PathBuf::from("s.json"));
}
