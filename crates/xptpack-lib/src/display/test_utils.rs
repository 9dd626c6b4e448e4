//! Test utilities shared by modules that touch display or environment state
//!
//! Environment variables are process-global, so tests that set or clear them
//! serialize on [`env_lock`].

use crate::display::styling::StyleManager;
use std::sync::{Mutex, MutexGuard};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Serialize access to process environment variables across tests
pub fn env_lock() -> MutexGuard<'static, ()> {
    // A panicking test must not wedge every later one
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Create test styling without color
pub fn create_test_styling() -> StyleManager {
    StyleManager::new(false)
}

/// Clean environment variables that affect color detection and config loading
///
/// # Safety
///
/// Uses unsafe `env::remove_var()` as required by Rust's environment variable API.
/// Only call while holding [`env_lock`].
pub fn clean_test_env() {
    unsafe {
        std::env::remove_var("CLICOLOR");
        std::env::remove_var("CLICOLOR_FORCE");
        std::env::remove_var("NO_COLOR");
        std::env::remove_var("FORCE_COLOR");
        std::env::remove_var("CI");
        std::env::remove_var("XPTPACK_WORKDIR");
        std::env::remove_var("XPTPACK_PACKAGER");
        std::env::remove_var("XPTPACK_PACKAGER_TIMEOUT");
        std::env::remove_var("XPTPACK_PACKAGER_QUIET");
        std::env::remove_var("XPTPACK_LOG_LEVEL");
        std::env::remove_var("XPTPACK_LOG_FORMAT");
        std::env::remove_var("XPTPACK_LOG_OUTPUT");
        std::env::remove_var("XPTPACK_COLOR");
    }
}
