//! Terminal display system
//!
//! Provides semantic APIs for user-facing communication. Separates concerns
//! between logging (tracing) and user interaction (status, progress).

use std::sync::OnceLock;

pub mod live;
pub mod mock;
pub mod providers;
pub mod status;
pub mod styling;

#[cfg(test)]
pub mod test_utils;

// Re-export provider traits and implementations for easy access
pub use live::LiveDisplayProvider;
pub use mock::{DisplayCall, MockDisplayProvider};
pub use providers::{DisplayProvider, ProgressProvider, ProgressTracker, StatusProvider};

// Global display manager - initialized once with the resolved color choice
static GLOBAL_DISPLAY: OnceLock<Display> = OnceLock::new();

/// Main display manager that coordinates all user-facing communication
pub struct Display {
    styling: styling::StyleManager,
}

impl Display {
    /// Initialize the global display; later calls return the first instance
    pub fn init(color: bool) -> &'static Self {
        GLOBAL_DISPLAY.get_or_init(|| Display {
            styling: styling::StyleManager::new(color),
        })
    }

    /// Get global display reference, initializing from the terminal if needed
    pub fn global() -> &'static Self {
        Self::init(crate::primitives::ColorIntent::Auto.resolve())
    }

    /// Status updates with semantic intent
    pub fn status() -> status::StatusDisplay<'static> {
        status::StatusDisplay::new(&Self::global().styling)
    }

    /// Get style manager for advanced styling
    pub fn styling() -> &'static styling::StyleManager {
        &Self::global().styling
    }
}
