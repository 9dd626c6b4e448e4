//! Terminal-backed display provider
//!
//! Status lines go through the global [`Display`]; spinners are drawn on a
//! session-owned indicatif `MultiProgress` so log lines from
//! `tracing-indicatif` never tear them.

use super::Display;
use super::providers::*;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::time::Duration;

/// Display provider owned by one command session
pub struct LiveDisplayProvider {
    multi_progress: Arc<MultiProgress>,
}

impl Default for LiveDisplayProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveDisplayProvider {
    pub fn new() -> Self {
        Self {
            multi_progress: Arc::new(MultiProgress::new()),
        }
    }

    pub fn new_with_multi_progress(multi_progress: &MultiProgress) -> Self {
        Self {
            multi_progress: Arc::new(multi_progress.clone()),
        }
    }
}

impl DisplayProvider for LiveDisplayProvider {
    fn status(&self) -> Box<dyn StatusProvider> {
        Box::new(LiveStatusProvider)
    }

    fn progress(&self) -> Box<dyn ProgressProvider> {
        Box::new(LiveProgressProvider {
            parent: self.multi_progress.clone(),
        })
    }
}

struct LiveStatusProvider;

impl StatusProvider for LiveStatusProvider {
    fn checking(&self, task: &str) {
        Display::status().checking(task);
    }

    fn success(&self, item: &str, details: &str) {
        Display::status().success(item, details);
    }

    fn error(&self, item: &str, details: &str) {
        Display::status().error(item, details);
    }

    fn warning(&self, message: &str) {
        Display::status().warning(message);
    }

    fn info(&self, message: &str) {
        Display::status().info(message);
    }

    fn message(&self, text: &str) {
        Display::status().message(text);
    }

    fn subtle(&self, text: &str) {
        Display::status().subtle(text);
    }

    fn list(&self, items: &[&str]) {
        Display::status().list(items);
    }

    fn complete(&self, task: &str) {
        Display::status().complete(task);
    }

    fn tool_check(&self, tool: &str, available: bool, location: &str) {
        Display::status().tool_check(tool, available, location);
    }

    fn section(&self, title: &str) {
        Display::status().section(title);
    }
}

struct LiveProgressProvider {
    parent: Arc<MultiProgress>,
}

impl ProgressProvider for LiveProgressProvider {
    fn spinner(&self, message: &str) -> Box<dyn ProgressTracker> {
        let progress_bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            progress_bar.set_style(style);
        }
        progress_bar.set_message(message.to_string());
        progress_bar.enable_steady_tick(Duration::from_millis(100));
        let bar = self.parent.add(progress_bar);
        Box::new(SpinnerTracker { bar })
    }
}

struct SpinnerTracker {
    bar: ProgressBar,
}

impl ProgressTracker for SpinnerTracker {
    fn abandon(&self, message: &str) {
        self.bar.set_style(ProgressStyle::default_spinner().tick_chars("✗✗"));
        self.bar.abandon_with_message(message.to_string());
    }

    fn finish_clear(&self) {
        self.bar.finish_and_clear();
    }
}
