//! Status display for user feedback
//!
//! Semantic status lines in place of raw println! calls.

use super::styling::StyleManager;
use std::io::{self, Write};

/// Status display manager for semantic user feedback
pub struct StatusDisplay<'a> {
    styling: &'a StyleManager,
}

impl<'a> StatusDisplay<'a> {
    pub(crate) fn new(styling: &'a StyleManager) -> Self {
        Self { styling }
    }

    /// Display a working/checking status
    ///
    /// Example: `Display::status().checking("packaging tool")`
    /// Output: `→ Checking packaging tool...`
    pub fn checking(&self, task: &str) {
        let message = format!("Checking {}...", task);
        println!("{}", self.styling.format_working(&message));
        io::stdout().flush().unwrap_or(());
    }

    /// Display a success status with optional details
    ///
    /// Example: `Display::status().success("mdtool", "/usr/bin/mdtool")`
    /// Output: `✓ mdtool: /usr/bin/mdtool`
    pub fn success(&self, item: &str, details: &str) {
        println!("{}", self.styling.format_success(&join(item, details)));
    }

    /// Display an error status with details
    pub fn error(&self, item: &str, details: &str) {
        println!("{}", self.styling.format_error(&join(item, details)));
    }

    pub fn warning(&self, message: &str) {
        println!("{}", self.styling.format_warning(message));
    }

    pub fn info(&self, message: &str) {
        println!("{}", self.styling.format_info(message));
    }

    /// Display a simple message without status symbols
    pub fn message(&self, text: &str) {
        println!("{}", text);
    }

    pub fn subtle(&self, text: &str) {
        println!("{}", self.styling.style_subtle(text));
    }

    /// Display a list of items with bullets
    pub fn list(&self, items: &[&str]) {
        for item in items {
            println!("  {} {}", self.styling.bullet(), item);
        }
    }

    pub fn complete(&self, task: &str) {
        println!("{}", self.styling.format_success(task));
    }

    /// Check and report tool availability
    ///
    /// Example: `Display::status().tool_check("mdtool", true, "/usr/bin/mdtool")`
    pub fn tool_check(&self, tool: &str, available: bool, location: &str) {
        if available {
            self.success(tool, location);
        } else {
            self.error(tool, "not found");
        }
    }

    /// Display a header for a section of work
    pub fn section(&self, title: &str) {
        println!();
        println!("{}", self.styling.style_emphasis(title));
    }
}

fn join(item: &str, details: &str) -> String {
    if details.is_empty() {
        item.to_string()
    } else {
        format!("{}: {}", item, details)
    }
}

#[cfg(test)]
mod tests {
    include!("status.test.rs");
}
