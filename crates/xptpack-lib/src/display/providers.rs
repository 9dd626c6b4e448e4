//! Display seams for command handlers
//!
//! Handlers talk to the terminal only through these traits, so export and
//! clean runs can be asserted against a recording mock.

/// Everything a command may show the user
pub trait DisplayProvider {
    fn status(&self) -> Box<dyn StatusProvider>;

    fn progress(&self) -> Box<dyn ProgressProvider>;
}

/// Semantic status lines
pub trait StatusProvider {
    /// `→ Checking <task>...`
    fn checking(&self, task: &str);

    /// `✓ item: details`, details omitted when empty
    fn success(&self, item: &str, details: &str);

    /// `✗ item: details`, details omitted when empty
    fn error(&self, item: &str, details: &str);

    fn warning(&self, message: &str);

    fn info(&self, message: &str);

    /// Unstyled line, also used for machine-readable reports
    fn message(&self, text: &str);

    fn subtle(&self, text: &str);

    fn list(&self, items: &[&str]);

    fn complete(&self, task: &str);

    /// Packaging tool lookup result; `location` is ignored when unavailable
    fn tool_check(&self, tool: &str, available: bool, location: &str);

    fn section(&self, title: &str);
}

/// Progress for work of unknown length
pub trait ProgressProvider {
    fn spinner(&self, message: &str) -> Box<dyn ProgressTracker>;
}

/// A running spinner. Exactly one of the two methods ends it.
pub trait ProgressTracker {
    /// Leave the spinner line on screen with a failure message
    fn abandon(&self, message: &str);

    /// Remove the spinner line
    fn finish_clear(&self);
}
