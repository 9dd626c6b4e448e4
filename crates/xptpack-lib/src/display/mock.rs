//! Recording display provider
//!
//! Every status line and spinner transition lands in a shared call log that
//! command tests assert against.

use super::providers::*;
use std::sync::{Arc, Mutex};

type CallLog = Arc<Mutex<Vec<DisplayCall>>>;

fn record(calls: &CallLog, call: DisplayCall) {
    calls
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .push(call);
}

/// Mock implementation of DisplayProvider that records all calls
#[derive(Clone, Default)]
pub struct MockDisplayProvider {
    calls: CallLog,
}

impl MockDisplayProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded display calls for testing assertions
    pub fn get_calls(&self) -> Vec<DisplayCall> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Check if a specific call was made
    pub fn has_call(&self, expected: &DisplayCall) -> bool {
        self.get_calls().contains(expected)
    }

    /// Get count of calls of a specific type
    pub fn count_calls(&self, call_type: &str) -> usize {
        self.get_calls()
            .iter()
            .filter(|call| call.call_type() == call_type)
            .count()
    }
}

impl DisplayProvider for MockDisplayProvider {
    fn status(&self) -> Box<dyn StatusProvider> {
        Box::new(MockStatusProvider {
            calls: self.calls.clone(),
        })
    }

    fn progress(&self) -> Box<dyn ProgressProvider> {
        Box::new(MockProgressProvider {
            calls: self.calls.clone(),
        })
    }
}

/// Recorded display call for testing
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    // Status calls
    StatusChecking { task: String },
    StatusSuccess { item: String, details: String },
    StatusError { item: String, details: String },
    StatusWarning { message: String },
    StatusInfo { message: String },
    StatusMessage { text: String },
    StatusSubtle { text: String },
    StatusList { items: Vec<String> },
    StatusComplete { task: String },
    StatusToolCheck { tool: String, available: bool, location: String },
    StatusSection { title: String },

    // Progress calls
    ProgressSpinner { message: String },
    ProgressAbandon { message: String },
    ProgressClear,
}

impl DisplayCall {
    pub fn call_type(&self) -> &'static str {
        match self {
            DisplayCall::StatusChecking { .. } => "status_checking",
            DisplayCall::StatusSuccess { .. } => "status_success",
            DisplayCall::StatusError { .. } => "status_error",
            DisplayCall::StatusWarning { .. } => "status_warning",
            DisplayCall::StatusInfo { .. } => "status_info",
            DisplayCall::StatusMessage { .. } => "status_message",
            DisplayCall::StatusSubtle { .. } => "status_subtle",
            DisplayCall::StatusList { .. } => "status_list",
            DisplayCall::StatusComplete { .. } => "status_complete",
            DisplayCall::StatusToolCheck { .. } => "status_tool_check",
            DisplayCall::StatusSection { .. } => "status_section",
            DisplayCall::ProgressSpinner { .. } => "progress_spinner",
            DisplayCall::ProgressAbandon { .. } => "progress_abandon",
            DisplayCall::ProgressClear => "progress_clear",
        }
    }
}

struct MockStatusProvider {
    calls: CallLog,
}

impl StatusProvider for MockStatusProvider {
    fn checking(&self, task: &str) {
        record(&self.calls, DisplayCall::StatusChecking { task: task.to_string() });
    }

    fn success(&self, item: &str, details: &str) {
        record(
            &self.calls,
            DisplayCall::StatusSuccess {
                item: item.to_string(),
                details: details.to_string(),
            },
        );
    }

    fn error(&self, item: &str, details: &str) {
        record(
            &self.calls,
            DisplayCall::StatusError {
                item: item.to_string(),
                details: details.to_string(),
            },
        );
    }

    fn warning(&self, message: &str) {
        record(&self.calls, DisplayCall::StatusWarning { message: message.to_string() });
    }

    fn info(&self, message: &str) {
        record(&self.calls, DisplayCall::StatusInfo { message: message.to_string() });
    }

    fn message(&self, text: &str) {
        record(&self.calls, DisplayCall::StatusMessage { text: text.to_string() });
    }

    fn subtle(&self, text: &str) {
        record(&self.calls, DisplayCall::StatusSubtle { text: text.to_string() });
    }

    fn list(&self, items: &[&str]) {
        record(
            &self.calls,
            DisplayCall::StatusList {
                items: items.iter().map(|s| s.to_string()).collect(),
            },
        );
    }

    fn complete(&self, task: &str) {
        record(&self.calls, DisplayCall::StatusComplete { task: task.to_string() });
    }

    fn tool_check(&self, tool: &str, available: bool, location: &str) {
        record(
            &self.calls,
            DisplayCall::StatusToolCheck {
                tool: tool.to_string(),
                available,
                location: location.to_string(),
            },
        );
    }

    fn section(&self, title: &str) {
        record(&self.calls, DisplayCall::StatusSection { title: title.to_string() });
    }
}

struct MockProgressProvider {
    calls: CallLog,
}

impl ProgressProvider for MockProgressProvider {
    fn spinner(&self, message: &str) -> Box<dyn ProgressTracker> {
        record(&self.calls, DisplayCall::ProgressSpinner { message: message.to_string() });
        Box::new(MockProgressTracker {
            calls: self.calls.clone(),
        })
    }
}

struct MockProgressTracker {
    calls: CallLog,
}

impl ProgressTracker for MockProgressTracker {
    fn abandon(&self, message: &str) {
        record(&self.calls, DisplayCall::ProgressAbandon { message: message.to_string() });
    }

    fn finish_clear(&self) {
        record(&self.calls, DisplayCall::ProgressClear);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_status_calls() {
        let display = MockDisplayProvider::new();
        display.status().checking("packaging tool");
        display.status().tool_check("mdtool", false, "");

        assert!(display.has_call(&DisplayCall::StatusChecking {
            task: "packaging tool".to_string()
        }));
        assert_eq!(display.count_calls("status_tool_check"), 1);
    }

    #[test]
    fn test_mock_records_spinner_lifecycle() {
        let display = MockDisplayProvider::new();
        let spinner = display.progress().spinner("Exporting Demo");
        spinner.abandon("Export failed at package");

        let types: Vec<&str> = display.get_calls().iter().map(|c| c.call_type()).collect();
        assert_eq!(
            types,
            vec!["progress_spinner", "progress_abandon"]
        );
    }
}
