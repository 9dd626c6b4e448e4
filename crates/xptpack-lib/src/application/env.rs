//! Standard environment variables
//!
//! Color conventions shared with other command-line tools. These sit below
//! `XPTPACK_*` variables and CLI flags in precedence.

use crate::primitives::{ColorIntent, ConfigError};
use serde::Deserialize;

/// Environment variables that affect output
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EnvironmentConfig {
    /// NO_COLOR (any non-empty value disables color)
    pub no_color: Option<String>,
    /// FORCE_COLOR (0/false disables, 1/2/3/true enables)
    pub force_color: Option<String>,
    /// CLICOLOR (0 disables color)
    pub clicolor: Option<String>,
    /// CI (any value means plain output)
    pub ci: Option<String>,
}

impl EnvironmentConfig {
    /// Load from the current process environment
    pub fn load() -> Result<Self, ConfigError> {
        envy::from_env().map_err(|e| ConfigError::EnvironmentParsingFailed { source: e })
    }

    /// Color intent the environment asks for, if any.
    ///
    /// CI wins outright; otherwise FORCE_COLOR beats NO_COLOR beats CLICOLOR.
    pub fn color_override(&self) -> Option<ColorIntent> {
        if self.ci.is_some() {
            return Some(ColorIntent::Never);
        }

        let forced = self
            .force_color
            .as_deref()
            .and_then(|value| match value {
                "0" | "false" => Some(ColorIntent::Never),
                "1" | "2" | "3" | "true" => Some(ColorIntent::Always),
                _ => None,
            });
        if forced.is_some() {
            return forced;
        }

        if self.no_color.as_deref().is_some_and(|value| !value.is_empty()) {
            return Some(ColorIntent::Never);
        }
        if self.clicolor.as_deref() == Some("0") {
            return Some(ColorIntent::Never);
        }

        None
    }

    /// Apply the environment's color intent over `color`
    pub fn apply_color_config(&self, color: ColorIntent) -> ColorIntent {
        self.color_override().unwrap_or(color)
    }
}

#[cfg(test)]
mod tests {
    include!("env.test.rs");
}
