//! Application configuration management
//!
//! Handles config loading, validation, and environment variable processing
//! following the precedence: defaults -> .env -> env vars -> CLI args.

use crate::export::{DEFAULT_PACKAGER, PackagerOptions};
use crate::primitives::*;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default configuration values
pub mod defaults {
    pub const LOG_LEVEL: &str = "1"; // Errors and warnings by default
    pub const LOG_FORMAT: &str = "text";
    pub const LOG_OUTPUT: &str = "stderr";
    pub const COLOR_INTENT: &str = "auto";
    pub const PACKAGER: &str = crate::export::DEFAULT_PACKAGER;
}

/// Default value functions for configuration fields
mod default_fns {
    use super::*;

    pub fn log_level() -> u8 {
        1
    }

    pub fn log_format() -> LogFormat {
        LogFormat::Text
    }

    pub fn log_output() -> LogOutput {
        LogOutput::Stderr
    }

    pub fn color() -> ColorIntent {
        ColorIntent::Auto
    }

    pub fn packager() -> String {
        DEFAULT_PACKAGER.to_string()
    }
}

/// Application configuration structure
#[derive(Debug, Clone, Parser, Deserialize)]
pub struct AppConfig {
    /// Project directory to operate on
    #[arg(short, long, env = "XPTPACK_WORKDIR")]
    #[serde(default)]
    pub workdir: Option<PathBuf>,

    /// Packaging tool executable
    #[arg(long, env = "XPTPACK_PACKAGER", default_value = defaults::PACKAGER)]
    #[serde(default = "default_fns::packager")]
    pub packager: String,

    /// Kill the packaging tool after this many seconds
    #[arg(long, env = "XPTPACK_PACKAGER_TIMEOUT")]
    #[serde(default)]
    pub packager_timeout: Option<u64>,

    /// Run the packaging tool without -v
    #[arg(long, env = "XPTPACK_PACKAGER_QUIET")]
    #[serde(default)]
    pub packager_quiet: bool,

    /// Verbosity level (0=error, 1=warn, 2=info, 3=debug, 4=trace)
    #[arg(long, env = "XPTPACK_LOG_LEVEL", default_value = defaults::LOG_LEVEL)]
    #[serde(default = "default_fns::log_level")]
    pub log_level: u8,

    /// Log format (text, json, pretty)
    #[arg(long, env = "XPTPACK_LOG_FORMAT", default_value = defaults::LOG_FORMAT)]
    #[serde(default = "default_fns::log_format")]
    pub log_format: LogFormat,

    /// Log output stream (stderr, stdout)
    #[arg(long, env = "XPTPACK_LOG_OUTPUT", default_value = defaults::LOG_OUTPUT)]
    #[serde(default = "default_fns::log_output")]
    pub log_output: LogOutput,

    /// Color output control (auto, always, never)
    #[arg(short, long, env = "XPTPACK_COLOR", default_value = defaults::COLOR_INTENT)]
    #[serde(default = "default_fns::color")]
    pub color: ColorIntent,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workdir: None,
            packager: default_fns::packager(),
            packager_timeout: None,
            packager_quiet: false,
            log_level: default_fns::log_level(),
            log_format: default_fns::log_format(),
            log_output: default_fns::log_output(),
            color: default_fns::color(),
        }
    }
}

impl AppConfig {
    /// Create LoggerConfig, resolving the color intent against the terminal
    pub fn to_logger_config(&self) -> LoggerConfig {
        LoggerConfig {
            level: LogLevel::from_verbosity(self.log_level),
            format: self.log_format,
            output: self.log_output,
            color: self.color.resolve(),
        }
    }

    /// Packaging tool invocation derived from the config
    pub fn packager_options(&self) -> PackagerOptions {
        PackagerOptions {
            program: self.packager.clone(),
            verbose: !self.packager_quiet,
            timeout: self.packager_timeout.map(Duration::from_secs),
        }
    }

    /// Merge this config with another, taking non-default values from other
    pub fn merge_with(mut self, other: Self) -> Self {
        // For Option fields, take other if it's Some
        if other.workdir.is_some() {
            self.workdir = other.workdir;
        }
        if other.packager_timeout.is_some() {
            self.packager_timeout = other.packager_timeout;
        }

        // For primitive fields, take other if it's not the default
        if other.packager != default_fns::packager() {
            self.packager = other.packager;
        }
        if other.packager_quiet {
            self.packager_quiet = true;
        }
        if other.log_level != default_fns::log_level() {
            self.log_level = other.log_level;
        }

        // For enums, detect if it's non-default
        if !matches!(other.log_format, LogFormat::Text) {
            self.log_format = other.log_format;
        }
        if !matches!(other.log_output, LogOutput::Stderr) {
            self.log_output = other.log_output;
        }
        if !matches!(other.color, ColorIntent::Auto) {
            self.color = other.color;
        }

        self
    }

    /// Validate the final configuration
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        let workdir = match self.workdir.take() {
            Some(workdir) => workdir,
            None => std::env::current_dir()?,
        };
        if !workdir.is_dir() {
            return Err(ConfigError::InvalidWorkDir {
                path: workdir.display().to_string(),
            });
        }
        self.workdir = Some(workdir);

        if self.packager.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                reason: "packager must not be empty".to_string(),
            });
        }
        if self.packager_timeout == Some(0) {
            return Err(ConfigError::ValidationFailed {
                reason: "packager timeout must be at least one second".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("config.test.rs");
}
