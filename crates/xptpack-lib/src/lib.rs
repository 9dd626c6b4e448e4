//! # xptpack Library
//!
//! Exports a project as a placeholder-parameterized IDE project template and
//! drives the external packaging tool that turns it into an installable addin.
//!
//! ## Core Modules
//!
//! - [`primitives`] - Foundation types, errors, and shared coordination
//! - [`logger`] - Structured logging with progress-aware output
//! - [`display`] - User-facing status and progress
//! - [`export`] - Classification, materialization, descriptors, and packaging
//! - [`application`] - CLI interface, configuration, sessions, and commands
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! xptpack_lib::main().await
//! # }
//! ```

pub mod application;
pub mod display;
pub mod export;
pub mod logger;
pub mod primitives;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export commonly used types for convenience
pub use application::{AppConfig, Cli, Commands, execute_command};
pub use export::{ExportOutcome, ExportPipeline, ExportReport, ExportSettings, Project};
pub use logger::Logger;
pub use primitives::{ColorIntent, ConfigError, LogFormat, LogLevel, LogOutput, LoggerError};

pub use anyhow::Result;

use application::CliConfig;

pub async fn main() -> Result<()> {
    // Load CLI configuration
    let config = CliConfig::load()?;

    // Execute the command
    execute_command(config).await
}
