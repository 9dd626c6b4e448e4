use crate::primitives::ConfigError;
use clap::{Parser, Subcommand};

use super::config::AppConfig;

/// xptpack CLI - export a project as an IDE project template
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "xptpack")]
#[command(about = "Export a project as a packaged IDE project template")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Global configuration options
    #[command(flatten)]
    pub config: AppConfig,

    /// xptpack commands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Configuration loaded from CLI
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub app_config: AppConfig,
    pub command: Option<Commands>,
}

impl CliConfig {
    /// Load `.env` files, parse the command line, then layer the config
    pub fn load() -> Result<Self, ConfigError> {
        AppConfig::load_env_files()?;
        let cli = Cli::parse();
        Self::from_cli(cli)
    }

    /// Layer an already parsed command line
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        Ok(Self {
            app_config: AppConfig::layered(cli.config)?,
            command: cli.command,
        })
    }
}

/// Available xptpack commands
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Check that the packaging tool is available
    Requirements,

    /// Show version information
    Version,

    /// Export the project in the working directory
    Export {
        /// Project name (defaults to the directory name)
        #[arg(short, long)]
        name: Option<String>,

        /// Stop after writing the descriptors
        #[arg(long, help = "Stop after writing the descriptors, without running the packaging tool")]
        skip_package: bool,

        /// Print the export report as JSON on stdout
        #[arg(long)]
        report_json: bool,
    },

    /// Remove the staging directory and packaged artifacts
    Clean,
}

impl Commands {
    /// Whether the command operates on a project directory
    pub fn requires_project(&self) -> bool {
        match self {
            Commands::Requirements | Commands::Version => false,
            Commands::Export { .. } | Commands::Clean => true,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("cli.test.rs");
}
