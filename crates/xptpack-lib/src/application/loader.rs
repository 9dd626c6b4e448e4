//! Configuration loading
//!
//! Coordinates loading configuration from the layered sources.

use crate::primitives::ConfigError;

use super::{config::AppConfig, env::EnvironmentConfig};

/// Environment files read from the current directory, first wins
pub const ENV_FILES: [&str; 2] = [".env.local", ".env"];

impl AppConfig {
    /// Load `.env.local` and `.env` into the process environment.
    ///
    /// Runs before argument parsing so `XPTPACK_*` values from these files
    /// reach clap's `env` fallbacks. Missing files are fine.
    pub fn load_env_files() -> Result<(), ConfigError> {
        for env_file in ENV_FILES {
            if let Err(e) = dotenvy::from_filename(env_file) {
                if !e.not_found() {
                    return Err(ConfigError::EnvFileError {
                        file: env_file.to_string(),
                        source: e,
                    });
                }
            }
        }
        Ok(())
    }

    /// Layer config: defaults -> standard env vars -> CLI (with `XPTPACK_*`)
    pub fn layered(cli: AppConfig) -> Result<Self, ConfigError> {
        // 1. Start with defaults
        let mut config = Self::default();

        // 2. Standard environment variables
        let env_config = EnvironmentConfig::load()?;
        config.color = env_config.apply_color_config(config.color);

        // 3. CLI arguments and XPTPACK_* variables (highest precedence)
        config = config.merge_with(cli);

        // 4. Post-process and validate
        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
