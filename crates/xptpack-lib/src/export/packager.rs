//! Packaging tool orchestration
//!
//! The packaging tool is a black box: it runs inside the staging directory,
//! is given the addin descriptor to pack, and is expected to leave
//! `<prefix>_<version>.mpack` next to it.

use crate::application::session::ProcessProvider;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Packaging tool shipped with Xamarin Studio on macOS
pub const DEFAULT_PACKAGER: &str = "/Applications/Xamarin Studio.app/Contents/MacOS/mdtool";

/// Extension of the packaged artifact
pub const ARTIFACT_EXTENSION: &str = "mpack";

#[derive(Debug, Error)]
pub enum PackagerError {
    #[error("Failed to launch packaging tool {program}: {reason}")]
    LaunchFailed { program: String, reason: String },

    #[error("Packaging tool exited with {}: {}", describe_exit(.code), .stderr.trim())]
    ExitFailure { code: Option<i32>, stderr: String },

    #[error("Packaging tool timed out after {timeout:?} and was killed")]
    TimedOut { timeout: Duration },

    #[error("Packaging tool reported success but {} was not produced", .path.display())]
    ArtifactMissing { path: PathBuf },

    #[error("Failed to move artifact to {}: {source}", .destination.display())]
    RelocateFailed {
        destination: PathBuf,
        source: std::io::Error,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// How the packaging tool is invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagerOptions {
    /// Program path or name looked up on PATH
    pub program: String,
    /// Pass `-v` to the tool
    pub verbose: bool,
    /// Kill the tool after this long
    pub timeout: Option<Duration>,
}

impl Default for PackagerOptions {
    fn default() -> Self {
        Self {
            program: DEFAULT_PACKAGER.to_string(),
            verbose: true,
            timeout: None,
        }
    }
}

impl PackagerOptions {
    /// Arguments for packing `addin_name`
    pub fn args<'a>(&self, addin_name: &'a str) -> Vec<&'a str> {
        let mut args = Vec::with_capacity(4);
        if self.verbose {
            args.push("-v");
        }
        args.extend(["setup", "pack", addin_name]);
        args
    }
}

/// `<prefix>_<version>.mpack`
pub fn artifact_name(prefix: &str, version: &str) -> String {
    format!("{}_{}.{}", prefix, version, ARTIFACT_EXTENSION)
}

/// Everything one packaging run needs
#[derive(Debug, Clone)]
pub struct PackageRequest<'a> {
    pub staging_dir: &'a Path,
    pub addin_name: &'a str,
    pub artifact_prefix: &'a str,
    pub version: &'a str,
    /// Directory the artifact is moved into (the project root)
    pub destination_dir: &'a Path,
}

pub struct PackagingOrchestrator<'a> {
    process: &'a dyn ProcessProvider,
    options: &'a PackagerOptions,
}

impl<'a> PackagingOrchestrator<'a> {
    pub fn new(process: &'a dyn ProcessProvider, options: &'a PackagerOptions) -> Self {
        Self { process, options }
    }

    /// Run the tool and relocate the artifact, returning its final path
    pub fn package(&self, request: &PackageRequest<'_>) -> Result<PathBuf, PackagerError> {
        let args = self.options.args(request.addin_name);
        tracing::info!(
            program = %self.options.program,
            args = %args.join(" "),
            cwd = %request.staging_dir.display(),
            "Running packaging tool"
        );

        let output = self
            .process
            .execute_with_timeout(
                &self.options.program,
                &args,
                request.staging_dir,
                self.options.timeout,
            )
            .map_err(|e| PackagerError::LaunchFailed {
                program: self.options.program.clone(),
                reason: format!("{:#}", e),
            })?;

        tracing::debug!(stdout = %output.stdout.trim_end(), "Packaging tool stdout");
        if !output.stderr.trim().is_empty() {
            tracing::debug!(stderr = %output.stderr.trim_end(), "Packaging tool stderr");
        }

        if output.timed_out {
            return Err(PackagerError::TimedOut {
                timeout: self.options.timeout.unwrap_or_default(),
            });
        }
        if !output.success {
            return Err(PackagerError::ExitFailure {
                code: output.exit_code,
                stderr: output.stderr,
            });
        }

        let name = artifact_name(request.artifact_prefix, request.version);
        let produced = request.staging_dir.join(&name);
        if !produced.is_file() {
            return Err(PackagerError::ArtifactMissing { path: produced });
        }

        let destination = request.destination_dir.join(&name);
        relocate(&produced, &destination).map_err(|source| PackagerError::RelocateFailed {
            destination: destination.clone(),
            source,
        })?;

        tracing::info!(artifact = %destination.display(), "Packaged template");
        Ok(destination)
    }
}

/// Replace `to` with `from`, copying when a rename is not possible
fn relocate(from: &Path, to: &Path) -> std::io::Result<()> {
    if to.exists() {
        std::fs::remove_file(to)?;
    }
    if std::fs::rename(from, to).is_err() {
        std::fs::copy(from, to)?;
        std::fs::remove_file(from)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    include!("packager.test.rs");
}
