//! Export coordination
//!
//! [`ExportPipeline::run`] never fails: every error is folded into the
//! returned [`ExportReport`] together with the step that raised it, and the
//! run stops at the first error.

use super::descriptors::{DescriptorError, DescriptorWriter, Fragments, artifact_prefix};
use super::guard::{GuardError, RunGuard};
use super::manifest::{ManifestError, render_file_tree, render_runtime};
use super::materializer::{MaterializeError, TemplateMaterializer};
use super::packager::{PackageRequest, PackagerError, PackagerOptions, PackagingOrchestrator};
use super::project::Project;
use super::settings::ExportSettings;
use super::version::{VersionError, resolve_version};
use crate::application::session::ProcessProvider;
use crate::primitives::ExportStep;
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Any error that aborts an export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Guard(#[from] GuardError),

    #[error(transparent)]
    Materialize(#[from] MaterializeError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error(transparent)]
    Packager(#[from] PackagerError),
}

impl ExportError {
    /// Pipeline step the error belongs to
    pub fn step(&self) -> ExportStep {
        match self {
            ExportError::Guard(_) => ExportStep::Prepare,
            ExportError::Materialize(_) => ExportStep::Materialize,
            ExportError::Manifest(_) | ExportError::Descriptor(_) => ExportStep::Descriptors,
            ExportError::Version(_) => ExportStep::ResolveVersion,
            ExportError::Packager(_) => ExportStep::Package,
        }
    }
}

/// Outcome of one export run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExportOutcome {
    Succeeded {
        /// Relocated artifact, absent when packaging was skipped
        artifact: Option<PathBuf>,
        version: String,
        staging_dir: PathBuf,
        files_exported: usize,
        files_excluded: usize,
    },
    Failed {
        step: ExportStep,
        reason: String,
    },
    /// The project has no files; nothing was touched
    NoFiles,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportReport {
    pub project: String,
    pub root: PathBuf,
    #[serde(flatten)]
    pub outcome: ExportOutcome,
}

impl ExportReport {
    /// Whether the run ended without error (an empty project counts)
    pub fn is_success(&self) -> bool {
        !matches!(self.outcome, ExportOutcome::Failed { .. })
    }
}

pub struct ExportPipeline<'a> {
    process: &'a dyn ProcessProvider,
    settings: &'a ExportSettings,
    packager: &'a PackagerOptions,
    skip_package: bool,
}

impl<'a> ExportPipeline<'a> {
    pub fn new(
        process: &'a dyn ProcessProvider,
        settings: &'a ExportSettings,
        packager: &'a PackagerOptions,
    ) -> Self {
        Self {
            process,
            settings,
            packager,
            skip_package: false,
        }
    }

    /// Stop once the final descriptors are written
    pub fn with_skip_package(mut self, skip_package: bool) -> Self {
        self.skip_package = skip_package;
        self
    }

    pub fn run(&self, project: &Project) -> ExportReport {
        let outcome = if project.files.is_empty() {
            tracing::info!(project = %project.name, "Project has no files, nothing to export");
            ExportOutcome::NoFiles
        } else {
            match self.try_run(project) {
                Ok(outcome) => outcome,
                Err(e) => {
                    let step = e.step();
                    tracing::error!(project = %project.name, %step, error = %e, "Export failed");
                    ExportOutcome::Failed {
                        step,
                        reason: e.to_string(),
                    }
                }
            }
        };

        ExportReport {
            project: project.name.clone(),
            root: project.root.clone(),
            outcome,
        }
    }

    fn try_run(&self, project: &Project) -> Result<ExportOutcome, ExportError> {
        let _guard = RunGuard::acquire(&project.root)?;
        let settings = self.settings;

        let materialized = TemplateMaterializer::new(settings).materialize(project)?;

        let fragments = Fragments {
            runtime: render_runtime(&settings.template_descriptor, &materialized.exported)?,
            files: render_file_tree(&materialized.exported, settings.directory_layout)?,
            packages: materialized.packages.clone().unwrap_or_default(),
        };

        let writer = DescriptorWriter::new(project, settings);
        let sources = writer.prepare()?;
        let version = resolve_version(&sources.addin)?;
        let written = writer.write_final(&sources, &fragments, &version, &materialized.staging_dir)?;

        let artifact = if self.skip_package {
            tracing::info!("Skipping packaging");
            None
        } else {
            let prefix = match &settings.artifact_prefix {
                Some(prefix) => prefix.clone(),
                None => artifact_prefix(&written.addin_name, &sources.addin)?,
            };
            let request = PackageRequest {
                staging_dir: &materialized.staging_dir,
                addin_name: &written.addin_name,
                artifact_prefix: &prefix,
                version: &version,
                destination_dir: &project.root,
            };
            Some(PackagingOrchestrator::new(self.process, self.packager).package(&request)?)
        };

        Ok(ExportOutcome::Succeeded {
            artifact,
            version,
            staging_dir: materialized.staging_dir,
            files_exported: materialized.exported.len(),
            files_excluded: materialized.excluded.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    include!("pipeline.test.rs");
}
