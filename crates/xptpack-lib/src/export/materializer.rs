//! Staging tree materialization

use super::classifier::PathClassifier;
use super::manifest::ExportedFile;
use super::packages::{PackageError, read_package_list};
use super::project::{Project, SourceFile};
use super::settings::ExportSettings;
use crate::primitives::{ExclusionReason, ExportDecision, FileKind, OverwritePolicy};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Materialization errors
#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("Failed to {action} {}: {source}", .path.display())]
    FileOperation {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Package manifest error: {source}")]
    Package {
        #[from]
        source: PackageError,
    },

    #[error("Destination already exists: {}", .path.display())]
    DestinationExists { path: PathBuf },

    #[error("Project name is empty, nothing to replace with the namespace token")]
    EmptyProjectName,
}

fn io_error(action: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> MaterializeError {
    let path = path.to_path_buf();
    move |source| MaterializeError::FileOperation {
        action,
        path,
        source,
    }
}

/// Result of one materialization pass
#[derive(Debug, Clone)]
pub struct MaterializedTemplate {
    pub staging_dir: PathBuf,
    /// Files written to the staging tree, in project order
    pub exported: Vec<ExportedFile>,
    /// Files left out, with the reason
    pub excluded: Vec<(String, ExclusionReason)>,
    /// Package-list fragment, if the project carries a package manifest
    pub packages: Option<String>,
}

pub struct TemplateMaterializer<'a> {
    settings: &'a ExportSettings,
}

impl<'a> TemplateMaterializer<'a> {
    pub fn new(settings: &'a ExportSettings) -> Self {
        Self { settings }
    }

    pub fn staging_dir(&self, project: &Project) -> PathBuf {
        project.root.join(&self.settings.staging_dir)
    }

    /// Delete the staging directory if present and create it empty
    pub fn recreate_staging(&self, project: &Project) -> Result<PathBuf, MaterializeError> {
        let staging = self.staging_dir(project);
        if staging.exists() {
            std::fs::remove_dir_all(&staging).map_err(io_error("remove", &staging))?;
        }
        std::fs::create_dir_all(&staging).map_err(io_error("create", &staging))?;
        Ok(staging)
    }

    /// Mirror the project's included files into a fresh staging tree.
    ///
    /// Aborts on the first error and leaves the partial tree in place.
    pub fn materialize(&self, project: &Project) -> Result<MaterializedTemplate, MaterializeError> {
        if project.name.is_empty() {
            return Err(MaterializeError::EmptyProjectName);
        }

        let staging_dir = self.recreate_staging(project)?;
        let classifier = PathClassifier::new(self.settings);
        let mut template = MaterializedTemplate {
            staging_dir,
            exported: Vec::new(),
            excluded: Vec::new(),
            packages: None,
        };

        for (index, file) in project.files.iter().enumerate() {
            let kind = match classifier.classify(file) {
                ExportDecision::Excluded(reason) => {
                    tracing::debug!(index, file = %file.virtual_path, %reason, "Skipping file");
                    template.excluded.push((file.virtual_path.clone(), reason));
                    continue;
                }
                ExportDecision::PackageManifest => {
                    let packages = read_package_list(&file.path)?;
                    if template.packages.is_some() {
                        tracing::warn!(
                            file = %file.virtual_path,
                            "Multiple package manifests found, using the last one"
                        );
                    }
                    tracing::debug!(index, file = %file.virtual_path, "Extracted package list");
                    template.packages = Some(packages);
                    continue;
                }
                ExportDecision::IncludedRaw => FileKind::Raw,
                ExportDecision::IncludedRewritten => FileKind::Rewritten,
            };

            let destination = self.destination(project, &template.staging_dir, file);
            if let Some(parent) = destination.parent() {
                std::fs::create_dir_all(parent).map_err(io_error("create", parent))?;
            }

            match kind {
                FileKind::Raw => {
                    std::fs::copy(&file.path, &destination).map_err(io_error("copy", &file.path))?;
                }
                FileKind::Rewritten => self.write_rewritten(project, file, &destination)?,
            }

            tracing::debug!(index, file = %file.virtual_path, ?kind, "Exported file");
            template
                .exported
                .push(ExportedFile::new(file.virtual_path.clone(), kind));
        }

        tracing::info!(
            exported = template.exported.len(),
            excluded = template.excluded.len(),
            staging = %template.staging_dir.display(),
            "Materialized template"
        );
        Ok(template)
    }

    /// Map the file's directory under the project root onto the staging root,
    /// falling back to its virtual directory for files outside the root
    fn destination(&self, project: &Project, staging: &Path, file: &SourceFile) -> PathBuf {
        let relative_dir = file
            .path
            .parent()
            .and_then(|dir| dir.strip_prefix(&project.root).ok())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(file.virtual_dir()));

        staging.join(relative_dir).join(file.name())
    }

    fn write_rewritten(
        &self,
        project: &Project,
        file: &SourceFile,
        destination: &Path,
    ) -> Result<(), MaterializeError> {
        if self.settings.overwrite == OverwritePolicy::Fail && destination.exists() {
            return Err(MaterializeError::DestinationExists {
                path: destination.to_path_buf(),
            });
        }

        let content = std::fs::read(&file.path).map_err(io_error("read", &file.path))?;
        let rewritten = replace_bytes(
            &content,
            project.name.as_bytes(),
            self.settings.namespace_token.as_bytes(),
        );
        std::fs::write(destination, rewritten).map_err(io_error("write", destination))
    }
}

/// Replace every non-overlapping occurrence of `needle`, scanning left to right
pub fn replace_bytes(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return haystack.to_vec();
    }

    let mut out = Vec::with_capacity(haystack.len());
    let mut i = 0;
    while i < haystack.len() {
        if haystack[i..].starts_with(needle) {
            out.extend_from_slice(replacement);
            i += needle.len();
        } else {
            out.push(haystack[i]);
            i += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    include!("materializer.test.rs");
}
