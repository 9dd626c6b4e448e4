//! Project model consumed by the export pipeline
//!
//! A [`Project`] is a name, a root directory and an ordered list of
//! [`SourceFile`]s. Hosts that already track project files build it with
//! [`Project::from_files`]; the CLI scans a directory with
//! [`DirectoryProject::scan`].

use super::settings::{ExportSettings, SETTINGS_FILE};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Project model errors
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Cannot derive a project root from an empty file list")]
    NoRoot,

    #[error("Cannot derive a project name from {}", .root.display())]
    Unnamed { root: PathBuf },

    #[error("Project root is not a directory: {}", .root.display())]
    NotADirectory { root: PathBuf },
}

/// One file of the source project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute path on disk
    pub path: PathBuf,
    /// Project-relative path using `/` separators
    pub virtual_path: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, virtual_path: &str) -> Self {
        let virtual_path = virtual_path.replace('\\', "/");
        Self {
            path: path.into(),
            virtual_path: virtual_path.trim_start_matches('/').to_string(),
        }
    }

    /// File name, taken from the virtual path
    pub fn name(&self) -> &str {
        self.virtual_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.virtual_path)
    }

    /// Virtual directory, empty for files at the project root
    pub fn virtual_dir(&self) -> &str {
        match self.virtual_path.rfind('/') {
            Some(idx) => &self.virtual_path[..idx],
            None => "",
        }
    }

    /// Extension without the leading dot
    pub fn extension(&self) -> Option<&str> {
        Path::new(self.name())
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
    }
}

/// The project handed to the pipeline
#[derive(Debug, Clone)]
pub struct Project {
    pub name: String,
    pub root: PathBuf,
    pub files: Vec<SourceFile>,
}

impl Project {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>, files: Vec<SourceFile>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            files,
        }
    }

    /// Build a project whose root is the parent of its first file
    pub fn from_files(name: impl Into<String>, files: Vec<SourceFile>) -> Result<Self, ProjectError> {
        let root = files
            .first()
            .and_then(|file| file.path.parent())
            .map(Path::to_path_buf)
            .ok_or(ProjectError::NoRoot)?;

        Ok(Self::new(name, root, files))
    }
}

/// Directory walker standing in for a host project model
pub struct DirectoryProject;

impl DirectoryProject {
    /// Scan `root` into a project.
    ///
    /// Order is deterministic: within a directory, files sorted by name come
    /// first, then subdirectories sorted by name. Hidden entries, ignored
    /// directories and extensions, and the settings file are skipped.
    pub fn scan(
        root: &Path,
        name: Option<String>,
        settings: &ExportSettings,
    ) -> Result<Project, ProjectError> {
        if !root.is_dir() {
            return Err(ProjectError::NotADirectory {
                root: root.to_path_buf(),
            });
        }

        let name = match name {
            Some(name) => name,
            None => root
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
                .ok_or_else(|| ProjectError::Unnamed {
                    root: root.to_path_buf(),
                })?,
        };

        let mut files = Vec::new();
        Self::walk(root, "", settings, &mut files)?;

        tracing::debug!(project = %name, files = files.len(), "Scanned project directory");
        Ok(Project::new(name, root, files))
    }

    fn walk(
        dir: &Path,
        prefix: &str,
        settings: &ExportSettings,
        files: &mut Vec<SourceFile>,
    ) -> Result<(), ProjectError> {
        let mut entries = std::fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|entry| entry.file_name());

        let mut subdirs = Vec::new();
        for entry in entries {
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                tracing::warn!(path = %entry.path().display(), "Skipping non UTF-8 path");
                continue;
            };
            if file_name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            let file_type = entry.file_type()?;
            let virtual_path = if prefix.is_empty() {
                file_name.to_string()
            } else {
                format!("{}/{}", prefix, file_name)
            };

            if file_type.is_dir() {
                let ignored = settings
                    .ignore_dirs
                    .iter()
                    .any(|ignored| ignored.eq_ignore_ascii_case(file_name));
                if !ignored {
                    subdirs.push((path, virtual_path));
                }
            } else if file_type.is_file() || path.is_file() {
                if prefix.is_empty() && file_name == SETTINGS_FILE {
                    continue;
                }
                let source = SourceFile::new(path, &virtual_path);
                let ignored = source.extension().is_some_and(|ext| {
                    settings
                        .ignore_extensions
                        .iter()
                        .any(|ignored| ignored.eq_ignore_ascii_case(ext))
                });
                if !ignored {
                    files.push(source);
                }
            }
        }

        for (path, virtual_path) in subdirs {
            Self::walk(&path, &virtual_path, settings, files)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("project.test.rs");
}
