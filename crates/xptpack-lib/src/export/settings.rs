//! Per-project export settings
//!
//! Read from an optional `xptpack.yml` at the project root. Every field is
//! optional; an absent file means all defaults.

use crate::primitives::{DirectoryLayout, OverwritePolicy};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Settings file name, looked up at the project root
pub const SETTINGS_FILE: &str = "xptpack.yml";

/// Suffix identifying template descriptors
pub const TEMPLATE_DESCRIPTOR_SUFFIX: &str = ".xpt.xml";

/// Suffix identifying addin descriptors
pub const ADDIN_DESCRIPTOR_SUFFIX: &str = ".addin.xml";

/// Settings errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to parse {file}: {reason}")]
    ParseError { file: String, reason: String },

    #[error("Invalid setting '{field}': {reason}")]
    Invalid { field: String, reason: String },
}

/// Export policy for a single project
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportSettings {
    /// Staging directory name under the project root
    pub staging_dir: String,

    /// Template descriptor file name under the project root
    pub template_descriptor: String,

    /// Package-reference manifest file name (matched case-insensitively)
    pub package_manifest: String,

    /// Token substituted for the project name in rewritten files
    pub namespace_token: String,

    /// Extensions copied byte-for-byte, without the leading dot
    pub raw_extensions: Vec<String>,

    pub overwrite: OverwritePolicy,

    pub directory_layout: DirectoryLayout,

    /// Artifact name prefix; derived from the addin descriptor when unset
    pub artifact_prefix: Option<String>,

    /// Directory names skipped when scanning a project directory
    pub ignore_dirs: Vec<String>,

    /// File extensions skipped when scanning a project directory
    pub ignore_extensions: Vec<String>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            staging_dir: "ProjectTemplate".to_string(),
            template_descriptor: "ProjectTemplate.xpt.xml".to_string(),
            package_manifest: "packages.config".to_string(),
            namespace_token: "${Namespace}".to_string(),
            raw_extensions: vec!["png".to_string()],
            overwrite: OverwritePolicy::default(),
            directory_layout: DirectoryLayout::default(),
            artifact_prefix: None,
            ignore_dirs: vec!["obj".to_string()],
            ignore_extensions: vec!["mpack".to_string()],
        }
    }
}

impl ExportSettings {
    /// Load `xptpack.yml` from the project root, falling back to defaults
    pub fn load(project_root: &Path) -> Result<Self, SettingsError> {
        let path = project_root.join(SETTINGS_FILE);
        if !path.is_file() {
            tracing::debug!(root = %project_root.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let settings = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), "Loaded export settings");
        Ok(settings)
    }

    /// Parse and validate settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, SettingsError> {
        // An empty document means "no overrides"
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let settings: Self =
            serde_saphyr::from_str(content).map_err(|e| SettingsError::ParseError {
                file: SETTINGS_FILE.to_string(),
                reason: e.to_string(),
            })?;

        settings.normalized().validate()
    }

    fn normalized(mut self) -> Self {
        let normalize = |ext: &String| ext.trim().trim_start_matches('.').to_ascii_lowercase();
        self.raw_extensions = self.raw_extensions.iter().map(normalize).collect();
        self.ignore_extensions = self.ignore_extensions.iter().map(normalize).collect();
        self
    }

    /// Reject settings that would break classification or packaging
    pub fn validate(self) -> Result<Self, SettingsError> {
        let single_segment = |field: &str, value: &str| -> Result<(), SettingsError> {
            if value.is_empty()
                || value == "."
                || value == ".."
                || value.contains('/')
                || value.contains('\\')
            {
                return Err(SettingsError::Invalid {
                    field: field.to_string(),
                    reason: format!("'{}' must be a plain file or directory name", value),
                });
            }
            Ok(())
        };

        single_segment("staging_dir", &self.staging_dir)?;
        single_segment("template_descriptor", &self.template_descriptor)?;
        single_segment("package_manifest", &self.package_manifest)?;

        if !self
            .template_descriptor
            .to_ascii_lowercase()
            .ends_with(TEMPLATE_DESCRIPTOR_SUFFIX)
        {
            return Err(SettingsError::Invalid {
                field: "template_descriptor".to_string(),
                reason: format!("must end with {}", TEMPLATE_DESCRIPTOR_SUFFIX),
            });
        }

        if self.namespace_token.is_empty() {
            return Err(SettingsError::Invalid {
                field: "namespace_token".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if let Some(prefix) = &self.artifact_prefix {
            single_segment("artifact_prefix", prefix)?;
        }

        Ok(self)
    }

    /// Addin descriptor file name for a project
    pub fn addin_descriptor(&self, project_name: &str) -> String {
        format!("{}{}", project_name, ADDIN_DESCRIPTOR_SUFFIX)
    }

    /// Whether files with this extension are copied byte-for-byte
    pub fn is_raw_extension(&self, extension: &str) -> bool {
        self.raw_extensions
            .iter()
            .any(|raw| raw.eq_ignore_ascii_case(extension))
    }
}

#[cfg(test)]
mod tests {
    include!("settings.test.rs");
}
