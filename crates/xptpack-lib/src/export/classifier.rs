//! Inclusion rules for template export
//!
//! Classification is pure and runs on the project-relative path, compared
//! case-insensitively. Exclusions are checked before the package manifest,
//! so a manifest under `bin/` or `packages/` is ignored like any other file.

use super::project::SourceFile;
use super::settings::{ADDIN_DESCRIPTOR_SUFFIX, ExportSettings, TEMPLATE_DESCRIPTOR_SUFFIX};
use crate::primitives::{ExclusionReason, ExportDecision};

/// Path classifier bound to one run's settings
pub struct PathClassifier<'a> {
    settings: &'a ExportSettings,
}

impl<'a> PathClassifier<'a> {
    pub fn new(settings: &'a ExportSettings) -> Self {
        Self { settings }
    }

    pub fn classify(&self, file: &SourceFile) -> ExportDecision {
        if let Some(reason) = self.exclusion(file) {
            return ExportDecision::Excluded(reason);
        }

        if file
            .name()
            .eq_ignore_ascii_case(&self.settings.package_manifest)
        {
            return ExportDecision::PackageManifest;
        }

        match file.extension() {
            Some(ext) if self.settings.is_raw_extension(ext) => ExportDecision::IncludedRaw,
            _ => ExportDecision::IncludedRewritten,
        }
    }

    /// Matches run on the project-relative path only, so directories above
    /// the project root (a checkout under `~/bin`, say) never exclude a file.
    fn exclusion(&self, file: &SourceFile) -> Option<ExclusionReason> {
        let lowered = file.virtual_path.to_ascii_lowercase();
        let staging = self.settings.staging_dir.to_ascii_lowercase();
        let mut dirs = lowered.split('/').rev().skip(1);

        if dirs.clone().any(|segment| segment == "bin") {
            return Some(ExclusionReason::BinDirectory);
        }
        if dirs.clone().any(|segment| segment == staging) {
            return Some(ExclusionReason::StagingDirectory);
        }
        if dirs.any(|segment| segment == "packages") {
            return Some(ExclusionReason::PackagesDirectory);
        }
        if lowered.ends_with(TEMPLATE_DESCRIPTOR_SUFFIX) {
            return Some(ExclusionReason::TemplateDescriptor);
        }
        if lowered.ends_with(ADDIN_DESCRIPTOR_SUFFIX) {
            return Some(ExclusionReason::AddinDescriptor);
        }
        if file.extension().is_none() {
            return Some(ExclusionReason::NoExtension);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    include!("classifier.test.rs");
}
