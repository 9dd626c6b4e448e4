//! Template export domain primitives

use super::shared::impl_fromstr_for_value_enum;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Why a source file was left out of the template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExclusionReason {
    /// Path contains a `bin` segment
    BinDirectory,
    /// Path lies inside the staging directory
    StagingDirectory,
    /// Path contains a `packages` segment
    PackagesDirectory,
    /// File is a template descriptor (`*.xpt.xml`)
    TemplateDescriptor,
    /// File is an addin descriptor (`*.addin.xml`)
    AddinDescriptor,
    /// File name carries no extension
    NoExtension,
}

impl fmt::Display for ExclusionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ExclusionReason::BinDirectory => "build output directory",
            ExclusionReason::StagingDirectory => "staging directory",
            ExclusionReason::PackagesDirectory => "package restore directory",
            ExclusionReason::TemplateDescriptor => "template descriptor",
            ExclusionReason::AddinDescriptor => "addin descriptor",
            ExclusionReason::NoExtension => "no file extension",
        };
        f.write_str(text)
    }
}

/// Per-file classification computed on every run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportDecision {
    Excluded(ExclusionReason),
    /// Package-reference manifest, diverted to the package extractor
    PackageManifest,
    IncludedRaw,
    IncludedRewritten,
}

impl ExportDecision {
    pub fn is_included(&self) -> bool {
        matches!(
            self,
            ExportDecision::IncludedRaw | ExportDecision::IncludedRewritten
        )
    }
}

/// How an exported file was written into the staging tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Byte-for-byte copy
    Raw,
    /// Project name replaced by the namespace token
    Rewritten,
}

/// Pipeline stage, reported when a run aborts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportStep {
    Prepare,
    Materialize,
    Descriptors,
    ResolveVersion,
    Package,
}

impl fmt::Display for ExportStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ExportStep::Prepare => "prepare",
            ExportStep::Materialize => "materialize",
            ExportStep::Descriptors => "descriptors",
            ExportStep::ResolveVersion => "resolve-version",
            ExportStep::Package => "package",
        };
        f.write_str(text)
    }
}

/// What to do when a rewritten file's destination already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OverwritePolicy {
    /// Replace the existing file
    #[default]
    Overwrite,
    /// Abort the run
    Fail,
}

/// Shape of the generated file-tree manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DirectoryLayout {
    /// Re-emit each file's full directory chain
    #[default]
    PerFile,
    /// One directory node per distinct directory
    Merged,
}

impl_fromstr_for_value_enum!(OverwritePolicy, "invalid overwrite policy");
impl_fromstr_for_value_enum!(DirectoryLayout, "invalid directory layout");
