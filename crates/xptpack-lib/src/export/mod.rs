//! Template export pipeline
//!
//! Turns a project's file set into a placeholder-parameterized template tree
//! plus its two descriptors, then drives the external packaging tool.

pub mod classifier;
pub mod descriptors;
pub mod guard;
pub mod manifest;
pub mod materializer;
pub mod packager;
pub mod packages;
pub mod pipeline;
pub mod project;
pub mod settings;
pub mod version;

pub use classifier::PathClassifier;
pub use descriptors::{DescriptorError, DescriptorWriter, Fragments};
pub use guard::{GuardError, LOCK_FILE, RunGuard};
pub use manifest::{ExportedFile, ManifestError, render_file_tree, render_runtime};
pub use materializer::{MaterializeError, MaterializedTemplate, TemplateMaterializer};
pub use packager::{
    ARTIFACT_EXTENSION, DEFAULT_PACKAGER, PackageRequest, PackagerError, PackagerOptions,
    PackagingOrchestrator, artifact_name,
};
pub use packages::{PackageError, extract_package_list, read_package_list};
pub use pipeline::{ExportError, ExportOutcome, ExportPipeline, ExportReport};
pub use project::{DirectoryProject, Project, ProjectError, SourceFile};
pub use settings::{ExportSettings, SETTINGS_FILE, SettingsError};
pub use version::{VersionError, resolve_version};
