//! Template and addin descriptor handling
//!
//! Descriptors live at the project root and are created from the embedded
//! defaults only when missing, so hand edits survive later exports. Each run
//! substitutes the placeholder tokens and writes the resolved copies into the
//! staging directory.

use super::project::Project;
use super::settings::ExportSettings;
use handlebars::Handlebars;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const VERSION_TOKEN: &str = "[VERSION]";
pub const FILES_TOKEN: &str = "[FILES_PLACEHOLDER]";
pub const PACKAGES_TOKEN: &str = "[PACKAGES_PLACEHOLDER]";
pub const RUNTIME_TOKEN: &str = "[RUNTIME_PLACEHOLDER]";

const ADDIN_TEMPLATE: &str = "addin";
const XPT_TEMPLATE: &str = "xpt";

/// Descriptor errors
#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Failed to render default {name}: {reason}")]
    RenderFailed { name: String, reason: String },

    #[error("Descriptor {name} is not well-formed XML: {reason}")]
    Malformed { name: String, reason: String },

    #[error("Addin descriptor {name} has no Addin root with an id attribute")]
    MissingIdentity { name: String },
}

/// Fragments substituted into the descriptors
#[derive(Debug, Clone, Default)]
pub struct Fragments {
    pub runtime: String,
    pub files: String,
    pub packages: String,
}

/// Descriptor sources as found (or created) at the project root
#[derive(Debug, Clone)]
pub struct DescriptorSources {
    pub template_path: PathBuf,
    pub addin_path: PathBuf,
    pub template: String,
    pub addin: String,
    /// Descriptors created from the defaults during this run
    pub created: Vec<PathBuf>,
}

/// Resolved descriptors written into the staging directory
#[derive(Debug, Clone)]
pub struct FinalDescriptors {
    pub template_path: PathBuf,
    pub addin_path: PathBuf,
    pub addin_name: String,
}

/// Embedded default descriptors rendered with handlebars
pub struct DefaultDescriptors {
    handlebars: Handlebars<'static>,
}

impl DefaultDescriptors {
    pub fn new() -> Result<Self, DescriptorError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);

        let templates = [
            (
                ADDIN_TEMPLATE,
                include_str!("../../templates/addin.xml.template"),
            ),
            (XPT_TEMPLATE, include_str!("../../templates/xpt.xml.template")),
        ];
        for (name, source) in templates {
            handlebars
                .register_template_string(name, source)
                .map_err(|e| DescriptorError::RenderFailed {
                    name: name.to_string(),
                    reason: e.to_string(),
                })?;
        }

        Ok(Self { handlebars })
    }

    pub fn render_addin(
        &self,
        project_name: &str,
        template_descriptor: &str,
    ) -> Result<String, DescriptorError> {
        self.render(ADDIN_TEMPLATE, project_name, template_descriptor)
    }

    pub fn render_template(
        &self,
        project_name: &str,
        template_descriptor: &str,
    ) -> Result<String, DescriptorError> {
        self.render(XPT_TEMPLATE, project_name, template_descriptor)
    }

    fn render(
        &self,
        name: &str,
        project_name: &str,
        template_descriptor: &str,
    ) -> Result<String, DescriptorError> {
        let variables = HashMap::from([
            ("NAME", project_name),
            ("TEMPLATE", template_descriptor),
        ]);
        self.handlebars
            .render(name, &variables)
            .map_err(|e| DescriptorError::RenderFailed {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Reads, defaults and finalizes the two descriptors of a project
pub struct DescriptorWriter<'a> {
    project: &'a Project,
    settings: &'a ExportSettings,
}

impl<'a> DescriptorWriter<'a> {
    pub fn new(project: &'a Project, settings: &'a ExportSettings) -> Self {
        Self { project, settings }
    }

    pub fn template_path(&self) -> PathBuf {
        self.project.root.join(&self.settings.template_descriptor)
    }

    pub fn addin_name(&self) -> String {
        self.settings.addin_descriptor(&self.project.name)
    }

    pub fn addin_path(&self) -> PathBuf {
        self.project.root.join(self.addin_name())
    }

    /// Create missing descriptors from the defaults, then read both
    pub fn prepare(&self) -> Result<DescriptorSources, DescriptorError> {
        let defaults = DefaultDescriptors::new()?;
        let template_name = &self.settings.template_descriptor;
        let template_path = self.template_path();
        let addin_path = self.addin_path();

        let mut created = Vec::new();
        if create_if_absent(&template_path, || {
            defaults.render_template(&self.project.name, template_name)
        })? {
            created.push(template_path.clone());
        }
        if create_if_absent(&addin_path, || {
            defaults.render_addin(&self.project.name, template_name)
        })? {
            created.push(addin_path.clone());
        }

        for path in &created {
            tracing::info!(path = %path.display(), "Created default descriptor");
        }

        Ok(DescriptorSources {
            template: std::fs::read_to_string(&template_path)?,
            addin: std::fs::read_to_string(&addin_path)?,
            template_path,
            addin_path,
            created,
        })
    }

    /// Substitute placeholders, check both documents and write them into staging
    pub fn write_final(
        &self,
        sources: &DescriptorSources,
        fragments: &Fragments,
        version: &str,
        staging_dir: &Path,
    ) -> Result<FinalDescriptors, DescriptorError> {
        let version_label = format!("v{}", version);
        let template = substitute(
            &sources.template,
            &[
                (VERSION_TOKEN, &version_label),
                (FILES_TOKEN, &fragments.files),
                (PACKAGES_TOKEN, &fragments.packages),
            ],
        );
        let addin = substitute(&sources.addin, &[(RUNTIME_TOKEN, &fragments.runtime)]);

        let template_name = &self.settings.template_descriptor;
        let addin_name = self.addin_name();
        check_well_formed(template_name, &template)?;
        check_well_formed(&addin_name, &addin)?;

        let template_path = staging_dir.join(template_name);
        let addin_path = staging_dir.join(&addin_name);
        std::fs::write(&template_path, template)?;
        std::fs::write(&addin_path, addin)?;

        tracing::debug!(
            template = %template_path.display(),
            addin = %addin_path.display(),
            "Wrote final descriptors"
        );
        Ok(FinalDescriptors {
            template_path,
            addin_path,
            addin_name,
        })
    }
}

/// Write `render()` to `path` unless the file already exists
fn create_if_absent(
    path: &Path,
    render: impl FnOnce() -> Result<String, DescriptorError>,
) -> Result<bool, DescriptorError> {
    if path.exists() {
        return Ok(false);
    }
    let content = render()?;
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(mut file) => {
            file.write_all(content.as_bytes())?;
            Ok(true)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Replace every token in a single left-to-right pass.
///
/// Substituted values are never rescanned, so a fragment containing a
/// token literally is left alone.
pub fn substitute(text: &str, replacements: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    loop {
        let next = replacements
            .iter()
            .filter_map(|(token, value)| rest.find(token).map(|idx| (idx, *token, *value)))
            .min_by_key(|(idx, _, _)| *idx);

        match next {
            Some((idx, token, value)) => {
                out.push_str(&rest[..idx]);
                out.push_str(value);
                rest = &rest[idx + token.len()..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}

/// Check that `text` parses as XML with exactly one root element
pub fn check_well_formed(name: &str, text: &str) -> Result<(), DescriptorError> {
    let malformed = |reason: String| DescriptorError::Malformed {
        name: name.to_string(),
        reason,
    };

    let mut reader = Reader::from_str(text);
    let mut depth = 0usize;
    let mut roots = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) => {
                if depth == 0 {
                    roots += 1;
                }
                depth += 1;
            }
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Empty(_)) if depth == 0 => roots += 1,
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(malformed(e.to_string())),
        }
    }

    if depth != 0 {
        return Err(malformed("unclosed element at end of document".to_string()));
    }
    if roots != 1 {
        return Err(malformed(format!(
            "expected one root element, found {}",
            roots
        )));
    }
    Ok(())
}

/// Artifact prefix declared by an addin descriptor: `namespace.id`, or just
/// `id` when no namespace is set
pub fn artifact_prefix(addin_name: &str, addin: &str) -> Result<String, DescriptorError> {
    let malformed = |reason: String| DescriptorError::Malformed {
        name: addin_name.to_string(),
        reason,
    };
    let missing = || DescriptorError::MissingIdentity {
        name: addin_name.to_string(),
    };

    let mut reader = Reader::from_str(addin);
    loop {
        match reader.read_event().map_err(|e| malformed(e.to_string()))? {
            Event::Start(element) | Event::Empty(element) => {
                if element.name().as_ref() != b"Addin" {
                    return Err(missing());
                }

                let mut id = None;
                let mut namespace = None;
                for attr in element.attributes() {
                    let attr = attr.map_err(|e| malformed(e.to_string()))?;
                    let raw = std::str::from_utf8(&attr.value)
                        .map_err(|e| malformed(e.to_string()))?;
                    let value = quick_xml::escape::unescape(raw)
                        .map_err(|e| malformed(e.to_string()))?
                        .trim()
                        .to_string();
                    match attr.key.as_ref() {
                        b"id" => id = Some(value),
                        b"namespace" => namespace = Some(value),
                        _ => {}
                    }
                }

                let id = id.filter(|id| !id.is_empty()).ok_or_else(missing)?;
                return Ok(match namespace.filter(|ns| !ns.is_empty()) {
                    Some(namespace) => format!("{}.{}", namespace, id),
                    None => id,
                });
            }
            Event::Eof => return Err(missing()),
            _ => continue,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("descriptors.test.rs");
}
