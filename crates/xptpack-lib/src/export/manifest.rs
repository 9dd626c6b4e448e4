//! Runtime-import and file-tree fragments
//!
//! Both fragments are rendered from the ordered list of exported files once
//! materialization has finished. Nothing is accumulated during traversal.

use crate::primitives::{DirectoryLayout, FileKind};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use thiserror::Error;

/// Fragment rendering errors
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to render {fragment} fragment: {reason}")]
    RenderFailed {
        fragment: &'static str,
        reason: String,
    },
}

/// A file that landed in the staging tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Project-relative path using `/` separators
    pub virtual_path: String,
    pub kind: FileKind,
}

impl ExportedFile {
    pub fn new(virtual_path: impl Into<String>, kind: FileKind) -> Self {
        Self {
            virtual_path: virtual_path.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        self.virtual_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.virtual_path)
    }

    /// Non-empty directory segments, outermost first
    pub fn directories(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = self.virtual_path.split('/').collect();
        segments.pop();
        segments.retain(|segment| !segment.is_empty());
        segments
    }
}

/// Virtual paths declared as runtime imports, in export order.
///
/// Only rewritten files are imported; raw assets ship through the file tree.
pub fn runtime_imports(files: &[ExportedFile]) -> Vec<&str> {
    files
        .iter()
        .filter(|file| file.kind == FileKind::Rewritten)
        .map(|file| file.virtual_path.as_str())
        .collect()
}

/// Render the `<Runtime>` element for the addin descriptor.
///
/// The template descriptor is always the first import.
pub fn render_runtime(
    template_descriptor: &str,
    files: &[ExportedFile],
) -> Result<String, ManifestError> {
    let mut out = FragmentWriter::new("runtime");
    out.start("Runtime", &[])?;
    out.empty("Import", &[("file", template_descriptor)])?;
    for import in runtime_imports(files) {
        out.empty("Import", &[("file", import)])?;
    }
    out.end("Runtime")?;
    out.finish()
}

/// Render the `<Files>` element for the template descriptor
pub fn render_file_tree(
    files: &[ExportedFile],
    layout: DirectoryLayout,
) -> Result<String, ManifestError> {
    let mut out = FragmentWriter::new("files");
    out.start("Files", &[])?;
    match layout {
        DirectoryLayout::PerFile => {
            for file in files {
                let dirs = file.directories();
                for dir in &dirs {
                    out.start("Directory", &[("name", *dir)])?;
                }
                out.file(file)?;
                for _ in &dirs {
                    out.end("Directory")?;
                }
            }
        }
        DirectoryLayout::Merged => {
            let mut root = DirNode::default();
            for file in files {
                root.insert(&file.directories(), file);
            }
            root.render(&mut out)?;
        }
    }
    out.end("Files")?;
    out.finish()
}

enum TreeEntry<'a> {
    Dir(DirNode<'a>),
    File(&'a ExportedFile),
}

/// Directory node for the merged layout; children keep first-seen order
#[derive(Default)]
struct DirNode<'a> {
    name: &'a str,
    children: Vec<TreeEntry<'a>>,
}

impl<'a> DirNode<'a> {
    fn insert(&mut self, dirs: &[&'a str], file: &'a ExportedFile) {
        let Some((first, rest)) = dirs.split_first() else {
            self.children.push(TreeEntry::File(file));
            return;
        };

        let existing = self.children.iter_mut().find_map(|child| match child {
            TreeEntry::Dir(node) if node.name == *first => Some(node),
            _ => None,
        });
        match existing {
            Some(node) => node.insert(rest, file),
            None => {
                let mut node = DirNode {
                    name: first,
                    children: Vec::new(),
                };
                node.insert(rest, file);
                self.children.push(TreeEntry::Dir(node));
            }
        }
    }

    fn render(&self, out: &mut FragmentWriter) -> Result<(), ManifestError> {
        for child in &self.children {
            match child {
                TreeEntry::File(file) => out.file(file)?,
                TreeEntry::Dir(node) => {
                    out.start("Directory", &[("name", node.name)])?;
                    node.render(out)?;
                    out.end("Directory")?;
                }
            }
        }
        Ok(())
    }
}

/// Tab-indented writer over an in-memory buffer
struct FragmentWriter {
    fragment: &'static str,
    writer: Writer<Vec<u8>>,
}

impl FragmentWriter {
    fn new(fragment: &'static str) -> Self {
        Self {
            fragment,
            writer: Writer::new_with_indent(Vec::new(), b'\t', 1),
        }
    }

    fn start(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<(), ManifestError> {
        let element = BytesStart::new(tag).with_attributes(attrs.iter().copied());
        self.write(Event::Start(element))
    }

    fn empty(&mut self, tag: &str, attrs: &[(&str, &str)]) -> Result<(), ManifestError> {
        let element = BytesStart::new(tag).with_attributes(attrs.iter().copied());
        self.write(Event::Empty(element))
    }

    fn end(&mut self, tag: &str) -> Result<(), ManifestError> {
        self.write(Event::End(BytesEnd::new(tag)))
    }

    fn file(&mut self, file: &ExportedFile) -> Result<(), ManifestError> {
        let tag = match file.kind {
            FileKind::Raw => "RawFile",
            FileKind::Rewritten => "File",
        };
        self.empty(
            tag,
            &[("name", file.name()), ("src", file.virtual_path.as_str())],
        )
    }

    fn write(&mut self, event: Event<'_>) -> Result<(), ManifestError> {
        self.writer
            .write_event(event)
            .map_err(|e| ManifestError::RenderFailed {
                fragment: self.fragment,
                reason: e.to_string(),
            })
    }

    fn finish(self) -> Result<String, ManifestError> {
        String::from_utf8(self.writer.into_inner()).map_err(|e| ManifestError::RenderFailed {
            fragment: self.fragment,
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    include!("manifest.test.rs");
}
