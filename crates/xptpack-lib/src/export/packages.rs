//! Package-reference manifest extraction
//!
//! Pulls the inner package list out of a `packages.config` style document so
//! it can be embedded verbatim into the template descriptor.

use quick_xml::Reader;
use quick_xml::events::Event;
use std::path::Path;
use thiserror::Error;

/// Package manifest errors
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("Failed to read package manifest {}: {source}", .path.display())]
    ReadFailed {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed package manifest: {reason}")]
    Malformed { reason: String },

    #[error("Package manifest has no root element")]
    NoRootElement,
}

impl From<quick_xml::Error> for PackageError {
    fn from(err: quick_xml::Error) -> Self {
        PackageError::Malformed {
            reason: err.to_string(),
        }
    }
}

/// Read a manifest from disk and extract its package list
pub fn read_package_list(path: &Path) -> Result<String, PackageError> {
    let content = std::fs::read_to_string(path).map_err(|source| PackageError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    extract_package_list(&content)
}

/// Return the exact inner text of the root element, trimmed.
///
/// The XML declaration, comments and the root tags themselves are dropped.
/// A self-closing root yields an empty fragment.
pub fn extract_package_list(content: &str) -> Result<String, PackageError> {
    let mut reader = Reader::from_str(content);

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let end = start.to_end().into_owned();
                let inner = reader.read_text(end.name())?;
                return Ok(inner.trim().to_string());
            }
            Event::Empty(_) => return Ok(String::new()),
            Event::Eof => return Err(PackageError::NoRootElement),
            Event::Text(text) if text.iter().all(u8::is_ascii_whitespace) => continue,
            Event::Text(_) => {
                return Err(PackageError::Malformed {
                    reason: "text outside of the root element".to_string(),
                });
            }
            // Declaration, comments, processing instructions, doctype
            _ => continue,
        }
    }
}

#[cfg(test)]
mod tests {
    include!("packages.test.rs");
}
