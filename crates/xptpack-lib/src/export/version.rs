//! Version extraction from the addin descriptor

use thiserror::Error;

const VERSION_MARKER: &str = "version=\"";

/// Version lookup errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("No version attribute found in descriptor")]
    NotFound,

    #[error("Version attribute starting at byte {offset} is not terminated")]
    Unterminated { offset: usize },

    #[error("Version attribute is empty")]
    Empty,
}

/// Return the value of the first `version="…"` attribute in `descriptor`.
///
/// The marker is matched case-insensitively. A leading XML declaration is
/// skipped so its own `version="1.0"` is not mistaken for the addin version.
pub fn resolve_version(descriptor: &str) -> Result<String, VersionError> {
    let body_start = declaration_end(descriptor);
    let body = &descriptor[body_start..];

    let marker = find_ignore_ascii_case(body, VERSION_MARKER).ok_or(VersionError::NotFound)?;
    let value_start = marker + VERSION_MARKER.len();
    let value_len = body[value_start..]
        .find('"')
        .ok_or(VersionError::Unterminated {
            offset: body_start + marker,
        })?;

    let version = &body[value_start..value_start + value_len];
    if version.trim().is_empty() {
        return Err(VersionError::Empty);
    }

    tracing::debug!(version, "Resolved addin version");
    Ok(version.to_string())
}

/// Byte offset just past a leading `<?xml … ?>` declaration, or 0
fn declaration_end(text: &str) -> usize {
    let trimmed = text.trim_start_matches('\u{feff}').trim_start();
    let skipped = text.len() - trimmed.len();
    if !trimmed.starts_with("<?xml") {
        return 0;
    }
    match trimmed.find("?>") {
        Some(end) => skipped + end + 2,
        None => 0,
    }
}

// ASCII lowercasing keeps byte offsets stable, unlike `str::to_lowercase`
fn find_ignore_ascii_case(haystack: &str, needle: &str) -> Option<usize> {
    let hay = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.len() > hay.len() {
        return None;
    }
    (0..=hay.len() - needle.len()).find(|&i| hay[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    include!("version.test.rs");
}
