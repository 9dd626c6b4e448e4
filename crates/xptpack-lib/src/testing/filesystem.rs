//! Filesystem fixtures for export tests
//!
//! A [`TempDirFixture`] stands in for a project root: tests write files into
//! it, then build a [`Project`] from a chosen subset of them.

use crate::export::{Project, SourceFile};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Temporary directory fixture with automatic cleanup
pub struct TempDirFixture {
    /// The temporary directory (automatically cleaned up on drop)
    pub temp_dir: TempDir,
}

impl TempDirFixture {
    /// Create a new temporary directory fixture
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let temp_dir = tempfile::tempdir()?;
        Ok(Self { temp_dir })
    }

    /// Get the path to the temporary directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a subdirectory within the temporary directory
    pub fn create_dir(&self, subdir: &str) -> Result<(), Box<dyn std::error::Error>> {
        fs::create_dir_all(self.path().join(subdir))?;
        Ok(())
    }

    /// Write text to a file, creating parent directories
    pub fn write_file(
        &self,
        file_path: &str,
        content: &str,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.write_bytes(file_path, content.as_bytes())
    }

    /// Write raw bytes to a file, creating parent directories
    pub fn write_bytes(
        &self,
        file_path: &str,
        content: &[u8],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let full_path = self.path().join(file_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full_path, content)?;
        Ok(())
    }

    /// Read content from a file within the temporary directory
    pub fn read_file(&self, file_path: &str) -> Result<String, Box<dyn std::error::Error>> {
        Ok(fs::read_to_string(self.path().join(file_path))?)
    }

    /// Read raw bytes from a file within the temporary directory
    pub fn read_bytes(&self, file_path: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        Ok(fs::read(self.path().join(file_path))?)
    }

    /// Check if a file exists within the temporary directory
    pub fn file_exists(&self, file_path: &str) -> bool {
        self.path().join(file_path).exists()
    }

    /// Source file for a fixture-relative path (the file need not exist)
    pub fn source_file(&self, virtual_path: &str) -> SourceFile {
        SourceFile::new(self.path().join(virtual_path), virtual_path)
    }

    /// Project rooted at the fixture with the given files, in order
    pub fn project(&self, name: &str, virtual_paths: &[&str]) -> Project {
        let files = virtual_paths
            .iter()
            .map(|path| self.source_file(path))
            .collect();
        Project::new(name, self.path(), files)
    }
}

#[cfg(test)]
mod tests {
    include!("filesystem.test.rs");
}
