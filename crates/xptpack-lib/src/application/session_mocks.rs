//! Mock implementations of session providers for testing
//!
//! These mocks enable testing of command handlers without spawning the
//! packaging tool or touching the real working directory.

use crate::Result;
use crate::application::config::AppConfig;
use crate::application::session::*;
use crate::display::{DisplayProvider, MockDisplayProvider};
use crate::export::DEFAULT_PACKAGER;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock filesystem provider backed by an in-memory tree
pub struct MockFileSystemProvider {
    pub current_dir: PathBuf,
    /// In-memory filesystem: path -> content
    pub files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
    /// Track directories that exist
    pub directories: Arc<Mutex<BTreeSet<PathBuf>>>,
    /// Every path passed to remove_file or remove_dir_all
    pub removed: Arc<Mutex<Vec<PathBuf>>>,
}

impl Default for MockFileSystemProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFileSystemProvider {
    pub fn new() -> Self {
        Self {
            current_dir: PathBuf::from("/test/workdir"),
            files: Arc::new(Mutex::new(BTreeMap::new())),
            directories: Arc::new(Mutex::new(BTreeSet::new())),
            removed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_current_dir(mut self, dir: PathBuf) -> Self {
        self.current_dir = dir.clone();
        self.add_dir(dir);
        self
    }

    pub fn with_file(self, path: PathBuf, content: String) -> Self {
        if let Some(parent) = path.parent() {
            self.add_dir(parent.to_path_buf());
        }
        self.lock_files().insert(path, content);
        self
    }

    pub fn with_directory(self, path: PathBuf) -> Self {
        self.add_dir(path);
        self
    }

    /// Paths removed so far, in call order
    pub fn removed_paths(&self) -> Vec<PathBuf> {
        self.removed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn add_dir(&self, mut dir: PathBuf) {
        let mut directories = self
            .directories
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        loop {
            directories.insert(dir.clone());
            if !dir.pop() || dir.as_os_str().is_empty() {
                break;
            }
        }
    }

    fn lock_files(&self) -> std::sync::MutexGuard<'_, BTreeMap<PathBuf, String>> {
        self.files
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_dirs(&self) -> std::sync::MutexGuard<'_, BTreeSet<PathBuf>> {
        self.directories
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record_removal(&self, path: &Path) {
        self.removed
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(path.to_path_buf());
    }
}

fn not_found(path: &Path) -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("{} not found", path.display()),
    )
}

impl FileSystemProvider for MockFileSystemProvider {
    fn current_dir(&self) -> Result<PathBuf> {
        Ok(self.current_dir.clone())
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.lock_files()
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("File not found: {}", path.display()))
    }

    fn exists(&self, path: &Path) -> bool {
        self.lock_files().contains_key(path) || self.lock_dirs().contains(path)
    }

    fn is_directory(&self, path: &Path) -> bool {
        self.lock_dirs().contains(path)
    }

    fn list_dir(&self, path: &Path) -> std::result::Result<Vec<PathBuf>, std::io::Error> {
        if !self.is_directory(path) {
            return Err(not_found(path));
        }

        let mut entries: BTreeSet<PathBuf> = BTreeSet::new();
        let files = self.lock_files();
        let dirs = self.lock_dirs();
        for candidate in files.keys().chain(dirs.iter()) {
            if candidate.parent() == Some(path) {
                entries.insert(candidate.clone());
            }
        }
        Ok(entries.into_iter().collect())
    }

    fn remove_file(&self, path: &Path) -> std::result::Result<(), std::io::Error> {
        self.record_removal(path);
        self.lock_files()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path))
    }

    fn remove_dir_all(&self, path: &Path) -> std::result::Result<(), std::io::Error> {
        self.record_removal(path);
        if !self.lock_dirs().contains(path) {
            return Err(not_found(path));
        }
        self.lock_files().retain(|file, _| !file.starts_with(path));
        self.lock_dirs().retain(|dir| !dir.starts_with(path));
        Ok(())
    }
}

/// Process call record for spy pattern
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessCall {
    pub command: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    pub timeout: Option<Duration>,
}

/// Mock process provider for testing with spy pattern
pub struct MockProcessProvider {
    pub calls: RefCell<Vec<ProcessCall>>,
    pub results: HashMap<(String, Vec<String>), std::result::Result<ProcessOutput, String>>,
    /// Programs `find_program` resolves
    pub programs: HashMap<String, PathBuf>,
    /// Files written into the working directory on every call
    pub side_effect_files: Vec<(String, String)>,
}

impl Default for MockProcessProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProcessProvider {
    pub fn new() -> Self {
        let mut programs = HashMap::new();
        programs.insert(DEFAULT_PACKAGER.to_string(), PathBuf::from(DEFAULT_PACKAGER));

        Self {
            calls: RefCell::new(Vec::new()),
            results: HashMap::new(),
            programs,
            side_effect_files: Vec::new(),
        }
    }

    pub fn with_program(mut self, name: &str, path: PathBuf) -> Self {
        self.programs.insert(name.to_string(), path);
        self
    }

    pub fn with_program_unavailable(mut self, name: &str) -> Self {
        self.programs.remove(name);
        self
    }

    pub fn with_result(
        mut self,
        command: String,
        args: Vec<String>,
        result: std::result::Result<ProcessOutput, String>,
    ) -> Self {
        self.results.insert((command, args), result);
        self
    }

    /// Write `name` with `contents` into the working directory whenever a
    /// command runs, the way a packaging tool drops its artifact
    pub fn with_side_effect_file(mut self, name: &str, contents: &str) -> Self {
        self.side_effect_files
            .push((name.to_string(), contents.to_string()));
        self
    }

    /// Get all recorded process calls for verification
    pub fn get_calls(&self) -> Vec<ProcessCall> {
        self.calls.borrow().clone()
    }

    /// Verify that a specific command was called with expected arguments
    pub fn verify_call(&self, command: &str, args: &[&str], working_dir: &Path) -> bool {
        self.calls.borrow().iter().any(|call| {
            call.command == command
                && call.args.iter().map(String::as_str).eq(args.iter().copied())
                && call.working_dir == working_dir
        })
    }
}

impl ProcessProvider for MockProcessProvider {
    fn execute_with_timeout(
        &self,
        command: &str,
        args: &[&str],
        working_dir: &Path,
        timeout: Option<Duration>,
    ) -> Result<ProcessOutput> {
        // Record the call for spy pattern verification
        self.calls.borrow_mut().push(ProcessCall {
            command: command.to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            working_dir: working_dir.to_path_buf(),
            timeout,
        });

        for (name, contents) in &self.side_effect_files {
            std::fs::write(working_dir.join(name), contents)?;
        }

        let key = (
            command.to_string(),
            args.iter().map(|s| s.to_string()).collect(),
        );
        match self.results.get(&key) {
            Some(Ok(output)) => Ok(output.clone()),
            Some(Err(e)) => Err(anyhow::anyhow!("{}", e)),
            // Default behavior: succeed with empty output
            None => Ok(ProcessOutput::success("")),
        }
    }

    fn find_program(&self, program: &str) -> Option<PathBuf> {
        self.programs.get(program).cloned()
    }
}

/// Mock config provider for testing
pub struct MockConfigProvider {
    pub app_config: AppConfig,
}

impl MockConfigProvider {
    pub fn new(app_config: AppConfig) -> Self {
        Self { app_config }
    }
}

impl ConfigProvider for MockConfigProvider {
    fn app_config(&self) -> &AppConfig {
        &self.app_config
    }
}

/// Mock command session for testing
pub struct MockCommandSession {
    pub display_provider: MockDisplayProvider,
    pub filesystem_provider: MockFileSystemProvider,
    pub process_provider: MockProcessProvider,
    pub config_provider: MockConfigProvider,
}

impl Default for MockCommandSession {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCommandSession {
    pub fn new() -> Self {
        Self {
            display_provider: MockDisplayProvider::new(),
            filesystem_provider: MockFileSystemProvider::new(),
            process_provider: MockProcessProvider::new(),
            config_provider: MockConfigProvider::new(AppConfig::default()),
        }
    }

    pub fn with_filesystem(mut self, filesystem: MockFileSystemProvider) -> Self {
        self.filesystem_provider = filesystem;
        self
    }

    pub fn with_process(mut self, process: MockProcessProvider) -> Self {
        self.process_provider = process;
        self
    }

    pub fn with_config(mut self, config: MockConfigProvider) -> Self {
        self.config_provider = config;
        self
    }

    /// Shorthand for a config whose workdir is `dir`
    pub fn with_workdir(self, dir: PathBuf) -> Self {
        let app_config = AppConfig {
            workdir: Some(dir),
            ..AppConfig::default()
        };
        self.with_config(MockConfigProvider::new(app_config))
    }
}

impl Session for MockCommandSession {
    fn display(&self) -> &dyn DisplayProvider {
        &self.display_provider
    }

    fn filesystem(&self) -> &dyn FileSystemProvider {
        &self.filesystem_provider
    }

    fn process(&self) -> &dyn ProcessProvider {
        &self.process_provider
    }

    fn config(&self) -> &dyn ConfigProvider {
        &self.config_provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_filesystem_provider() {
        let root = PathBuf::from("/p");
        let provider = MockFileSystemProvider::new()
            .with_current_dir(root.clone())
            .with_file(root.join("a.mpack"), "zip".to_string())
            .with_file(root.join("ProjectTemplate/Main.cs"), "x".to_string());

        assert_eq!(provider.current_dir().unwrap(), root);
        assert!(provider.is_directory(&root.join("ProjectTemplate")));
        assert_eq!(
            provider.list_dir(&root).unwrap(),
            vec![root.join("ProjectTemplate"), root.join("a.mpack")]
        );

        provider.remove_dir_all(&root.join("ProjectTemplate")).unwrap();
        assert!(!provider.exists(&root.join("ProjectTemplate/Main.cs")));
        assert!(provider.remove_file(&root.join("missing")).is_err());
        assert_eq!(provider.removed_paths().len(), 2);
    }

    #[test]
    fn test_mock_process_provider() {
        let working_dir = PathBuf::from("/test/workdir");
        let provider = MockProcessProvider::new().with_result(
            DEFAULT_PACKAGER.to_string(),
            vec!["setup".to_string(), "pack".to_string()],
            Err("Mock error".to_string()),
        );

        // Unconfigured commands succeed by default
        let result = provider.execute(DEFAULT_PACKAGER, &["--help"], &working_dir);
        assert!(result.unwrap().success);

        let result = provider.execute(DEFAULT_PACKAGER, &["setup", "pack"], &working_dir);
        assert!(result.is_err());

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].args, vec!["--help"]);
        assert_eq!(calls[0].timeout, None);

        assert!(provider.verify_call(DEFAULT_PACKAGER, &["setup", "pack"], &working_dir));
        assert!(!provider.verify_call(DEFAULT_PACKAGER, &["setup"], &working_dir));
    }

    #[test]
    fn test_mock_program_lookup() {
        let provider = MockProcessProvider::new()
            .with_program_unavailable(DEFAULT_PACKAGER)
            .with_program("vstool", PathBuf::from("/opt/vstool"));

        assert_eq!(provider.find_program(DEFAULT_PACKAGER), None);
        assert_eq!(
            provider.find_program("vstool"),
            Some(PathBuf::from("/opt/vstool"))
        );
    }

    #[test]
    fn test_mock_command_session_workdir() {
        let session = MockCommandSession::new().with_workdir(PathBuf::from("/projects/demo"));
        assert_eq!(session.workdir().unwrap(), PathBuf::from("/projects/demo"));

        let session = MockCommandSession::new();
        assert_eq!(session.workdir().unwrap(), PathBuf::from("/test/workdir"));
    }
}
