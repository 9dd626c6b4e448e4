//! Command session architecture
//!
//! Implements the Session-Scoped Dependency Injection Pattern.
//! Each command execution creates a session that owns all ephemeral state.

use crate::application::config::AppConfig;
use crate::display::{DisplayProvider, LiveDisplayProvider};
use anyhow::{Context, Result};
use indicatif::MultiProgress;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

/// Provider trait for filesystem operations
pub trait FileSystemProvider {
    /// Get current working directory
    fn current_dir(&self) -> Result<PathBuf>;

    /// Read file contents as a string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path is a directory
    fn is_directory(&self, path: &Path) -> bool;

    /// Entries directly under a directory, sorted
    fn list_dir(&self, path: &Path) -> std::result::Result<Vec<PathBuf>, std::io::Error>;

    /// Remove a file
    fn remove_file(&self, path: &Path) -> std::result::Result<(), std::io::Error>;

    /// Remove a directory and all its contents
    fn remove_dir_all(&self, path: &Path) -> std::result::Result<(), std::io::Error>;
}

/// Process execution output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    /// Exit code, absent when the process was killed by a signal
    pub exit_code: Option<i32>,
    /// The process was killed after running past its timeout
    pub timed_out: bool,
}

impl ProcessOutput {
    /// Successful exit with the given stdout
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            success: true,
            exit_code: Some(0),
            timed_out: false,
        }
    }

    /// Non-zero exit with the given stderr
    pub fn failure(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            success: false,
            exit_code: Some(code),
            timed_out: false,
        }
    }

    /// Process killed after its timeout
    pub fn timed_out() -> Self {
        Self {
            stdout: String::new(),
            stderr: String::new(),
            success: false,
            exit_code: None,
            timed_out: true,
        }
    }
}

/// Provider trait for process execution
pub trait ProcessProvider {
    /// Execute a command with given arguments in working directory
    fn execute(&self, command: &str, args: &[&str], working_dir: &Path) -> Result<ProcessOutput> {
        self.execute_with_timeout(command, args, working_dir, None)
    }

    /// Execute a command, killing it once `timeout` elapses
    fn execute_with_timeout(
        &self,
        command: &str,
        args: &[&str],
        working_dir: &Path,
        timeout: Option<Duration>,
    ) -> Result<ProcessOutput>;

    /// Resolve a program to an executable path, searching PATH for bare names
    fn find_program(&self, program: &str) -> Option<PathBuf>;
}

/// Provider trait for configuration access
pub trait ConfigProvider {
    /// Get the application configuration
    fn app_config(&self) -> &AppConfig;
}

/// Session trait that both CommandSession and MockCommandSession can implement
pub trait Session {
    /// Get the display provider for this session
    fn display(&self) -> &dyn DisplayProvider;

    /// Get the filesystem provider for this session
    fn filesystem(&self) -> &dyn FileSystemProvider;

    /// Get the process provider for this session
    fn process(&self) -> &dyn ProcessProvider;

    /// Get the config provider for this session
    fn config(&self) -> &dyn ConfigProvider;

    /// Project directory for this session: the configured workdir, else the
    /// current directory
    fn workdir(&self) -> Result<PathBuf> {
        match &self.config().app_config().workdir {
            Some(workdir) => Ok(workdir.clone()),
            None => self.filesystem().current_dir(),
        }
    }
}

/// Live implementation of FileSystemProvider
pub struct LiveFileSystemProvider;

impl FileSystemProvider for LiveFileSystemProvider {
    fn current_dir(&self) -> Result<PathBuf> {
        std::env::current_dir().context("Failed to get current directory")
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_directory(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, path: &Path) -> std::result::Result<Vec<PathBuf>, std::io::Error> {
        let mut entries = std::fs::read_dir(path)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        entries.sort();
        Ok(entries)
    }

    fn remove_file(&self, path: &Path) -> std::result::Result<(), std::io::Error> {
        std::fs::remove_file(path)
    }

    fn remove_dir_all(&self, path: &Path) -> std::result::Result<(), std::io::Error> {
        std::fs::remove_dir_all(path)
    }
}

/// Live implementation of ProcessProvider
pub struct LiveProcessProvider {
    /// Custom PATH override for hermetic testing
    custom_path: Option<String>,
}

impl Default for LiveProcessProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Interval between exit checks while a timeout is armed
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// How long a killed process's pipes may keep draining
const DRAIN_GRACE: Duration = Duration::from_millis(200);

impl LiveProcessProvider {
    /// Create a new LiveProcessProvider with system PATH
    pub fn new() -> Self {
        Self { custom_path: None }
    }

    /// Create a LiveProcessProvider with custom PATH for hermetic testing
    pub fn with_custom_path(path: String) -> Self {
        Self {
            custom_path: Some(path),
        }
    }

    /// Create a LiveProcessProvider whose PATH starts with `test_bin_path`
    pub fn new_for_test(test_bin_path: Option<String>) -> Self {
        match test_bin_path {
            Some(bin_path) => {
                let mut paths = vec![PathBuf::from(bin_path)];
                if let Some(current) = std::env::var_os("PATH") {
                    paths.extend(std::env::split_paths(&current));
                }
                match std::env::join_paths(paths) {
                    Ok(joined) => Self::with_custom_path(joined.to_string_lossy().into_owned()),
                    Err(_) => Self::new(),
                }
            }
            None => Self::new(),
        }
    }

    fn search_path(&self) -> Option<std::ffi::OsString> {
        match &self.custom_path {
            Some(path) => Some(path.into()),
            None => std::env::var_os("PATH"),
        }
    }

    /// Wait for `child`, killing it once the deadline passes
    fn wait_with_deadline(
        child: &mut Child,
        timeout: Option<Duration>,
    ) -> Result<(Option<std::process::ExitStatus>, bool)> {
        let Some(timeout) = timeout else {
            return Ok((Some(child.wait()?), false));
        };

        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok((Some(status), false));
            }
            if Instant::now() >= deadline {
                tracing::warn!(pid = child.id(), ?timeout, "Process timed out, killing");
                kill_process_group(child);
                return Ok((None, true));
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }
}

/// Kill `child` and everything it started.
///
/// On unix the child leads its own process group, so the group is signalled
/// first; a grandchild holding the output pipes would otherwise outlive it.
fn kill_process_group(child: &mut Child) {
    #[cfg(unix)]
    if let Ok(pid) = libc::pid_t::try_from(child.id()) {
        // SAFETY: plain signal delivery to the group created at spawn
        unsafe {
            libc::kill(-pid, libc::SIGKILL);
        }
    }
    // The process may exit between try_wait and kill
    let _ = child.kill();
    let _ = child.wait();
}

/// Drain a pipe on its own thread so a chatty child cannot block on a full pipe
fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Receiver<Vec<u8>> {
    let (sender, receiver) = mpsc::channel();
    std::thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buffer);
        }
        let _ = sender.send(buffer);
    });
    receiver
}

/// Collect a reader's output; after a timeout, give up once the grace period ends
fn collect_output(reader: &Receiver<Vec<u8>>, timed_out: bool) -> Vec<u8> {
    if timed_out {
        reader.recv_timeout(DRAIN_GRACE).unwrap_or_default()
    } else {
        reader.recv().unwrap_or_default()
    }
}

impl ProcessProvider for LiveProcessProvider {
    fn execute_with_timeout(
        &self,
        command: &str,
        args: &[&str],
        working_dir: &Path,
        timeout: Option<Duration>,
    ) -> Result<ProcessOutput> {
        let mut cmd = Command::new(command);
        cmd.args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // Set custom PATH if specified
        if let Some(custom_path) = &self.custom_path {
            cmd.env("PATH", custom_path);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        let mut child = cmd
            .spawn()
            .with_context(|| format!("Failed to execute command: {}", command))?;

        let stdout = spawn_reader(child.stdout.take());
        let stderr = spawn_reader(child.stderr.take());

        let (status, timed_out) = Self::wait_with_deadline(&mut child, timeout)
            .with_context(|| format!("Failed to wait for command: {}", command))?;

        let stdout = collect_output(&stdout, timed_out);
        let stderr = collect_output(&stderr, timed_out);

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&stdout).to_string(),
            stderr: String::from_utf8_lossy(&stderr).to_string(),
            success: status.is_some_and(|s| s.success()),
            exit_code: status.and_then(|s| s.code()),
            timed_out,
        })
    }

    fn find_program(&self, program: &str) -> Option<PathBuf> {
        let candidate = Path::new(program);
        if candidate.components().count() > 1 || candidate.is_absolute() {
            return candidate.is_file().then(|| candidate.to_path_buf());
        }

        let search_path = self.search_path()?;
        std::env::split_paths(&search_path)
            .map(|dir| dir.join(program))
            .find(|path| path.is_file())
    }
}

/// Live implementation of ConfigProvider
pub struct LiveConfigProvider {
    app_config: AppConfig,
}

impl LiveConfigProvider {
    pub fn new(app_config: AppConfig) -> Self {
        Self { app_config }
    }
}

impl ConfigProvider for LiveConfigProvider {
    fn app_config(&self) -> &AppConfig {
        &self.app_config
    }
}

/// CommandSession owns all ephemeral state for a single command execution
pub struct CommandSession<F, P, C>
where
    F: FileSystemProvider,
    P: ProcessProvider,
    C: ConfigProvider,
{
    /// Owns the progress display infrastructure
    _multi_progress: MultiProgress,
    /// Display provider for this session
    display_provider: LiveDisplayProvider,
    /// Filesystem operations provider
    filesystem_provider: F,
    /// Process execution provider
    process_provider: P,
    /// Configuration provider
    config_provider: C,
}

impl CommandSession<LiveFileSystemProvider, LiveProcessProvider, LiveConfigProvider> {
    /// Create a new command session with owned state (production composition)
    pub fn new(app_config: AppConfig) -> Self {
        // Initialize display and logging if not already done
        let logger_config = app_config.to_logger_config();
        crate::display::Display::init(logger_config.color);
        if let Err(e) = crate::logger::Logger::init(logger_config) {
            tracing::debug!(error = %e, "Logger already configured");
        }

        let multi_progress = MultiProgress::new();
        let display_provider = LiveDisplayProvider::new_with_multi_progress(&multi_progress);

        Self {
            _multi_progress: multi_progress,
            display_provider,
            filesystem_provider: LiveFileSystemProvider,
            process_provider: LiveProcessProvider::new(),
            config_provider: LiveConfigProvider::new(app_config),
        }
    }
}

impl<F, P, C> CommandSession<F, P, C>
where
    F: FileSystemProvider,
    P: ProcessProvider,
    C: ConfigProvider,
{
    /// Create a new generic command session with custom providers (for testing)
    #[cfg(feature = "test-utils")]
    pub fn new_with_providers(filesystem_provider: F, process_provider: P, config_provider: C) -> Self {
        let multi_progress = MultiProgress::new();
        let display_provider = LiveDisplayProvider::new_with_multi_progress(&multi_progress);

        Self {
            _multi_progress: multi_progress,
            display_provider,
            filesystem_provider,
            process_provider,
            config_provider,
        }
    }
}

impl<F, P, C> Session for CommandSession<F, P, C>
where
    F: FileSystemProvider,
    P: ProcessProvider,
    C: ConfigProvider,
{
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
    include!("session.test.rs");
}
