//! Hermetic test environment for E2E testing
//!
//! Creates isolated environments with mock executables on a private PATH, so
//! the packaging tool can be exercised without installing it.

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use xptpack_lib::application::config::AppConfig;
use xptpack_lib::application::session::{
    CommandSession, LiveConfigProvider, LiveFileSystemProvider, LiveProcessProvider,
};

use crate::fixtures;

/// Name the mock packaging tool is installed under
pub const MOCK_PACKAGER: &str = "mdtool";

/// Hermetic test environment with mock executables
pub struct TestEnvironment {
    /// Temporary directory for the test environment
    pub temp_dir: TempDir,
    /// Path to the test environment root
    pub root_path: PathBuf,
    /// Path to the bin directory containing mock executables
    pub bin_path: PathBuf,
    /// Path to the work directory for test projects
    pub work_path: PathBuf,
    /// Mock executable configurations
    mock_executables: HashMap<String, MockExecutable>,
}

/// Configuration for a mock executable
#[derive(Debug, Clone)]
pub struct MockExecutable {
    pub name: String,
    pub behavior: MockBehavior,
    /// Log file recording each call
    pub log_path: PathBuf,
}

/// Mock executable behavior configuration
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Exit 0 without producing anything
    AlwaysSucceed,
    /// Print `error` on stderr and exit 1
    AlwaysFail { error: String },
    /// Write `name` into the working directory and exit 0
    CreateArtifact { name: String },
    /// Block for `seconds` before succeeding
    Sleep { seconds: u64 },
}

/// One recorded invocation of a mock executable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub working_dir: PathBuf,
    pub args: String,
}

impl TestEnvironment {
    /// Create a new hermetic test environment
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let root_path = temp_dir.path().to_path_buf();
        let bin_path = root_path.join("bin");
        let work_path = root_path.join("work");

        fs::create_dir_all(&bin_path)?;
        fs::create_dir_all(&work_path)?;

        Ok(Self {
            temp_dir,
            root_path,
            bin_path,
            work_path,
            mock_executables: HashMap::new(),
        })
    }

    /// Add a mock executable to the environment
    pub fn add_mock_executable(&mut self, name: &str, behavior: MockBehavior) -> Result<()> {
        let log_path = self.root_path.join(format!("{}.log", name));
        let executable_path = self.bin_path.join(name);

        let script_content = generate_mock_script(name, &behavior, &log_path);
        fs::write(&executable_path, script_content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&executable_path)?.permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&executable_path, perms)?;
        }

        self.mock_executables.insert(
            name.to_string(),
            MockExecutable {
                name: name.to_string(),
                behavior,
                log_path,
            },
        );

        Ok(())
    }

    /// Behavior configured for a mock executable
    pub fn mock_behavior(&self, name: &str) -> Option<&MockBehavior> {
        self.mock_executables.get(name).map(|mock| &mock.behavior)
    }

    /// Get all calls made to a mock executable
    pub fn get_mock_calls(&self, executable_name: &str) -> Result<Vec<MockCall>> {
        let log_path = self.root_path.join(format!("{}.log", executable_name));
        if !log_path.exists() {
            return Ok(Vec::new());
        }

        let calls = fs::read_to_string(log_path)?
            .lines()
            .filter_map(|line| {
                let (working_dir, args) = line.split_once('\t')?;
                Some(MockCall {
                    working_dir: PathBuf::from(working_dir),
                    args: args.to_string(),
                })
            })
            .collect();
        Ok(calls)
    }

    /// Create the reference project under the work directory
    pub fn init_reference_project(&self) -> Result<PathBuf> {
        let project_path = self.work_path.join(fixtures::REFERENCE_NAME);
        fixtures::write_reference_project(&project_path)?;
        Ok(project_path)
    }
}

/// Generate mock script content for an executable
fn generate_mock_script(name: &str, behavior: &MockBehavior, log_path: &Path) -> String {
    let behavior_code = match behavior {
        MockBehavior::AlwaysSucceed => "exit 0".to_string(),
        MockBehavior::AlwaysFail { error } => format!("echo '{}' >&2\nexit 1", error),
        MockBehavior::CreateArtifact { name } => {
            format!("echo 'Creating package {}'\nprintf 'PK' > '{}'\nexit 0", name, name)
        }
        // Forked, so a timeout has to reach the tool's children too
        MockBehavior::Sleep { seconds } => format!("sleep {}\nexit 0", seconds),
    };

    format!(
        r#"#!/bin/bash
# Mock executable: {name}

printf '%s\t%s\n' "$PWD" "$*" >> "{log}"

{behavior_code}
"#,
        name = name,
        log = log_path.display(),
        behavior_code = behavior_code
    )
}

/// Builder for creating hermetic test sessions
pub struct HermeticSessionBuilder {
    test_env: TestEnvironment,
    app_config: AppConfig,
}

impl HermeticSessionBuilder {
    /// Create a new hermetic session builder
    pub fn new() -> Result<Self> {
        let test_env = TestEnvironment::new()?;
        let app_config = AppConfig {
            packager: MOCK_PACKAGER.to_string(),
            ..AppConfig::default()
        };

        Ok(Self {
            test_env,
            app_config,
        })
    }

    /// Install the mock packaging tool with the given behavior
    pub fn with_mock_packager(self, behavior: MockBehavior) -> Result<Self> {
        self.with_mock_executable(MOCK_PACKAGER, behavior)
    }

    /// Add a mock executable to the test environment
    pub fn with_mock_executable(mut self, name: &str, behavior: MockBehavior) -> Result<Self> {
        self.test_env.add_mock_executable(name, behavior)?;
        Ok(self)
    }

    /// Set the working directory for the app config
    pub fn with_workdir(mut self, workdir: PathBuf) -> Self {
        self.app_config.workdir = Some(workdir);
        self
    }

    /// Kill the packaging tool after `seconds`
    pub fn with_packager_timeout(mut self, seconds: u64) -> Self {
        self.app_config.packager_timeout = Some(seconds);
        self
    }

    /// Create the reference project and make it the working directory
    pub fn with_reference_project(mut self) -> Result<Self> {
        let project_path = self.test_env.init_reference_project()?;
        self.app_config.workdir = Some(project_path);
        Ok(self)
    }

    /// Build the hermetic session with live providers on the private PATH
    pub fn build(
        self,
    ) -> Result<(
        CommandSession<LiveFileSystemProvider, LiveProcessProvider, LiveConfigProvider>,
        TestEnvironment,
    )> {
        let session = CommandSession::new_with_providers(
            LiveFileSystemProvider,
            LiveProcessProvider::new_for_test(Some(
                self.test_env.bin_path.to_string_lossy().to_string(),
            )),
            LiveConfigProvider::new(self.app_config),
        );

        Ok((session, self.test_env))
    }

    pub fn test_env(&self) -> &TestEnvironment {
        &self.test_env
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_creation() {
        let env = TestEnvironment::new().unwrap();
        assert!(env.root_path.exists());
        assert!(env.bin_path.exists());
        assert!(env.work_path.exists());
    }

    #[test]
    fn test_mock_executable_creation() {
        let mut env = TestEnvironment::new().unwrap();
        env.add_mock_executable(MOCK_PACKAGER, MockBehavior::AlwaysSucceed)
            .unwrap();

        let executable_path = env.bin_path.join(MOCK_PACKAGER);
        assert!(executable_path.exists());
        assert!(matches!(
            env.mock_behavior(MOCK_PACKAGER),
            Some(MockBehavior::AlwaysSucceed)
        ));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let metadata = fs::metadata(&executable_path).unwrap();
            assert!(metadata.permissions().mode() & 0o111 != 0);
        }
    }

    #[test]
    fn test_no_calls_before_execution() {
        let mut env = TestEnvironment::new().unwrap();
        env.add_mock_executable(MOCK_PACKAGER, MockBehavior::AlwaysSucceed)
            .unwrap();

        assert!(env.get_mock_calls(MOCK_PACKAGER).unwrap().is_empty());
    }

    #[test]
    fn test_script_behaviors() {
        let log = Path::new("/tmp/mdtool.log");

        let script = generate_mock_script("mdtool", &MockBehavior::Sleep { seconds: 30 }, log);
        assert!(script.starts_with("#!/bin/bash"));
        assert!(script.contains("sleep 30\nexit 0"));
        assert!(!script.contains("exec"));

        let script = generate_mock_script(
            "mdtool",
            &MockBehavior::CreateArtifact {
                name: "A_1.0.mpack".to_string(),
            },
            log,
        );
        assert!(script.contains("> 'A_1.0.mpack'"));
    }

    #[test]
    fn test_reference_project_initialization() {
        let env = TestEnvironment::new().unwrap();
        let project = env.init_reference_project().unwrap();

        assert_eq!(project, env.work_path.join("Demo"));
        assert!(project.join("MainActivity.cs").is_file());
        assert!(project.join("bin/Debug/Demo.dll").is_file());
    }
}
