use super::*;
use crate::application::session::ProcessOutput;
use crate::application::session_mocks::MockProcessProvider;
use tempfile::TempDir;

const ARTIFACT: &str = "MonoDevelop.Demo.Template_1.0.0.mpack";

struct Layout {
    _temp: TempDir,
    root: PathBuf,
    staging: PathBuf,
}

fn layout() -> Layout {
    let temp = TempDir::new().unwrap();
    let root = temp.path().to_path_buf();
    let staging = root.join("ProjectTemplate");
    std::fs::create_dir(&staging).unwrap();
    Layout {
        _temp: temp,
        root,
        staging,
    }
}

fn request(layout: &Layout) -> PackageRequest<'_> {
    PackageRequest {
        staging_dir: &layout.staging,
        addin_name: "Demo.addin.xml",
        artifact_prefix: "MonoDevelop.Demo.Template",
        version: "1.0.0",
        destination_dir: &layout.root,
    }
}

#[test]
fn test_artifact_name() {
    assert_eq!(artifact_name("MonoDevelop.Demo.Template", "1.0.0"), ARTIFACT);
}

#[test]
fn test_args_follow_tool_contract() {
    let options = PackagerOptions::default();
    assert_eq!(
        options.args("Demo.addin.xml"),
        vec!["-v", "setup", "pack", "Demo.addin.xml"]
    );

    let quiet = PackagerOptions {
        verbose: false,
        ..PackagerOptions::default()
    };
    assert_eq!(quiet.args("Demo.addin.xml"), vec!["setup", "pack", "Demo.addin.xml"]);
}

#[test]
fn test_package_runs_tool_in_staging_and_relocates_artifact() {
    let layout = layout();
    let process = MockProcessProvider::new().with_side_effect_file(ARTIFACT, "zip");
    let options = PackagerOptions::default();

    let artifact = PackagingOrchestrator::new(&process, &options)
        .package(&request(&layout))
        .unwrap();

    assert_eq!(artifact, layout.root.join(ARTIFACT));
    assert!(artifact.is_file());
    assert!(!layout.staging.join(ARTIFACT).exists());
    assert!(process.verify_call(
        DEFAULT_PACKAGER,
        &["-v", "setup", "pack", "Demo.addin.xml"],
        &layout.staging
    ));
}

#[test]
fn test_package_replaces_previous_artifact() {
    let layout = layout();
    std::fs::write(layout.root.join(ARTIFACT), "old").unwrap();
    let process = MockProcessProvider::new().with_side_effect_file(ARTIFACT, "new");
    let options = PackagerOptions::default();

    PackagingOrchestrator::new(&process, &options)
        .package(&request(&layout))
        .unwrap();

    assert_eq!(
        std::fs::read_to_string(layout.root.join(ARTIFACT)).unwrap(),
        "new"
    );
}

#[test]
fn test_nonzero_exit_skips_relocation() {
    let layout = layout();
    let options = PackagerOptions::default();
    let process = MockProcessProvider::new()
        .with_side_effect_file(ARTIFACT, "zip")
        .with_result(
            DEFAULT_PACKAGER.to_string(),
            options
                .args("Demo.addin.xml")
                .iter()
                .map(|s| s.to_string())
                .collect(),
            Ok(ProcessOutput::failure(3, "addin not found")),
        );

    let result = PackagingOrchestrator::new(&process, &options).package(&request(&layout));

    match result {
        Err(PackagerError::ExitFailure { code, stderr }) => {
            assert_eq!(code, Some(3));
            assert_eq!(stderr, "addin not found");
        }
        other => panic!("expected exit failure, got {:?}", other),
    }
    assert!(!layout.root.join(ARTIFACT).exists());
}

#[test]
fn test_missing_artifact_is_a_contract_violation() {
    let layout = layout();
    let process = MockProcessProvider::new();
    let options = PackagerOptions::default();

    let result = PackagingOrchestrator::new(&process, &options).package(&request(&layout));

    assert!(matches!(result, Err(PackagerError::ArtifactMissing { .. })));
}

#[test]
fn test_timeout_is_reported() {
    let layout = layout();
    let options = PackagerOptions {
        timeout: Some(Duration::from_secs(5)),
        ..PackagerOptions::default()
    };
    let process = MockProcessProvider::new().with_result(
        DEFAULT_PACKAGER.to_string(),
        options
            .args("Demo.addin.xml")
            .iter()
            .map(|s| s.to_string())
            .collect(),
        Ok(ProcessOutput::timed_out()),
    );

    let result = PackagingOrchestrator::new(&process, &options).package(&request(&layout));

    assert!(matches!(
        result,
        Err(PackagerError::TimedOut { timeout }) if timeout == Duration::from_secs(5)
    ));
    assert_eq!(process.get_calls()[0].timeout, Some(Duration::from_secs(5)));
}

#[test]
fn test_sub_second_timeout_is_reported_exactly() {
    let err = PackagerError::TimedOut {
        timeout: Duration::from_millis(500),
    };
    assert_eq!(
        err.to_string(),
        "Packaging tool timed out after 500ms and was killed"
    );
}

#[test]
fn test_launch_failure_is_reported() {
    let layout = layout();
    let options = PackagerOptions::default();
    let process = MockProcessProvider::new().with_result(
        DEFAULT_PACKAGER.to_string(),
        options
            .args("Demo.addin.xml")
            .iter()
            .map(|s| s.to_string())
            .collect(),
        Err("No such file or directory".to_string()),
    );

    let result = PackagingOrchestrator::new(&process, &options).package(&request(&layout));

    assert!(matches!(result, Err(PackagerError::LaunchFailed { .. })));
}

#[test]
fn test_exit_failure_message_mentions_signal() {
    let err = PackagerError::ExitFailure {
        code: None,
        stderr: "killed\n".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Packaging tool exited with no status (terminated by signal): killed"
    );
}

#[cfg(unix)]
mod live_tool {
    use super::*;
    use crate::application::session::LiveProcessProvider;
    use std::os::unix::fs::PermissionsExt;
    use std::time::Instant;

    fn install_tool(dir: &Path, script: &str) -> PathBuf {
        let tool = dir.join("mdtool");
        std::fs::write(&tool, script).unwrap();
        let mut perms = std::fs::metadata(&tool).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&tool, perms).unwrap();
        tool
    }

    #[test]
    fn test_timeout_bounds_tool_with_child_processes() {
        let layout = layout();
        // `sleep` runs as a child of the shell and inherits its output pipes
        let tool = install_tool(&layout.root, "#!/bin/sh\nsleep 8\necho done\n");
        let options = PackagerOptions {
            program: tool.to_string_lossy().into_owned(),
            timeout: Some(Duration::from_millis(500)),
            ..PackagerOptions::default()
        };
        let process = LiveProcessProvider::new();
        let started = Instant::now();

        let result = PackagingOrchestrator::new(&process, &options).package(&request(&layout));

        assert!(started.elapsed() < Duration::from_secs(4));
        let err = result.unwrap_err();
        assert!(matches!(err, PackagerError::TimedOut { .. }));
        assert!(err.to_string().contains("500ms"));
        assert!(!layout.root.join(ARTIFACT).exists());
    }
}
